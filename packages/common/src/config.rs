use chrono::Weekday;
use serde::Deserialize;

/// App-level scheduler configuration.
///
/// The invocation cadence, the weekly reset window, and the achievement scan
/// window are all explicit parameters: the reset window check only behaves
/// correctly when the cadence is at most one hour, so both live together here.
#[derive(Debug, Deserialize, Clone)]
pub struct SchedulerConfig {
    /// Whether the in-process scheduler loop is spawned. Default: true.
    /// The HTTP trigger works either way.
    #[serde(default = "default_scheduler_enabled")]
    pub enabled: bool,
    /// Seconds between scheduled passes. Default: 300 (five minutes).
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Shared key required in `X-Api-Key` for the HTTP trigger.
    /// Default: none (trigger is open; meant for development only).
    #[serde(default)]
    pub api_key: Option<String>,
    /// Day of week on which weekly leaderboard counters reset.
    /// Accepts chrono weekday names ("Mon", "Monday", ...). Default: "Mon".
    #[serde(default = "default_reset_weekday")]
    pub weekly_reset_weekday: String,
    /// UTC hour (0-23) during which the weekly reset fires. Default: 0.
    #[serde(default = "default_reset_hour")]
    pub weekly_reset_hour: u32,
    /// Trailing window, in minutes, for the achievement participant scan.
    /// Default: 10.
    #[serde(default = "default_achievement_window_mins")]
    pub achievement_window_mins: i64,
}

fn default_scheduler_enabled() -> bool {
    true
}
fn default_interval_secs() -> u64 {
    300
}
fn default_reset_weekday() -> String {
    "Mon".into()
}
fn default_reset_hour() -> u32 {
    0
}
fn default_achievement_window_mins() -> i64 {
    10
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: default_scheduler_enabled(),
            interval_secs: default_interval_secs(),
            api_key: None,
            weekly_reset_weekday: default_reset_weekday(),
            weekly_reset_hour: default_reset_hour(),
            achievement_window_mins: default_achievement_window_mins(),
        }
    }
}

impl SchedulerConfig {
    /// Parse the configured reset weekday.
    pub fn reset_weekday(&self) -> Result<Weekday, chrono::ParseWeekdayError> {
        self.weekly_reset_weekday.parse::<Weekday>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_input() {
        let parsed: SchedulerConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.enabled);
        assert_eq!(parsed.interval_secs, 300);
        assert_eq!(parsed.api_key, None);
        assert_eq!(parsed.weekly_reset_hour, 0);
        assert_eq!(parsed.achievement_window_mins, 10);
        assert_eq!(parsed.reset_weekday().unwrap(), Weekday::Mon);
    }

    #[test]
    fn test_reset_weekday_accepts_full_names() {
        let config = SchedulerConfig {
            weekly_reset_weekday: "sunday".into(),
            ..Default::default()
        };
        assert_eq!(config.reset_weekday().unwrap(), Weekday::Sun);
    }

    #[test]
    fn test_reset_weekday_rejects_garbage() {
        let config = SchedulerConfig {
            weekly_reset_weekday: "someday".into(),
            ..Default::default()
        };
        assert!(config.reset_weekday().is_err());
    }
}
