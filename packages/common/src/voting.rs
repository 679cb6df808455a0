use std::collections::HashMap;

use tracing::warn;

use crate::moderation::{ModerationStatus, VotingVerdict};

/// Setting key for the minimum total votes required before any verdict other
/// than rejection-by-insufficient-participation.
pub const SETTING_MIN_VOTES: &str = "voting_min_votes";
/// Setting key for the minimum fraction of positive votes required for approval.
pub const SETTING_APPROVAL_RATIO: &str = "voting_approval_ratio";
/// Setting key for whether artists are notified of their voting outcome.
pub const SETTING_NOTIFY_ARTIST: &str = "voting_notify_artist";

/// Tunables for the voting resolution engine.
///
/// Read fresh from the settings store at the start of every resolution pass
/// and passed by value, so the engine stays a pure function of
/// (entries, settings, now).
#[derive(Debug, Clone, PartialEq)]
pub struct VotingSettings {
    /// Quorum: total votes required for the tally to count.
    pub min_votes: u32,
    /// Fraction of positive votes (of total) required for approval, in [0, 1].
    pub approval_ratio: f64,
    /// Whether to notify the entry owner of the outcome.
    pub notify_artist: bool,
}

impl Default for VotingSettings {
    fn default() -> Self {
        Self {
            min_votes: 10,
            approval_ratio: 0.6,
            notify_artist: true,
        }
    }
}

impl VotingSettings {
    /// Build settings from raw key/value rows, falling back to defaults for
    /// missing or malformed values. Malformed values are a configuration
    /// error: logged, never fatal.
    pub fn from_map(map: &HashMap<String, String>) -> Self {
        let mut settings = Self::default();

        if let Some(raw) = map.get(SETTING_MIN_VOTES) {
            match raw.trim().parse::<u32>() {
                Ok(n) => settings.min_votes = n,
                Err(_) => warn!(value = %raw, "Invalid {SETTING_MIN_VOTES} setting, using default"),
            }
        }

        if let Some(raw) = map.get(SETTING_APPROVAL_RATIO) {
            match raw.trim().parse::<f64>() {
                Ok(ratio) if (0.0..=1.0).contains(&ratio) => settings.approval_ratio = ratio,
                Ok(ratio) => {
                    warn!(
                        value = ratio,
                        "{SETTING_APPROVAL_RATIO} outside [0, 1], clamping"
                    );
                    settings.approval_ratio = ratio.clamp(0.0, 1.0);
                }
                Err(_) => {
                    warn!(value = %raw, "Invalid {SETTING_APPROVAL_RATIO} setting, using default")
                }
            }
        }

        if let Some(raw) = map.get(SETTING_NOTIFY_ARTIST) {
            match raw.trim().parse::<bool>() {
                Ok(flag) => settings.notify_artist = flag,
                Err(_) => {
                    warn!(value = %raw, "Invalid {SETTING_NOTIFY_ARTIST} setting, using default")
                }
            }
        }

        settings
    }
}

/// Resolved outcome for a single entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub verdict: VotingVerdict,
    /// Where the entry goes next: approved entries return to the human
    /// moderation queue (`Pending`), rejected entries are closed out.
    pub moderation_status: ModerationStatus,
    /// Human-readable reason, used for the report and artist notification.
    pub reason: String,
}

impl Resolution {
    pub fn is_approved(&self) -> bool {
        self.verdict == VotingVerdict::VotingApproved
    }
}

/// Decide an entry's fate from its aggregated vote tallies.
///
/// Quorum is checked first; below it the like ratio is never consulted.
/// Approval never publishes: it only moves the entry back to human review.
pub fn resolve_votes(likes: i32, dislikes: i32, settings: &VotingSettings) -> Resolution {
    let total = likes.saturating_add(dislikes);

    if total <= 0 || (total as i64) < i64::from(settings.min_votes) {
        return Resolution {
            verdict: VotingVerdict::Rejected,
            moderation_status: ModerationStatus::Rejected,
            reason: format!(
                "Received {} of {} required votes",
                total.max(0),
                settings.min_votes
            ),
        };
    }

    let ratio = f64::from(likes) / f64::from(total);
    let percent = (ratio * 100.0).round() as i32;

    if ratio >= settings.approval_ratio {
        Resolution {
            verdict: VotingVerdict::VotingApproved,
            moderation_status: ModerationStatus::Pending,
            reason: format!("Approved with {percent}% positive votes"),
        }
    } else {
        let required = (settings.approval_ratio * 100.0).round() as i32;
        Resolution {
            verdict: VotingVerdict::Rejected,
            moderation_status: ModerationStatus::Rejected,
            reason: format!("Only {percent}% positive votes, {required}% required"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(min_votes: u32, approval_ratio: f64) -> VotingSettings {
        VotingSettings {
            min_votes,
            approval_ratio,
            notify_artist: true,
        }
    }

    #[test]
    fn test_rejects_below_quorum() {
        let res = resolve_votes(4, 2, &settings(10, 0.6));
        assert_eq!(res.verdict, VotingVerdict::Rejected);
        assert_eq!(res.moderation_status, ModerationStatus::Rejected);
        assert_eq!(res.reason, "Received 6 of 10 required votes");
    }

    #[test]
    fn test_approves_at_quorum_with_high_ratio() {
        // total = 10 meets quorum, ratio = 0.8 >= 0.6
        let res = resolve_votes(8, 2, &settings(10, 0.6));
        assert_eq!(res.verdict, VotingVerdict::VotingApproved);
        assert_eq!(res.moderation_status, ModerationStatus::Pending);
        assert_eq!(res.reason, "Approved with 80% positive votes");
    }

    #[test]
    fn test_rejects_below_approval_ratio() {
        let res = resolve_votes(5, 5, &settings(10, 0.6));
        assert_eq!(res.verdict, VotingVerdict::Rejected);
        assert_eq!(res.reason, "Only 50% positive votes, 60% required");
    }

    #[test]
    fn test_ratio_exactly_at_threshold_approves() {
        let res = resolve_votes(6, 4, &settings(10, 0.6));
        assert_eq!(res.verdict, VotingVerdict::VotingApproved);
    }

    #[test]
    fn test_zero_votes_rejected_even_with_zero_quorum() {
        let res = resolve_votes(0, 0, &settings(0, 0.6));
        assert_eq!(res.verdict, VotingVerdict::Rejected);
    }

    #[test]
    fn test_from_map_defaults_when_empty() {
        let parsed = VotingSettings::from_map(&HashMap::new());
        assert_eq!(parsed, VotingSettings::default());
    }

    #[test]
    fn test_from_map_parses_values() {
        let map = HashMap::from([
            (SETTING_MIN_VOTES.to_string(), "25".to_string()),
            (SETTING_APPROVAL_RATIO.to_string(), "0.75".to_string()),
            (SETTING_NOTIFY_ARTIST.to_string(), "false".to_string()),
        ]);
        let parsed = VotingSettings::from_map(&map);
        assert_eq!(parsed.min_votes, 25);
        assert_eq!(parsed.approval_ratio, 0.75);
        assert!(!parsed.notify_artist);
    }

    #[test]
    fn test_from_map_falls_back_on_malformed_values() {
        let map = HashMap::from([
            (SETTING_MIN_VOTES.to_string(), "lots".to_string()),
            (SETTING_APPROVAL_RATIO.to_string(), "most".to_string()),
            (SETTING_NOTIFY_ARTIST.to_string(), "yes".to_string()),
        ]);
        let parsed = VotingSettings::from_map(&map);
        assert_eq!(parsed, VotingSettings::default());
    }

    #[test]
    fn test_from_map_clamps_out_of_range_ratio() {
        let map = HashMap::from([(SETTING_APPROVAL_RATIO.to_string(), "1.4".to_string())]);
        let parsed = VotingSettings::from_map(&map);
        assert_eq!(parsed.approval_ratio, 1.0);
    }
}
