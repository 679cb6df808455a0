use anyhow::{Result, anyhow};
use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use common::config::SchedulerConfig;
use sea_orm::prelude::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use tracing::info;

use crate::entity::leaderboard_rating;

/// Zero the weekly leaderboard counters when inside the configured reset
/// window. The update only touches rows with a positive counter, so firing
/// more than once within the window changes nothing.
pub async fn run(
    db: &DatabaseConnection,
    config: &SchedulerConfig,
    now: DateTime<Utc>,
) -> Result<String> {
    let weekday = config
        .reset_weekday()
        .map_err(|e| anyhow!("invalid weekly_reset_weekday '{}': {e}", config.weekly_reset_weekday))?;

    if !in_reset_window(now, weekday, config.weekly_reset_hour) {
        return Ok("weekly_reset: outside reset window, skipped".into());
    }

    let result = leaderboard_rating::Entity::update_many()
        .col_expr(leaderboard_rating::Column::WeeklyPoints, Expr::value(0))
        .col_expr(leaderboard_rating::Column::UpdatedAt, Expr::value(now))
        .filter(leaderboard_rating::Column::WeeklyPoints.gt(0))
        .exec(db)
        .await?;

    if result.rows_affected > 0 {
        info!(rows = result.rows_affected, "Weekly leaderboard counters reset");
    }

    Ok(format!(
        "weekly_reset: zeroed {} counter(s)",
        result.rows_affected
    ))
}

/// The reset fires during one configured hour of one configured weekday.
/// With an invocation cadence of at most an hour this window cannot be
/// skipped over.
fn in_reset_window(now: DateTime<Utc>, weekday: Weekday, hour: u32) -> bool {
    now.weekday() == weekday && now.hour() == hour
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_window_matches_weekday_and_hour() {
        // 2025-03-17 is a Monday.
        let inside = Utc.with_ymd_and_hms(2025, 3, 17, 0, 25, 0).unwrap();
        assert!(in_reset_window(inside, Weekday::Mon, 0));
    }

    #[test]
    fn test_window_rejects_wrong_hour() {
        let later = Utc.with_ymd_and_hms(2025, 3, 17, 1, 0, 0).unwrap();
        assert!(!in_reset_window(later, Weekday::Mon, 0));
    }

    #[test]
    fn test_window_rejects_wrong_weekday() {
        let tuesday = Utc.with_ymd_and_hms(2025, 3, 18, 0, 25, 0).unwrap();
        assert!(!in_reset_window(tuesday, Weekday::Mon, 0));
    }

    #[test]
    fn test_window_honors_configured_hour() {
        let evening = Utc.with_ymd_and_hms(2025, 3, 17, 22, 5, 0).unwrap();
        assert!(in_reset_window(evening, Weekday::Mon, 22));
        assert!(!in_reset_window(evening, Weekday::Mon, 0));
    }
}
