use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc};
use common::contest::validate_prize_distribution;
use common::{ContestStatus, ContestType, ScoringMode};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use tracing::info;

use crate::entity::contest;

/// Fixed theme rotation for auto-generated daily contests. Selection is by
/// day of month only — the same day of month yields the same theme across
/// months. Intentional simplification.
const DAILY_THEMES: &[&str] = &[
    "Synthwave Sunset",
    "Lo-fi Rainy Day",
    "8-bit Arcade",
    "Acoustic Unplugged",
    "Heavy Drop",
    "Jazz After Midnight",
    "Orchestral Battle",
    "Minimal Techno",
    "Summer Anthem",
    "Dark Ambient",
];

const DAILY_PRIZE_AMOUNT: i32 = 50;
const DAILY_PRIZE_SHARES: &[f64] = &[0.6, 0.3, 0.1];

/// Ensure exactly one daily contest exists for the current calendar day.
/// A no-op when one was already generated; creation failures are reported
/// and retried naturally on the next pass.
pub async fn ensure_daily_contest(db: &DatabaseConnection, now: DateTime<Utc>) -> Result<String> {
    let (today_start, today_end, voting_end) = daily_window(now);

    let existing = contest::Entity::find()
        .filter(contest::Column::ContestType.eq(ContestType::Daily))
        .filter(contest::Column::StartDate.gte(today_start))
        .one(db)
        .await?;

    if let Some(existing) = existing {
        return Ok(format!(
            "daily: contest {} already exists for today",
            existing.id
        ));
    }

    validate_prize_distribution(DAILY_PRIZE_SHARES).context("daily prize distribution")?;

    let theme = theme_for_day(today_start.day());

    let model = contest::ActiveModel {
        title: Set(format!("Daily Challenge: {theme}")),
        description: Set(format!(
            "Today's challenge: produce a track on the theme **{theme}**. \
             One entry per artist; community voting opens when submissions close."
        )),
        contest_type: Set(ContestType::Daily),
        // The window opens at midnight, which has already passed.
        status: Set(ContestStatus::Active),
        start_date: Set(today_start),
        end_date: Set(today_end),
        voting_end_date: Set(voting_end),
        theme: Set(Some(theme.to_string())),
        prize_amount: Set(DAILY_PRIZE_AMOUNT),
        prize_distribution: Set(serde_json::json!(DAILY_PRIZE_SHARES)),
        prize_pool_formula: Set(None),
        max_entries_per_user: Set(1),
        entry_fee: Set(0),
        min_participants: Set(3),
        auto_finalize: Set(true),
        require_new_track: Set(true),
        scoring_mode: Set(ScoringMode::Votes),
        created_by: Set(None),
        season_id: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let created = model.insert(db).await?;

    info!(contest_id = created.id, theme, "Created daily contest");

    Ok(format!(
        "daily: created contest {} with theme '{theme}'",
        created.id
    ))
}

/// Submission and voting boundaries for the day containing `now`:
/// UTC midnight, +24h, and +36h.
fn daily_window(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>, DateTime<Utc>) {
    let today_start = now.date_naive().and_time(NaiveTime::MIN).and_utc();
    let today_end = today_start + Duration::hours(24);
    let voting_end = today_end + Duration::hours(12);
    (today_start, today_end, voting_end)
}

/// Theme for a 1-based day of month: `day mod len(themes)`.
fn theme_for_day(day_of_month: u32) -> &'static str {
    DAILY_THEMES[day_of_month as usize % DAILY_THEMES.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_daily_window_boundaries() {
        let now = Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap();
        let (start, end, voting_end) = daily_window(now);
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 3, 14, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 3, 15, 0, 0, 0).unwrap());
        assert_eq!(
            voting_end,
            Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_theme_is_deterministic_per_day_of_month() {
        assert_eq!(theme_for_day(14), theme_for_day(14));
        // Same day of month in a different month picks the same theme.
        let march = Utc.with_ymd_and_hms(2025, 3, 14, 12, 0, 0).unwrap();
        let july = Utc.with_ymd_and_hms(2025, 7, 14, 3, 0, 0).unwrap();
        assert_eq!(theme_for_day(march.day()), theme_for_day(july.day()));
    }

    #[test]
    fn test_theme_wraps_around_list_length() {
        let len = DAILY_THEMES.len() as u32;
        assert_eq!(theme_for_day(3), theme_for_day(3 + len));
        assert_ne!(theme_for_day(1), theme_for_day(2));
    }

    #[test]
    fn test_default_prize_shares_are_valid() {
        assert!(validate_prize_distribution(DAILY_PRIZE_SHARES).is_ok());
    }
}
