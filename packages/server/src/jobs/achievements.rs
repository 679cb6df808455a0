use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use common::config::SchedulerConfig;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect};
use tracing::{info, warn};

use crate::entity::contest_entry;
use crate::services::achievements::AchievementEvaluator;

/// Invoke the external achievement evaluator once per participant who
/// submitted an entry within the trailing scan window. Best effort: an
/// unreachable or failing evaluator awards nothing for that participant and
/// the batch continues.
pub async fn scan_recent_participants(
    db: &DatabaseConnection,
    evaluator: &dyn AchievementEvaluator,
    config: &SchedulerConfig,
    now: DateTime<Utc>,
) -> Result<String> {
    let window_start = now - Duration::minutes(config.achievement_window_mins);

    let user_ids: Vec<i32> = contest_entry::Entity::find()
        .select_only()
        .column(contest_entry::Column::UserId)
        .distinct()
        .filter(contest_entry::Column::CreatedAt.gte(window_start))
        .into_tuple()
        .all(db)
        .await?;

    let participants = user_ids.len();
    let mut awarded = 0u32;

    for user_id in user_ids {
        match evaluator.evaluate(user_id).await {
            Ok(count) => {
                if count > 0 {
                    info!(user_id, count, "Achievements awarded");
                }
                awarded += count;
            }
            Err(e) => {
                warn!(user_id, error = %format!("{e:#}"), "Achievement evaluation failed, skipping");
            }
        }
    }

    Ok(format!(
        "achievements: evaluated {participants} participant(s), {awarded} achievement(s) awarded"
    ))
}
