use std::collections::HashMap;

use anyhow::Result;
use chrono::{DateTime, Utc};
use common::moderation::ModerationStatus;
use common::voting::{
    Resolution, SETTING_APPROVAL_RATIO, SETTING_MIN_VOTES, SETTING_NOTIFY_ARTIST, VotingSettings,
    resolve_votes,
};
use common::VotingVerdict;
use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QuerySelect, Set, TransactionTrait,
};
use tracing::{error, info, warn};

use crate::entity::{contest_entry, setting};
use crate::services::notifier::{NotificationRequest, Notifier};

/// Per-entry line of the resolution report. Observability only, never
/// consulted for control flow.
#[derive(Debug, Clone)]
pub struct EntryResolution {
    pub entry_id: i32,
    pub title: String,
    pub verdict: VotingVerdict,
    pub reason: String,
}

/// Outcome of one resolution pass.
pub struct VotingOutcome {
    pub summary: String,
    pub resolutions: Vec<EntryResolution>,
}

/// Close out every entry whose voting window has expired.
///
/// Settings are read fresh each pass. Entries are resolved one transaction at
/// a time with a CAS on `moderation_status = Voting`, so entries that already
/// transitioned (or got picked up by an overlapping pass) drop out naturally.
pub async fn resolve_expired_entries(
    db: &DatabaseConnection,
    notifier: &dyn Notifier,
    now: DateTime<Utc>,
) -> Result<VotingOutcome> {
    let settings = load_voting_settings(db).await?;

    let expired = contest_entry::Entity::find()
        .filter(contest_entry::Column::ModerationStatus.eq(ModerationStatus::Voting))
        .filter(contest_entry::Column::VotingEndsAt.lte(now))
        .all(db)
        .await?;

    let mut resolutions = Vec::with_capacity(expired.len());
    let mut approved = 0usize;
    let mut rejected = 0usize;

    for entry in expired {
        let entry_id = entry.id;
        let resolution = resolve_votes(entry.likes_count, entry.dislikes_count, &settings);

        match persist_resolution(db, entry_id, &resolution).await {
            Ok(true) => {}
            Ok(false) => continue, // already resolved by someone else
            Err(e) => {
                error!(entry_id, error = %format!("{e:#}"), "Failed to persist voting verdict");
                continue;
            }
        }

        info!(
            entry_id,
            verdict = %resolution.verdict,
            likes = entry.likes_count,
            dislikes = entry.dislikes_count,
            "Resolved voting for entry"
        );

        if resolution.is_approved() {
            approved += 1;
        } else {
            rejected += 1;
        }

        // Post-commit side effect: a notification failure must never undo
        // or block the verdict.
        if settings.notify_artist {
            let request = outcome_notification(entry.user_id, entry_id, &entry.title, &resolution);
            if let Err(e) = notifier.notify(request).await {
                warn!(entry_id, error = %format!("{e:#}"), "Failed to notify artist of voting outcome");
            }
        }

        resolutions.push(EntryResolution {
            entry_id,
            title: entry.title,
            verdict: resolution.verdict,
            reason: resolution.reason,
        });
    }

    Ok(VotingOutcome {
        summary: format!("voting: resolved {} entr(ies), {approved} approved, {rejected} rejected",
            resolutions.len()
        ),
        resolutions,
    })
}

/// Read the voting tunables fresh from the settings table.
pub async fn load_voting_settings<C: ConnectionTrait>(db: &C) -> Result<VotingSettings> {
    let rows = setting::Entity::find()
        .filter(setting::Column::Key.is_in([
            SETTING_MIN_VOTES,
            SETTING_APPROVAL_RATIO,
            SETTING_NOTIFY_ARTIST,
        ]))
        .all(db)
        .await?;

    let map: HashMap<String, String> = rows.into_iter().map(|row| (row.key, row.value)).collect();
    Ok(VotingSettings::from_map(&map))
}

/// Write verdict, moderation status and visibility atomically for one entry.
/// Returns false if the entry is no longer awaiting resolution.
async fn persist_resolution(
    db: &DatabaseConnection,
    entry_id: i32,
    resolution: &Resolution,
) -> Result<bool> {
    let txn = db.begin().await?;

    let Some(entry) = contest_entry::Entity::find_by_id(entry_id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
    else {
        txn.rollback().await?;
        return Ok(false);
    };

    if entry.moderation_status != ModerationStatus::Voting {
        txn.rollback().await?;
        return Ok(false);
    }

    let mut active: contest_entry::ActiveModel = entry.into();
    active.voting_result = Set(resolution.verdict);
    active.moderation_status = Set(resolution.moderation_status);
    // Publication is always a subsequent, human-gated decision.
    active.is_public = Set(false);
    active.update(&txn).await?;

    txn.commit().await?;
    Ok(true)
}

/// Build the artist-facing notification for a resolved entry.
fn outcome_notification(
    user_id: i32,
    entry_id: i32,
    entry_title: &str,
    resolution: &Resolution,
) -> NotificationRequest {
    let (title, message) = if resolution.is_approved() {
        (
            "Your entry passed the community vote".to_string(),
            format!(
                "Congratulations! \"{entry_title}\" was approved by the community \
                 ({reason}) and has been forwarded for final review.",
                reason = resolution.reason
            ),
        )
    } else {
        (
            "Your entry was not approved".to_string(),
            format!("\"{entry_title}\" did not pass the community vote: {}.", resolution.reason),
        )
    };

    NotificationRequest {
        user_id,
        kind: "voting_result".to_string(),
        title,
        message,
        target_type: "contest_entry".to_string(),
        target_id: Some(entry_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolution_for(likes: i32, dislikes: i32) -> Resolution {
        resolve_votes(likes, dislikes, &VotingSettings::default())
    }

    #[test]
    fn test_approved_notification_mentions_final_review() {
        let request = outcome_notification(7, 42, "Neon Nights", &resolution_for(8, 2));
        assert_eq!(request.user_id, 7);
        assert_eq!(request.target_id, Some(42));
        assert_eq!(request.kind, "voting_result");
        assert_eq!(request.target_type, "contest_entry");
        assert!(request.message.contains("Neon Nights"));
        assert!(request.message.contains("forwarded for final review"));
        assert!(request.message.contains("80% positive votes"));
    }

    #[test]
    fn test_rejected_notification_carries_percentage() {
        let request = outcome_notification(7, 42, "Neon Nights", &resolution_for(5, 5));
        assert!(request.message.contains("did not pass"));
        assert!(request.message.contains("Only 50% positive votes, 60% required"));
    }

    #[test]
    fn test_quorum_rejection_reports_vote_count() {
        let request = outcome_notification(7, 42, "Neon Nights", &resolution_for(4, 2));
        assert!(request.message.contains("Received 6 of 10 required votes"));
    }
}
