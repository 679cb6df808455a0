use anyhow::Result;
use chrono::{DateTime, Utc};
use common::ContestStatus;
use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, QuerySelect, Set, TransactionTrait,
};
use tracing::{error, info};

use crate::entity::{contest, season_stat};

/// Advance every contest whose scheduled boundary has passed.
///
/// Each contest is handled in its own transaction with a `SELECT ... FOR
/// UPDATE` re-check, so re-running the processor (or an overlapping pass) on
/// already-transitioned contests is a no-op and a timeout loses at most the
/// in-flight row.
pub async fn process_transitions(db: &DatabaseConnection, now: DateTime<Utc>) -> Result<String> {
    let due_ids: Vec<i32> = contest::Entity::find()
        .select_only()
        .column(contest::Column::Id)
        .filter(
            Condition::any()
                .add(
                    Condition::all()
                        .add(contest::Column::Status.eq(ContestStatus::Scheduled))
                        .add(contest::Column::StartDate.lte(now)),
                )
                .add(
                    Condition::all()
                        .add(contest::Column::Status.eq(ContestStatus::Active))
                        .add(contest::Column::EndDate.lte(now)),
                )
                .add(
                    Condition::all()
                        .add(contest::Column::Status.eq(ContestStatus::Voting))
                        .add(contest::Column::AutoFinalize.eq(true))
                        .add(contest::Column::VotingEndDate.lte(now)),
                ),
        )
        .into_tuple()
        .all(db)
        .await?;

    let mut transitioned = 0usize;
    for contest_id in due_ids {
        match advance_contest(db, contest_id, now).await {
            Ok(true) => transitioned += 1,
            Ok(false) => {}
            Err(e) => {
                error!(contest_id, error = %format!("{e:#}"), "Failed to transition contest");
            }
        }
    }

    Ok(format!("lifecycle: {transitioned} contest(s) transitioned"))
}

/// The automatic transition due for a contest, if any.
///
/// Only three edges exist: `Scheduled -> Active`, `Active -> Voting`, and
/// `Voting -> Completed` (the last gated on `auto_finalize`). Cancelled and
/// Completed contests never move.
fn due_transition(
    status: ContestStatus,
    auto_finalize: bool,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    voting_end_date: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Option<ContestStatus> {
    match status {
        ContestStatus::Scheduled if now >= start_date => Some(ContestStatus::Active),
        ContestStatus::Active if now >= end_date => Some(ContestStatus::Voting),
        ContestStatus::Voting if auto_finalize && now >= voting_end_date => {
            Some(ContestStatus::Completed)
        }
        _ => None,
    }
}

/// Re-check and advance a single contest under a row lock.
/// Returns false if the contest vanished or no transition is due anymore.
async fn advance_contest(
    db: &DatabaseConnection,
    contest_id: i32,
    now: DateTime<Utc>,
) -> Result<bool> {
    let txn = db.begin().await?;

    let Some(model) = contest::Entity::find_by_id(contest_id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
    else {
        txn.rollback().await?;
        return Ok(false);
    };

    let Some(next) = due_transition(
        model.status,
        model.auto_finalize,
        model.start_date,
        model.end_date,
        model.voting_end_date,
        now,
    ) else {
        txn.rollback().await?;
        return Ok(false);
    };

    let previous = model.status;
    let season_id = model.season_id;

    let mut active: contest::ActiveModel = model.into();
    active.status = Set(next);
    active.updated_at = Set(now);
    active.update(&txn).await?;

    // Season rollup shares the completion transaction so a retried pass
    // cannot double-count.
    if next == ContestStatus::Completed
        && let Some(season_id) = season_id
    {
        roll_up_season(&txn, season_id, contest_id, now).await?;
    }

    txn.commit().await?;

    info!(contest_id, from = %previous, to = %next, "Contest transitioned");

    Ok(true)
}

async fn roll_up_season(
    txn: &DatabaseTransaction,
    season_id: i32,
    contest_id: i32,
    now: DateTime<Utc>,
) -> Result<()> {
    match season_stat::Entity::find_by_id(season_id)
        .lock(LockType::Update)
        .one(txn)
        .await?
    {
        Some(stat) => {
            let completed = stat.contests_completed + 1;
            let mut active: season_stat::ActiveModel = stat.into();
            active.contests_completed = Set(completed);
            active.last_completed_contest_id = Set(Some(contest_id));
            active.updated_at = Set(now);
            active.update(txn).await?;
        }
        None => {
            let stat = season_stat::ActiveModel {
                season_id: Set(season_id),
                contests_completed: Set(1),
                last_completed_contest_id: Set(Some(contest_id)),
                updated_at: Set(now),
            };
            stat.insert(txn).await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn windows(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>, DateTime<Utc>) {
        // start yesterday, submissions ended an hour ago, voting ends in 11h
        (
            now - Duration::days(1),
            now - Duration::hours(1),
            now + Duration::hours(11),
        )
    }

    #[test]
    fn test_active_past_end_moves_to_voting() {
        let now = Utc::now();
        let (start, end, voting_end) = windows(now);
        assert_eq!(
            due_transition(ContestStatus::Active, true, start, end, voting_end, now),
            Some(ContestStatus::Voting)
        );
    }

    #[test]
    fn test_active_before_end_stays_put() {
        let now = Utc::now();
        let start = now - Duration::days(1);
        let end = now + Duration::hours(1);
        let voting_end = end + Duration::hours(12);
        assert_eq!(
            due_transition(ContestStatus::Active, true, start, end, voting_end, now),
            None
        );
    }

    #[test]
    fn test_voting_past_deadline_completes_when_auto_finalize() {
        let now = Utc::now();
        let start = now - Duration::days(2);
        let end = now - Duration::days(1);
        let voting_end = now - Duration::hours(1);
        assert_eq!(
            due_transition(ContestStatus::Voting, true, start, end, voting_end, now),
            Some(ContestStatus::Completed)
        );
    }

    #[test]
    fn test_voting_holds_without_auto_finalize() {
        let now = Utc::now();
        let start = now - Duration::days(2);
        let end = now - Duration::days(1);
        let voting_end = now - Duration::hours(1);
        assert_eq!(
            due_transition(ContestStatus::Voting, false, start, end, voting_end, now),
            None
        );
    }

    #[test]
    fn test_scheduled_activates_once_started() {
        let now = Utc::now();
        let (start, end, voting_end) = windows(now);
        assert_eq!(
            due_transition(ContestStatus::Scheduled, true, start, end, voting_end, now),
            Some(ContestStatus::Active)
        );
        assert_eq!(
            due_transition(
                ContestStatus::Scheduled,
                true,
                now + Duration::hours(1),
                end,
                voting_end,
                now
            ),
            None
        );
    }

    #[test]
    fn test_terminal_statuses_never_move() {
        let now = Utc::now();
        let (start, end, voting_end) = windows(now);
        for status in [ContestStatus::Completed, ContestStatus::Cancelled] {
            assert_eq!(
                due_transition(status, true, start, end, voting_end, now),
                None
            );
        }
    }

    #[test]
    fn test_transition_is_idempotent() {
        // Re-evaluating the target state of a transition yields no further
        // transition at the same instant.
        let now = Utc::now();
        let (start, end, voting_end) = windows(now);
        let next = due_transition(ContestStatus::Active, true, start, end, voting_end, now)
            .expect("transition due");
        assert_eq!(due_transition(next, true, start, end, voting_end, now), None);
    }
}
