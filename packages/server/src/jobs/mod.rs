pub mod achievements;
pub mod daily;
pub mod lifecycle;
pub mod voting;
pub mod weekly_reset;

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info};

use crate::state::AppState;

/// Structured report for one scheduler pass, returned by the HTTP trigger
/// and logged by the in-process loop.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SchedulerReport {
    pub ok: bool,
    /// One summary line per job, plus one line per resolved entry; failed
    /// jobs report their error here instead of aborting the pass.
    pub results: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

/// Run all five scheduled jobs once.
///
/// The jobs are independent: a failure in one is captured into the report and
/// the rest still run. Idempotency lives inside each job (status guards,
/// "already zero" resets, "not yet resolved" filters), so overlapping passes
/// are safe.
pub async fn run_scheduled_jobs(state: &AppState) -> SchedulerReport {
    let now = Utc::now();
    let mut results = Vec::with_capacity(5);
    let mut ok = true;

    ok &= record(
        &mut results,
        "lifecycle",
        lifecycle::process_transitions(&state.db, now).await,
    );
    ok &= record(
        &mut results,
        "daily",
        daily::ensure_daily_contest(&state.db, now).await,
    );
    ok &= record(
        &mut results,
        "weekly_reset",
        weekly_reset::run(&state.db, &state.config.scheduler, now).await,
    );
    match voting::resolve_expired_entries(&state.db, state.notifier.as_ref(), now).await {
        Ok(outcome) => {
            results.push(outcome.summary);
            for entry in &outcome.resolutions {
                results.push(format!(
                    "voting: entry {} \"{}\": {} ({})",
                    entry.entry_id, entry.title, entry.verdict, entry.reason
                ));
            }
        }
        Err(e) => {
            ok = false;
            error!(job = "voting", error = %format!("{e:#}"), "Scheduled job failed");
            results.push(format!("voting: error: {e:#}"));
        }
    }
    ok &= record(
        &mut results,
        "achievements",
        achievements::scan_recent_participants(
            &state.db,
            state.evaluator.as_ref(),
            &state.config.scheduler,
            now,
        )
        .await,
    );

    SchedulerReport {
        ok,
        results,
        timestamp: now,
    }
}

fn record(results: &mut Vec<String>, job: &str, outcome: anyhow::Result<String>) -> bool {
    match outcome {
        Ok(summary) => {
            results.push(summary);
            true
        }
        Err(e) => {
            error!(job, error = %format!("{e:#}"), "Scheduled job failed");
            results.push(format!("{job}: error: {e:#}"));
            false
        }
    }
}

/// Run the scheduler as a background task on a fixed cadence.
pub async fn run_scheduler_loop(state: AppState) {
    let interval_secs = state.config.scheduler.interval_secs;

    info!(interval_secs, "Starting scheduler loop");

    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));

    loop {
        interval.tick().await;

        let report = run_scheduled_jobs(&state).await;
        info!(
            ok = report.ok,
            lines = report.results.len(),
            timestamp = %report.timestamp,
            "Scheduler pass complete"
        );
        for line in &report.results {
            info!("{line}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_serialization_shape() {
        let report = SchedulerReport {
            ok: true,
            results: vec!["lifecycle: 2 contest(s) transitioned".into()],
            timestamp: Utc::now(),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["ok"], true);
        assert!(json["results"].is_array());
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn test_record_captures_errors_without_panic() {
        let mut results = Vec::new();
        assert!(record(&mut results, "lifecycle", Ok("lifecycle: done".into())));
        assert!(!record(&mut results, "daily", Err(anyhow::anyhow!("db unreachable"))));
        assert_eq!(results.len(), 2);
        assert_eq!(results[0], "lifecycle: done");
        assert!(results[1].starts_with("daily: error:"));
    }
}
