use axum::Json;
use axum::extract::State;
use tracing::instrument;

use crate::error::ErrorBody;
use crate::extractors::api_key::SchedulerKey;
use crate::jobs::{self, SchedulerReport};
use crate::state::AppState;

/// Entry point for an on-demand scheduler pass. The same function runs on
/// the fixed cadence from the in-process loop; invoking it here in between
/// is harmless because every job re-checks row state before mutating.
#[utoipa::path(
    post,
    path = "/run",
    tag = "Scheduler",
    operation_id = "runScheduler",
    summary = "Run one scheduler pass now",
    description = "Runs all five scheduled jobs (lifecycle transitions, daily challenge generation, weekly counter reset, voting resolution, achievement scan) once. Per-job failures are reported in `results` without failing the pass. Requires the configured API key.",
    responses(
        (status = 200, description = "Pass completed", body = SchedulerReport),
        (status = 401, description = "Missing or invalid API key (KEY_MISSING, KEY_INVALID)", body = ErrorBody),
        (status = 500, description = "Unexpected failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
    security(("api_key" = [])),
)]
#[instrument(skip(state, _key))]
pub async fn run_scheduler(_key: SchedulerKey, State(state): State<AppState>) -> Json<SchedulerReport> {
    Json(jobs::run_scheduled_jobs(&state).await)
}
