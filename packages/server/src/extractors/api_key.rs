use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;
use crate::state::AppState;

/// Shared-key guard for the scheduler trigger, taken from the `X-Api-Key`
/// header. When no key is configured the trigger is open (development mode).
///
/// Add this as a handler parameter to require the key.
pub struct SchedulerKey;

impl FromRequestParts<AppState> for SchedulerKey {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.config.scheduler.api_key.as_deref() else {
            return Ok(SchedulerKey);
        };

        let provided = parts
            .headers
            .get("X-Api-Key")
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::KeyMissing)?;

        if provided == expected {
            Ok(SchedulerKey)
        } else {
            Err(AppError::KeyInvalid)
        }
    }
}
