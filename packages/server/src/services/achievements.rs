use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

/// External achievement-evaluation capability: given a participant, decide
/// which achievements they newly earned and return how many were granted.
#[async_trait]
pub trait AchievementEvaluator: Send + Sync {
    async fn evaluate(&self, user_id: i32) -> anyhow::Result<u32>;
}

#[derive(Deserialize)]
struct EvaluateResponse {
    awarded: u32,
}

/// HTTP-backed evaluator with a bounded per-call timeout.
pub struct HttpAchievementEvaluator {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAchievementEvaluator {
    pub fn new(base_url: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl AchievementEvaluator for HttpAchievementEvaluator {
    async fn evaluate(&self, user_id: i32) -> anyhow::Result<u32> {
        let response = self
            .client
            .post(format!("{}/evaluate", self.base_url))
            .json(&serde_json::json!({ "user_id": user_id }))
            .send()
            .await?
            .error_for_status()?
            .json::<EvaluateResponse>()
            .await?;
        Ok(response.awarded)
    }
}

/// Evaluator used when no endpoint is configured; awards nothing.
pub struct DisabledAchievementEvaluator;

#[async_trait]
impl AchievementEvaluator for DisabledAchievementEvaluator {
    async fn evaluate(&self, _user_id: i32) -> anyhow::Result<u32> {
        Ok(0)
    }
}
