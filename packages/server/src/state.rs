use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::services::achievements::AchievementEvaluator;
use crate::services::notifier::Notifier;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<AppConfig>,
    pub notifier: Arc<dyn Notifier>,
    pub evaluator: Arc<dyn AchievementEvaluator>,
}
