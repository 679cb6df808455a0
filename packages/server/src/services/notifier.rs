use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

use crate::entity::notification;

/// A single outbound notification request. Delivery beyond handing it to the
/// dispatcher is out of scope.
#[derive(Debug, Clone)]
pub struct NotificationRequest {
    pub user_id: i32,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub target_type: String,
    pub target_id: Option<i32>,
}

/// Fire-and-forget notification dispatcher. Callers treat failures as
/// non-fatal: a lost notification never rolls back the state change that
/// produced it.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, request: NotificationRequest) -> anyhow::Result<()>;
}

/// Notifier backed by the `notification` table; a separate delivery pipeline
/// drains it.
pub struct DbNotifier {
    db: DatabaseConnection,
}

impl DbNotifier {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Notifier for DbNotifier {
    async fn notify(&self, request: NotificationRequest) -> anyhow::Result<()> {
        let model = notification::ActiveModel {
            user_id: Set(request.user_id),
            kind: Set(request.kind),
            title: Set(request.title),
            message: Set(request.message),
            target_type: Set(request.target_type),
            target_id: Set(request.target_id),
            read: Set(false),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        model.insert(&self.db).await?;
        Ok(())
    }
}
