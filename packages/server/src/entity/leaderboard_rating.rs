use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "leaderboard_rating")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i32,
    #[sea_orm(belongs_to, from = "user_id", to = "id")]
    pub user: HasOne<super::user::Entity>,

    pub total_points: i32,
    /// Monotonically non-decreasing between resets; zeroed by the weekly
    /// reset job.
    pub weekly_points: i32,

    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
