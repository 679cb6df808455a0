use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Per-season rollup, updated in the same transaction as a contest
/// completing so retried passes cannot double-count.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "season_stat")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub season_id: i32,

    pub contests_completed: i32,
    pub last_completed_contest_id: Option<i32>,

    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
