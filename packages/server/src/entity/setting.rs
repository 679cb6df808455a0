use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Global key/value settings. Voting tunables live here and are read fresh
/// on every resolution pass.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "setting")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    pub value: String,
}

impl ActiveModelBehavior for ActiveModel {}
