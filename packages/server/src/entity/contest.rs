use common::{ContestStatus, ContestType, ScoringMode};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contest")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,
    pub description: String, // in Markdown
    pub contest_type: ContestType,
    pub status: ContestStatus,

    // Invariant: start_date < end_date <= voting_end_date.
    pub start_date: DateTimeUtc,
    pub end_date: DateTimeUtc,
    pub voting_end_date: DateTimeUtc,

    pub theme: Option<String>,

    pub prize_amount: i32,
    /// JSON array of f64 shares summing to 1.0 (validated at creation).
    #[sea_orm(column_type = "JsonBinary")]
    pub prize_distribution: serde_json::Value,
    pub prize_pool_formula: Option<String>,

    pub max_entries_per_user: i32,
    pub entry_fee: i32,
    pub min_participants: i32,
    pub auto_finalize: bool,
    pub require_new_track: bool,
    pub scoring_mode: ScoringMode,

    /// NULL for auto-generated contests.
    pub created_by: Option<i32>,
    /// NULL for contests outside any season.
    pub season_id: Option<i32>,

    #[sea_orm(has_many)]
    pub entries: HasMany<super::contest_entry::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
