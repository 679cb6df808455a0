use common::{ModerationStatus, VotingVerdict};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contest_entry")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,

    pub contest_id: i32,
    #[sea_orm(belongs_to, from = "contest_id", to = "id")]
    pub contest: HasOne<super::contest::Entity>,

    pub user_id: i32,
    #[sea_orm(belongs_to, from = "user_id", to = "id")]
    pub user: HasOne<super::user::Entity>,

    /// Tallies accrued while `moderation_status` is `Voting`.
    pub likes_count: i32,
    pub dislikes_count: i32,

    /// Transitions exactly once away from `Pending`.
    pub voting_result: VotingVerdict,
    pub moderation_status: ModerationStatus,
    pub voting_ends_at: DateTimeUtc,

    /// Only a human moderation step may ever set this to true.
    pub is_public: bool,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
