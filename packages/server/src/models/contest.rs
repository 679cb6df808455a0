use chrono::{DateTime, Utc};
use common::{ContestStatus, ContestType, ModerationStatus, ScoringMode, VotingVerdict};
use serde::{Deserialize, Serialize};

use crate::entity::{contest, contest_entry};
use crate::models::shared::Pagination;

#[derive(Deserialize, utoipa::IntoParams)]
pub struct ContestListQuery {
    /// Page number (1-based). Default: 1.
    pub page: Option<u64>,
    /// Items per page (1-100). Default: 20.
    pub per_page: Option<u64>,
    /// Restrict to a single lifecycle status.
    pub status: Option<ContestStatus>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ContestResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub contest_type: ContestType,
    pub status: ContestStatus,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub voting_end_date: DateTime<Utc>,
    pub theme: Option<String>,
    pub prize_amount: i32,
    pub prize_distribution: serde_json::Value,
    pub max_entries_per_user: i32,
    pub entry_fee: i32,
    pub min_participants: i32,
    pub auto_finalize: bool,
    pub require_new_track: bool,
    pub scoring_mode: ScoringMode,
    pub season_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<contest::Model> for ContestResponse {
    fn from(model: contest::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            contest_type: model.contest_type,
            status: model.status,
            start_date: model.start_date,
            end_date: model.end_date,
            voting_end_date: model.voting_end_date,
            theme: model.theme,
            prize_amount: model.prize_amount,
            prize_distribution: model.prize_distribution,
            max_entries_per_user: model.max_entries_per_user,
            entry_fee: model.entry_fee,
            min_participants: model.min_participants,
            auto_finalize: model.auto_finalize,
            require_new_track: model.require_new_track,
            scoring_mode: model.scoring_mode,
            season_id: model.season_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ContestListResponse {
    pub data: Vec<ContestResponse>,
    pub pagination: Pagination,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct EntryResponse {
    pub id: i32,
    pub contest_id: i32,
    pub user_id: i32,
    pub title: String,
    pub likes_count: i32,
    pub dislikes_count: i32,
    pub voting_result: VotingVerdict,
    pub moderation_status: ModerationStatus,
    pub voting_ends_at: DateTime<Utc>,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
}

impl From<contest_entry::Model> for EntryResponse {
    fn from(model: contest_entry::Model) -> Self {
        Self {
            id: model.id,
            contest_id: model.contest_id,
            user_id: model.user_id,
            title: model.title,
            likes_count: model.likes_count,
            dislikes_count: model.dislikes_count,
            voting_result: model.voting_result,
            moderation_status: model.moderation_status,
            voting_ends_at: model.voting_ends_at,
            is_public: model.is_public,
            created_at: model.created_at,
        }
    }
}
