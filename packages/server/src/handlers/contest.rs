use axum::Json;
use axum::extract::{Path, Query, State};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{contest, contest_entry};
use crate::error::{AppError, ErrorBody};
use crate::models::contest::*;
use crate::models::shared::Pagination;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Contests",
    operation_id = "listContests",
    summary = "List contests with pagination",
    description = "Returns a paginated list of contests, newest first, optionally filtered by lifecycle status. Read-only observability endpoint.",
    params(ContestListQuery),
    responses(
        (status = 200, description = "List of contests", body = ContestListResponse),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_contests(
    State(state): State<AppState>,
    Query(query): Query<ContestListQuery>,
) -> Result<Json<ContestListResponse>, AppError> {
    let page = Ord::max(query.page.unwrap_or(1), 1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);

    let mut select = contest::Entity::find();

    if let Some(status) = query.status {
        select = select.filter(contest::Column::Status.eq(status));
    }

    let total = select
        .clone()
        .paginate(&state.db, per_page)
        .num_items()
        .await?;
    let total_pages = total.div_ceil(per_page);

    let data = select
        .order_by_desc(contest::Column::CreatedAt)
        .offset(Some((page - 1) * per_page))
        .limit(Some(per_page))
        .all(&state.db)
        .await?
        .into_iter()
        .map(ContestResponse::from)
        .collect();

    Ok(Json(ContestListResponse {
        data,
        pagination: Pagination {
            page,
            per_page,
            total,
            total_pages,
        },
    }))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Contests",
    operation_id = "getContest",
    summary = "Get a contest by ID",
    params(("id" = i32, Path, description = "Contest ID")),
    responses(
        (status = 200, description = "Contest details", body = ContestResponse),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_contest(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ContestResponse>, AppError> {
    let model = find_contest(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    get,
    path = "/{id}/entries",
    tag = "Contests",
    operation_id = "listContestEntries",
    summary = "List entries of a contest",
    description = "Returns all entries in the contest, newest first, with their vote tallies, voting verdicts and moderation status.",
    params(("id" = i32, Path, description = "Contest ID")),
    responses(
        (status = 200, description = "List of entries", body = Vec<EntryResponse>),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(contest_id))]
pub async fn list_contest_entries(
    State(state): State<AppState>,
    Path(contest_id): Path<i32>,
) -> Result<Json<Vec<EntryResponse>>, AppError> {
    find_contest(&state.db, contest_id).await?;

    let rows = contest_entry::Entity::find()
        .filter(contest_entry::Column::ContestId.eq(contest_id))
        .order_by_desc(contest_entry::Column::CreatedAt)
        .all(&state.db)
        .await?;

    Ok(Json(rows.into_iter().map(EntryResponse::from).collect()))
}

async fn find_contest<C: ConnectionTrait>(db: &C, id: i32) -> Result<contest::Model, AppError> {
    contest::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Contest not found".into()))
}
