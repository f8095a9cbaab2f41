use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{contest, submission};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::contest::*;
use crate::models::submission::SubmissionResponse;
use crate::policy::{self, Action, Caller};
use crate::ranking::{self, RankingMode};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Contests",
    operation_id = "listContests",
    summary = "List all contests",
    description = "Returns every contest ordered by end date descending, newest deadline first.",
    responses(
        (status = 200, description = "List of contests", body = Vec<ContestResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_contests(
    State(state): State<AppState>,
) -> Result<Json<Vec<ContestResponse>>, AppError> {
    let contests = contest::Entity::find()
        .order_by_desc(contest::Column::EndDate)
        .all(&state.db)
        .await?;

    Ok(Json(contests.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Contests",
    operation_id = "createContest",
    summary = "Create a new contest",
    description = "Creates a contest with its winner position slots. Admin only.",
    request_body = CreateContestRequest,
    responses(
        (status = 201, description = "Contest created", body = ContestResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(title = %payload.title))]
pub async fn create_contest(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateContestRequest>,
) -> Result<impl IntoResponse, AppError> {
    let caller = Caller::load(&state.db, auth_user.user_id).await?;
    policy::authorize(&caller, Action::ManageContests)?;
    validate_create_contest(&payload)?;

    let new_contest = contest::ActiveModel {
        title: Set(payload.title.trim().to_string()),
        description: Set(payload.description),
        start_date: Set(payload.start_date),
        end_date: Set(payload.end_date),
        status: Set(payload.status),
        jury_mode: Set(payload.jury_mode),
        positions: Set(positions_to_json(&payload.positions)),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let model = new_contest.insert(&state.db).await?;

    tracing::info!(contest_id = model.id, user_id = caller.user_id, "Contest created");

    Ok((StatusCode::CREATED, Json(ContestResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Contests",
    operation_id = "getContest",
    summary = "Get a contest with its ranked submissions and winners",
    description = "Returns the contest, its submissions in display order (jury score ordering \
        when the contest is in jury mode, vote ordering otherwise) and its winners ordered by \
        position.",
    params(("id" = i32, Path, description = "Contest ID")),
    responses(
        (status = 200, description = "Contest detail", body = ContestDetailResponse),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_contest(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ContestDetailResponse>, AppError> {
    let model = find_contest(&state.db, id).await?;

    let mut submissions = submission::Entity::find()
        .filter(submission::Column::ContestId.eq(id))
        .all(&state.db)
        .await?;

    // Display order is recomputed on every read, never stored.
    ranking::rank(RankingMode::for_contest(&model), &mut submissions);
    let winners = ranking::winners(&submissions);

    Ok(Json(ContestDetailResponse {
        contest: model.into(),
        submissions: submissions.into_iter().map(SubmissionResponse::from).collect(),
        winners: winners.into_iter().map(SubmissionResponse::from).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/{id}",
    tag = "Contests",
    operation_id = "updateContest",
    summary = "Update an existing contest",
    description = "Partially updates a contest. Admin only. Cross-field date validation runs \
        against the stored values when only one of the two dates is supplied.",
    params(("id" = i32, Path, description = "Contest ID")),
    request_body = UpdateContestRequest,
    responses(
        (status = 200, description = "Contest updated", body = ContestResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id))]
pub async fn update_contest(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateContestRequest>,
) -> Result<Json<ContestResponse>, AppError> {
    let caller = Caller::load(&state.db, auth_user.user_id).await?;
    policy::authorize(&caller, Action::ManageContests)?;
    validate_update_contest(&payload)?;

    let txn = state.db.begin().await?;
    let existing = find_contest(&txn, id).await?;

    // Cross-field date validation against existing values
    let effective_start = payload.start_date.unwrap_or(existing.start_date);
    let effective_end = payload.end_date.unwrap_or(existing.end_date);
    validate_dates(effective_start, effective_end)?;

    let mut active: contest::ActiveModel = existing.into();

    if let Some(ref title) = payload.title {
        active.title = Set(title.trim().to_string());
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(start_date) = payload.start_date {
        active.start_date = Set(start_date);
    }
    if let Some(end_date) = payload.end_date {
        active.end_date = Set(end_date);
    }
    if let Some(status) = payload.status {
        active.status = Set(status);
    }
    if let Some(jury_mode) = payload.jury_mode {
        active.jury_mode = Set(jury_mode);
    }
    if let Some(ref positions) = payload.positions {
        active.positions = Set(positions_to_json(positions));
    }

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

pub(crate) async fn find_contest<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<contest::Model, AppError> {
    contest::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Contest not found".into()))
}
