use axum::Json;
use axum::extract::{Path, State};
use sea_orm::prelude::Expr;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{profile, submission};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::handlers::contest::find_contest;
use crate::models::admin::{
    ScoreRequest, SetAdminRequest, SetWinnerRequest, validate_score, validate_set_winner,
};
use crate::models::auth::MeResponse;
use crate::models::contest::positions_from_json;
use crate::models::submission::SubmissionResponse;
use crate::policy::{self, Action, Caller};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/set-winner",
    tag = "Admin",
    operation_id = "setWinner",
    summary = "Assign or clear a winner position",
    description = "Assigns a submission to one of the contest's winner positions, displacing \
        any current holder of that position, or clears the submission's position when `rank` \
        is null. The rank must be one the contest's position list defines: a rank in 1-4 that \
        the contest has no slot for is rejected as a validation error. Admin only.",
    request_body = SetWinnerRequest,
    responses(
        (status = 200, description = "Updated submission", body = SubmissionResponse),
        (status = 400, description = "Rank outside 1-4 or not defined by the contest \
            (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Contest or submission not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(
    skip(state, auth_user, payload),
    fields(contest_id = payload.contest_id, submission_id = payload.submission_id, rank = ?payload.rank)
)]
pub async fn set_winner(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<SetWinnerRequest>,
) -> Result<Json<SubmissionResponse>, AppError> {
    let caller = Caller::load(&state.db, auth_user.user_id).await?;
    policy::authorize(&caller, Action::SetWinner)?;
    validate_set_winner(&payload)?;

    let txn = state.db.begin().await?;

    let contest_model = find_contest(&txn, payload.contest_id).await?;
    let target = submission::Entity::find_by_id(payload.submission_id)
        .filter(submission::Column::ContestId.eq(payload.contest_id))
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Submission not found in this contest".into()))?;

    if let Some(rank) = payload.rank {
        let slots = positions_from_json(&contest_model.positions);
        if !slots.iter().any(|s| s.rank == rank) {
            return Err(AppError::Validation(format!(
                "Contest does not define position {rank}"
            )));
        }

        // Displace the current holder (if any) before assigning, so the
        // at-most-one-per-position invariant holds at commit.
        submission::Entity::update_many()
            .filter(submission::Column::ContestId.eq(payload.contest_id))
            .filter(submission::Column::WinnerRank.eq(rank))
            .col_expr(submission::Column::WinnerRank, Expr::value(Option::<i16>::None))
            .col_expr(submission::Column::IsWinner, Expr::value(false))
            .exec(&txn)
            .await?;

        let mut active: submission::ActiveModel = target.into();
        active.winner_rank = Set(Some(rank));
        active.is_winner = Set(true);
        // A concurrent assignment of the same rank trips the partial unique
        // index on (contest_id, winner_rank).
        let model = active.update(&txn).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                AppError::Conflict("Winner position was assigned concurrently".into())
            }
            _ => AppError::from(e),
        })?;
        txn.commit().await?;

        tracing::info!(
            contest_id = payload.contest_id,
            submission_id = model.id,
            rank,
            user_id = caller.user_id,
            "Winner position assigned"
        );

        Ok(Json(model.into()))
    } else {
        let mut active: submission::ActiveModel = target.into();
        active.winner_rank = Set(None);
        active.is_winner = Set(false);
        let model = active.update(&txn).await?;
        txn.commit().await?;

        tracing::info!(
            contest_id = payload.contest_id,
            submission_id = model.id,
            user_id = caller.user_id,
            "Winner position cleared"
        );

        Ok(Json(model.into()))
    }
}

#[utoipa::path(
    post,
    path = "/score",
    tag = "Admin",
    operation_id = "scoreSubmission",
    summary = "Set a jury score on a submission",
    description = "Records an admin jury score (1-10) on a submission. Jury-mode contests \
        rank by this score. Admin only.",
    request_body = ScoreRequest,
    responses(
        (status = 200, description = "Updated submission", body = SubmissionResponse),
        (status = 400, description = "Score out of range (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Submission not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(
    skip(state, auth_user, payload),
    fields(submission_id = payload.submission_id, score = payload.score)
)]
pub async fn score_submission(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<ScoreRequest>,
) -> Result<Json<SubmissionResponse>, AppError> {
    let caller = Caller::load(&state.db, auth_user.user_id).await?;
    policy::authorize(&caller, Action::ScoreSubmission)?;
    validate_score(&payload)?;

    let target = submission::Entity::find_by_id(payload.submission_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Submission not found".into()))?;

    let mut active: submission::ActiveModel = target.into();
    active.admin_score = Set(Some(payload.score));
    let model = active.update(&state.db).await?;

    tracing::info!(
        submission_id = model.id,
        score = payload.score,
        user_id = caller.user_id,
        "Submission scored"
    );

    Ok(Json(model.into()))
}

#[utoipa::path(
    post,
    path = "/users/{id}",
    tag = "Admin",
    operation_id = "setAdminFlag",
    summary = "Grant or revoke a profile's admin flag",
    params(("id" = i32, Path, description = "Profile ID")),
    request_body = SetAdminRequest,
    responses(
        (status = 200, description = "Updated profile", body = MeResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Profile not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id, is_admin = payload.is_admin))]
pub async fn set_admin_flag(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<SetAdminRequest>,
) -> Result<Json<MeResponse>, AppError> {
    let caller = Caller::load(&state.db, auth_user.user_id).await?;
    policy::authorize(&caller, Action::ManageUsers)?;

    let target = profile::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    let mut active: profile::ActiveModel = target.into();
    active.is_admin = Set(payload.is_admin);
    let model = active.update(&state.db).await?;

    tracing::info!(
        target_id = model.id,
        is_admin = model.is_admin,
        user_id = caller.user_id,
        "Admin flag updated"
    );

    Ok(Json(MeResponse {
        id: model.id,
        email: model.email,
        full_name: model.full_name,
        is_admin: model.is_admin,
    }))
}
