use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::submission;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::handlers::contest::find_contest;
use crate::models::submission::{
    CreateSubmissionRequest, SubmissionResponse, validate_create_submission,
};
use crate::policy::{self, Action, Caller};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/{id}/submissions",
    tag = "Submissions",
    operation_id = "createSubmission",
    summary = "Submit an entry to a contest",
    description = "Creates a submission in a contest. The entry carries either an uploaded \
        file reference or an external link. Rejected once the contest is completed.",
    params(("id" = i32, Path, description = "Contest ID")),
    request_body = CreateSubmissionRequest,
    responses(
        (status = 201, description = "Submission created", body = SubmissionResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Contest no longer accepts submissions (CONTEST_CLOSED)", body = ErrorBody),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(contest_id, name = %payload.name))]
pub async fn create_submission(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(contest_id): Path<i32>,
    AppJson(payload): AppJson<CreateSubmissionRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_submission(&payload)?;

    let caller = Caller::load(&state.db, auth_user.user_id).await?;
    let contest_model = find_contest(&state.db, contest_id).await?;
    policy::authorize(
        &caller,
        Action::Submit {
            contest_status: contest_model.status,
        },
    )?;

    let new_submission = submission::ActiveModel {
        contest_id: Set(contest_id),
        name: Set(payload.name.trim().to_string()),
        note: Set(payload.note),
        filename: Set(payload.filename),
        file_path: Set(payload.file_path),
        link: Set(payload.link),
        votes: Set(0),
        admin_score: Set(None),
        is_winner: Set(false),
        winner_rank: Set(None),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let model = new_submission.insert(&state.db).await?;

    tracing::info!(
        contest_id,
        submission_id = model.id,
        user_id = caller.user_id,
        "Submission created"
    );

    Ok((StatusCode::CREATED, Json(SubmissionResponse::from(model))))
}
