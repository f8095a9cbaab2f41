use std::cmp;

use axum::Json;
use axum::extract::State;
use sea_orm::prelude::Expr;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{submission, vote};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::fingerprint::Fingerprint;
use crate::extractors::json::AppJson;
use crate::models::vote::{VoteRequest, VoteResponse};
use crate::policy::{self, Action, Caller};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Votes",
    operation_id = "castVote",
    summary = "Cast a vote for a submission",
    description = "Increments the submission's vote counter. Each (submission, fingerprint) \
        pair may vote at most once per rolling window (24 hours by default); within the window \
        the vote is rejected with 429 and a Retry-After header. The fingerprint comes from the \
        `X-User-Fingerprint` header; requests without one share the \"anonymous\" bucket.",
    request_body = VoteRequest,
    responses(
        (status = 200, description = "Vote recorded", body = VoteResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Submission not found (NOT_FOUND)", body = ErrorBody),
        (status = 429, description = "Already voted within the window (RATE_LIMITED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, fingerprint, payload), fields(submission_id = payload.submission_id, fingerprint = %fingerprint.0))]
pub async fn cast_vote(
    auth_user: AuthUser,
    fingerprint: Fingerprint,
    State(state): State<AppState>,
    AppJson(payload): AppJson<VoteRequest>,
) -> Result<Json<VoteResponse>, AppError> {
    let caller = Caller::load(&state.db, auth_user.user_id).await?;
    policy::authorize(&caller, Action::Vote)?;

    let now = chrono::Utc::now();
    let window = chrono::Duration::hours(state.config.vote.window_hours);

    let txn = state.db.begin().await?;

    let target = submission::Entity::find_by_id(payload.submission_id)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Submission not found".into()))?;

    // Ledger first: the write must succeed before the counter moves, so a
    // lost race rolls back without over-counting.
    let previous = vote::Entity::find_by_id((target.id, fingerprint.0.clone()))
        .one(&txn)
        .await?;

    match previous {
        Some(prev) => {
            let expires = prev.voted_at + window;
            if now < expires {
                return Err(AppError::RateLimited {
                    retry_after: retry_after_seconds(expires, now),
                });
            }
            // Re-vote: the update is guarded on the voted_at we read, so two
            // racing re-votes cannot both pass.
            let result = vote::Entity::update_many()
                .filter(vote::Column::SubmissionId.eq(target.id))
                .filter(vote::Column::Fingerprint.eq(&fingerprint.0))
                .filter(vote::Column::VotedAt.eq(prev.voted_at))
                .col_expr(vote::Column::VotedAt, Expr::value(now))
                .exec(&txn)
                .await?;
            if result.rows_affected == 0 {
                // A concurrent re-vote won. Roll back and report the time
                // left on the winner's window, read from the fresh row.
                txn.rollback().await?;
                return Err(AppError::RateLimited {
                    retry_after: remaining_window(&state.db, target.id, &fingerprint.0, window, now)
                        .await,
                });
            }
        }
        None => {
            let new_vote = vote::ActiveModel {
                submission_id: Set(target.id),
                fingerprint: Set(fingerprint.0.clone()),
                voted_at: Set(now),
            };
            // A racing first vote from the same pair trips the composite
            // primary key; treat the loser as rate-limited.
            match new_vote.insert(&txn).await {
                Ok(_) => {}
                Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                    txn.rollback().await?;
                    return Err(AppError::RateLimited {
                        retry_after: remaining_window(
                            &state.db,
                            target.id,
                            &fingerprint.0,
                            window,
                            now,
                        )
                        .await,
                    });
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    submission::Entity::update_many()
        .filter(submission::Column::Id.eq(target.id))
        .col_expr(
            submission::Column::Votes,
            Expr::col(submission::Column::Votes).add(1),
        )
        .exec(&txn)
        .await?;

    txn.commit().await?;

    tracing::info!(submission_id = target.id, "Vote recorded");

    Ok(Json(VoteResponse { accepted: true }))
}

/// Seconds left on the window opened by the vote that beat this one. The
/// race loser's transaction is already rolled back, so the ledger row is
/// re-read outside it; if the row is gone, fall back to the full window.
async fn remaining_window(
    db: &DatabaseConnection,
    submission_id: i32,
    fingerprint: &str,
    window: chrono::Duration,
    now: chrono::DateTime<chrono::Utc>,
) -> u64 {
    let fresh = vote::Entity::find_by_id((submission_id, fingerprint.to_owned()))
        .one(db)
        .await
        .ok()
        .flatten();
    match fresh {
        Some(row) => retry_after_seconds(row.voted_at + window, now),
        None => cmp::max(window.num_seconds(), 1) as u64,
    }
}

/// Seconds until the window expires, never less than 1 so the Retry-After
/// header stays meaningful right at the boundary.
fn retry_after_seconds(
    expires: chrono::DateTime<chrono::Utc>,
    now: chrono::DateTime<chrono::Utc>,
) -> u64 {
    cmp::max((expires - now).num_seconds(), 1) as u64
}
