use serde::Deserialize;

use crate::error::AppError;

/// Request body for assigning or clearing a winner position. Wire keys are
/// camelCase (`contestId`, `submissionId`, `rank`) like the other action
/// endpoints.
#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetWinnerRequest {
    pub contest_id: i32,
    pub submission_id: i32,
    /// Position to assign (1-4), or null/absent to clear the submission's
    /// current position.
    pub rank: Option<i16>,
}

pub fn validate_set_winner(req: &SetWinnerRequest) -> Result<(), AppError> {
    if let Some(rank) = req.rank
        && !(1..=4).contains(&rank)
    {
        return Err(AppError::Validation(
            "rank must be between 1 and 4, or null to clear".into(),
        ));
    }
    Ok(())
}

/// Request body for jury-scoring a submission. Wire keys are camelCase
/// (`submissionId`, `score`).
#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRequest {
    pub submission_id: i32,
    /// Jury score, 1-10 inclusive.
    pub score: i32,
}

pub fn validate_score(req: &ScoreRequest) -> Result<(), AppError> {
    if !(1..=10).contains(&req.score) {
        return Err(AppError::Validation(
            "score must be between 1 and 10".into(),
        ));
    }
    Ok(())
}

/// Request body for toggling a profile's admin flag.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct SetAdminRequest {
    pub is_admin: bool,
}
