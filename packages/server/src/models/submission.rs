use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::shared::{validate_text_block, validate_title};
use crate::error::AppError;

/// Request body for creating a submission. The entry is either an uploaded
/// file (referenced by `file_path`, named by `filename`) or an external
/// `link`; never both, never neither. File storage itself is handled by the
/// upload collaborator, this service only records the reference.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateSubmissionRequest {
    pub name: String,
    pub note: Option<String>,
    pub filename: Option<String>,
    pub file_path: Option<String>,
    pub link: Option<String>,
}

pub fn validate_create_submission(req: &CreateSubmissionRequest) -> Result<(), AppError> {
    validate_title(&req.name)?;
    if let Some(ref note) = req.note {
        validate_text_block(note, "Note")?;
    }
    match (&req.file_path, &req.link) {
        (Some(_), Some(_)) => Err(AppError::Validation(
            "Provide either a file or a link, not both".into(),
        )),
        (None, None) => Err(AppError::Validation(
            "Either a file or a link is required".into(),
        )),
        (Some(path), None) => {
            if path.trim().is_empty() {
                return Err(AppError::Validation("file_path must not be empty".into()));
            }
            match req.filename {
                Some(ref f) if !f.trim().is_empty() => Ok(()),
                _ => Err(AppError::Validation(
                    "filename is required for file submissions".into(),
                )),
            }
        }
        (None, Some(link)) => {
            if link.trim().is_empty() {
                return Err(AppError::Validation("link must not be empty".into()));
            }
            Ok(())
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct SubmissionResponse {
    pub id: i32,
    pub contest_id: i32,
    pub name: String,
    pub note: Option<String>,
    pub filename: Option<String>,
    pub file_path: Option<String>,
    pub link: Option<String>,
    pub votes: i64,
    pub admin_score: Option<i32>,
    pub is_winner: bool,
    pub winner_rank: Option<i16>,
    pub created_at: DateTime<Utc>,
}

impl From<crate::entity::submission::Model> for SubmissionResponse {
    fn from(m: crate::entity::submission::Model) -> Self {
        Self {
            id: m.id,
            contest_id: m.contest_id,
            name: m.name,
            note: m.note,
            filename: m.filename,
            file_path: m.file_path,
            link: m.link,
            votes: m.votes,
            admin_score: m.admin_score,
            is_winner: m.is_winner,
            winner_rank: m.winner_rank,
            created_at: m.created_at,
        }
    }
}
