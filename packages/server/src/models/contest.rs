use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::shared::{validate_text_block, validate_title};
use super::submission::SubmissionResponse;
use crate::entity::contest::{ContestStatus, PositionSlot};
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateContestRequest {
    pub title: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: ContestStatus,
    #[serde(default)]
    pub jury_mode: bool,
    /// Winner position slots. Ranks 1 and 2 are required, 3 and 4 optional.
    pub positions: Vec<PositionSlot>,
}

#[derive(Deserialize, Default, utoipa::ToSchema)]
pub struct UpdateContestRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub status: Option<ContestStatus>,
    pub jury_mode: Option<bool>,
    pub positions: Option<Vec<PositionSlot>>,
}

// ---------------------------------------------------------------------------
// Response DTOs
// ---------------------------------------------------------------------------

#[derive(Serialize, utoipa::ToSchema)]
pub struct ContestResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: ContestStatus,
    pub jury_mode: bool,
    pub positions: Vec<PositionSlot>,
    pub created_at: DateTime<Utc>,
}

/// Contest detail page payload: the contest plus its submissions in display
/// order and its winners ordered by rank.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ContestDetailResponse {
    pub contest: ContestResponse,
    pub submissions: Vec<SubmissionResponse>,
    pub winners: Vec<SubmissionResponse>,
}

impl From<crate::entity::contest::Model> for ContestResponse {
    fn from(m: crate::entity::contest::Model) -> Self {
        let positions = positions_from_json(&m.positions);
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            start_date: m.start_date,
            end_date: m.end_date,
            status: m.status,
            jury_mode: m.jury_mode,
            positions,
            created_at: m.created_at,
        }
    }
}

/// Convert position slots to the JSON value stored on the contest row.
pub fn positions_to_json(positions: &[PositionSlot]) -> serde_json::Value {
    serde_json::to_value(positions).unwrap_or(serde_json::Value::Array(vec![]))
}

/// Parse position slots back out of the stored JSON value.
pub fn positions_from_json(value: &serde_json::Value) -> Vec<PositionSlot> {
    serde_json::from_value(value.clone()).unwrap_or_default()
}

pub fn validate_create_contest(req: &CreateContestRequest) -> Result<(), AppError> {
    validate_title(&req.title)?;
    if req.description.trim().is_empty() {
        return Err(AppError::Validation("Description must not be empty".into()));
    }
    validate_text_block(&req.description, "Description")?;
    validate_dates(req.start_date, req.end_date)?;
    validate_positions(&req.positions)
}

pub fn validate_update_contest(req: &UpdateContestRequest) -> Result<(), AppError> {
    if let Some(ref title) = req.title {
        validate_title(title)?;
    }
    if let Some(ref description) = req.description {
        if description.trim().is_empty() {
            return Err(AppError::Validation("Description must not be empty".into()));
        }
        validate_text_block(description, "Description")?;
    }
    if let (Some(start), Some(end)) = (req.start_date, req.end_date) {
        validate_dates(start, end)?;
    }
    if let Some(ref positions) = req.positions {
        validate_positions(positions)?;
    }
    Ok(())
}

pub fn validate_dates(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), AppError> {
    if end < start {
        return Err(AppError::Validation(
            "end_date must not be before start_date".into(),
        ));
    }
    Ok(())
}

/// Position slots must name ranks 1 and 2, may add 3 and 4, and may not
/// repeat a rank or leave a name blank.
pub fn validate_positions(positions: &[PositionSlot]) -> Result<(), AppError> {
    let mut seen = [false; 4];
    for slot in positions {
        if !(1..=4).contains(&slot.rank) {
            return Err(AppError::Validation(
                "Position rank must be between 1 and 4".into(),
            ));
        }
        let idx = (slot.rank - 1) as usize;
        if seen[idx] {
            return Err(AppError::Validation(format!(
                "Duplicate position rank {}",
                slot.rank
            )));
        }
        seen[idx] = true;
        if slot.name.trim().is_empty() || slot.name.chars().count() > 64 {
            return Err(AppError::Validation(
                "Position name must be 1-64 characters".into(),
            ));
        }
    }
    if !seen[0] || !seen[1] {
        return Err(AppError::Validation(
            "Positions 1 and 2 are required".into(),
        ));
    }
    Ok(())
}
