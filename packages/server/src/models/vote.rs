use serde::{Deserialize, Serialize};

/// Request body for casting a vote. The voter identity comes from the
/// `X-User-Fingerprint` header, not the body. The wire key is `submissionId`:
/// action endpoints take camelCase bodies while resource payloads mirror the
/// snake_case storage columns.
#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub submission_id: i32,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct VoteResponse {
    /// Always true on the success path; rejections use the error body.
    pub accepted: bool,
}
