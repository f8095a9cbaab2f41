use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a contest. Set explicitly by admins rather than
/// derived from the dates, so a contest can be closed early or held open.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    utoipa::ToSchema,
    sea_orm::DeriveActiveEnum,
    sea_orm::EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum ContestStatus {
    #[sea_orm(string_value = "upcoming")]
    Upcoming,
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "completed")]
    Completed,
}

/// A named winner position within a contest.
/// Stored as a JSON array on the contest row; ranks 1 and 2 are always
/// present, ranks 3 and 4 are optional.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PositionSlot {
    /// Winner rank this slot names (1-4).
    pub rank: i16,
    /// Display name (e.g. "Gold", "Audience favourite").
    pub name: String,
    /// Optional image URL shown next to the position.
    pub image: Option<String>,
}

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contest")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,
    pub description: String, // in Markdown
    pub start_date: DateTimeUtc,
    pub end_date: DateTimeUtc,
    pub status: ContestStatus,

    /// When true, ranking is dominated by admin scores instead of votes.
    pub jury_mode: bool,

    /// Winner position slots stored as a JSON array of {rank, name, image}.
    #[sea_orm(column_type = "JsonBinary")]
    pub positions: serde_json::Value,

    #[sea_orm(has_many)]
    pub submissions: HasMany<super::submission::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
