use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "submission")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub contest_id: i32,
    #[sea_orm(belongs_to, from = "contest_id", to = "id")]
    pub contest: HasOne<super::contest::Entity>,

    pub name: String,
    pub note: Option<String>,

    /// Exactly one of `file_path`/`link` is set. `filename` accompanies
    /// `file_path` and is the user-facing name of the uploaded blob.
    pub filename: Option<String>,
    pub file_path: Option<String>,
    pub link: Option<String>,

    /// Authoritative vote tally. Mutated only by the vote ledger, via an
    /// atomic SQL increment, never recomputed from the `vote` table.
    pub votes: i64,

    /// Jury score (1-10), set by admins; NULL until scored.
    pub admin_score: Option<i32>,

    pub is_winner: bool,
    /// Winner position (1-4); at most one submission per contest holds a
    /// given rank at any time.
    pub winner_rank: Option<i16>,

    #[sea_orm(has_many)]
    pub vote_records: HasMany<super::vote::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
