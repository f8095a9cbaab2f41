use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One row per (submission, fingerprint) pair. The composite primary key is
/// the ledger's natural key: a later vote from the same pair overwrites
/// `voted_at` instead of inserting a duplicate, and the key constraint is
/// what turns a racing duplicate insert into a rate-limit rejection.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vote")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub submission_id: i32,
    /// Client-supplied pseudo-identity. Callers without a fingerprint share
    /// the "anonymous" bucket.
    #[sea_orm(primary_key)]
    pub fingerprint: String,

    #[sea_orm(belongs_to, from = "submission_id", to = "id")]
    pub submission: HasOne<super::submission::Entity>,

    pub voted_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
