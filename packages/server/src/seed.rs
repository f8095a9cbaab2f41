use sea_orm::*;
use tracing::info;

use crate::config::AppConfig;
use crate::entity::profile;
use crate::utils::hash;

/// Seed the bootstrap admin account when configured.
///
/// Runs on every startup; an existing profile with the configured email is
/// left untouched, so rotating the configured password does not overwrite a
/// live account.
pub async fn seed_admin(db: &DatabaseConnection, config: &AppConfig) -> Result<(), DbErr> {
    let (Some(email), Some(password)) = (
        config.auth.admin_email.as_deref(),
        config.auth.admin_password.as_deref(),
    ) else {
        return Ok(());
    };

    let password_hash = hash::hash_password(password)
        .map_err(|e| DbErr::Custom(format!("Admin password hash error: {e}")))?;

    let model = profile::ActiveModel {
        email: Set(email.trim().to_lowercase()),
        password: Set(password_hash),
        full_name: Set(None),
        is_admin: Set(true),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let result = profile::Entity::insert(model)
        .on_conflict(
            sea_orm::sea_query::OnConflict::column(profile::Column::Email)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await;

    match result {
        Ok(_) => {
            info!(email, "Seeded bootstrap admin account");
            Ok(())
        }
        Err(DbErr::RecordNotInserted) => Ok(()),
        Err(e) => Err(e),
    }
}

/// Ensure required database indexes exist.
///
/// Schema-sync doesn't cover partial unique indexes, so the winner-rank
/// exclusivity guard is created manually on startup. Two racing winner
/// assignments for the same rank resolve here: the loser hits the index and
/// surfaces as a conflict instead of leaving both submissions assigned.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    db.execute_unprepared(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_submission_contest_winner_rank \
         ON submission (contest_id, winner_rank) WHERE winner_rank IS NOT NULL",
    )
    .await?;
    info!("Ensured index idx_submission_contest_winner_rank exists");
    Ok(())
}
