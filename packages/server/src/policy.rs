use sea_orm::ConnectionTrait;
use sea_orm::EntityTrait;

use crate::entity::contest::ContestStatus;
use crate::entity::profile;
use crate::error::AppError;

/// The operations gated by the contest access policy.
///
/// Submitting is the only action gated by contest lifecycle; everything else
/// depends solely on caller privilege. Unauthenticated callers are rejected
/// upstream by the `AuthUser` extractor (401), so by the time `authorize`
/// runs the caller always has a known identity.
#[derive(Clone, Copy, Debug)]
pub enum Action {
    Submit { contest_status: ContestStatus },
    Vote,
    SetWinner,
    ScoreSubmission,
    ManageContests,
    ManageUsers,
}

/// Caller identity and privilege, loaded from the stored profile rather than
/// token claims so admin revocation takes effect immediately.
#[derive(Clone, Copy, Debug)]
pub struct Caller {
    pub user_id: i32,
    pub is_admin: bool,
}

impl Caller {
    /// Load the caller's profile. A valid token whose profile row has since
    /// disappeared is treated as an invalid credential.
    pub async fn load<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<Self, AppError> {
        let prof = profile::Entity::find_by_id(user_id)
            .one(db)
            .await?
            .ok_or(AppError::TokenInvalid)?;
        Ok(Caller {
            user_id: prof.id,
            is_admin: prof.is_admin,
        })
    }
}

/// Gate an action for a caller. Returns `Ok(())` or the denial to surface.
pub fn authorize(caller: &Caller, action: Action) -> Result<(), AppError> {
    match action {
        Action::Submit { contest_status } => {
            if contest_status == ContestStatus::Completed {
                Err(AppError::ContestClosed)
            } else {
                Ok(())
            }
        }
        // Voting requires a session but no privilege; the fingerprint only
        // decides which rate-limit bucket the vote lands in.
        Action::Vote => Ok(()),
        Action::SetWinner | Action::ScoreSubmission | Action::ManageContests
        | Action::ManageUsers => {
            if caller.is_admin {
                Ok(())
            } else {
                Err(AppError::PermissionDenied)
            }
        }
    }
}
