//! Service error taxonomy and recovery classification.
//!
//! Every game-service round trip fails with a [`ServiceError`], and the
//! store maps each error to a [`RecoveryAction`]: stale state and missing
//! resources are recovered transparently, credential failures drop the
//! player to login, and only rule violations and unclassified failures
//! surface as user-visible errors.

use derive_more::{Display, Error};

/// Categorized failure from the game service.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ServiceError {
    /// The caller's credentials were rejected.
    #[display("unauthorized")]
    Unauthorized,
    /// The referenced game no longer exists server-side.
    #[display("game not found")]
    NotFound,
    /// The submitted version no longer matches server state.
    #[display("version conflict")]
    VersionConflict,
    /// The server rejected the request as violating game rules.
    #[display("rule violation: {_0}")]
    RuleViolation(#[error(not(source))] String),
    /// Anything the client cannot classify.
    #[display("service error: {_0}")]
    Unknown(#[error(not(source))] String),
}

/// Local recovery decided for a classified failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    /// Clear credentials and drop to login.
    ClearSession,
    /// Re-run game-app initialization (overview + session game).
    ReinitializeApp,
    /// Reload the current game from the server.
    ReloadGame,
    /// Show the error to the user; leave state untouched.
    Surface,
}

impl ServiceError {
    /// Maps an HTTP status and server error code onto the taxonomy.
    ///
    /// The server reports domain failures with a short `code` string in the
    /// response body; it is carried through as the displayable message.
    pub fn from_status(status: u16, code: &str) -> Self {
        match status {
            401 => ServiceError::Unauthorized,
            404 => ServiceError::NotFound,
            409 => ServiceError::VersionConflict,
            400 | 422 => ServiceError::RuleViolation(code.to_string()),
            _ => ServiceError::Unknown(code.to_string()),
        }
    }

    /// Classifies this error into the local recovery action.
    pub fn recovery(&self) -> RecoveryAction {
        match self {
            ServiceError::Unauthorized => RecoveryAction::ClearSession,
            ServiceError::NotFound => RecoveryAction::ReinitializeApp,
            ServiceError::VersionConflict => RecoveryAction::ReloadGame,
            ServiceError::RuleViolation(_) | ServiceError::Unknown(_) => RecoveryAction::Surface,
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        ServiceError::Unknown(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_map_onto_the_taxonomy() {
        assert_eq!(ServiceError::from_status(401, ""), ServiceError::Unauthorized);
        assert_eq!(ServiceError::from_status(404, ""), ServiceError::NotFound);
        assert_eq!(
            ServiceError::from_status(409, "stale-game"),
            ServiceError::VersionConflict
        );
        assert_eq!(
            ServiceError::from_status(422, "invalid-move"),
            ServiceError::RuleViolation("invalid-move".to_string())
        );
        assert_eq!(
            ServiceError::from_status(400, "bad-request"),
            ServiceError::RuleViolation("bad-request".to_string())
        );
        assert_eq!(
            ServiceError::from_status(500, "boom"),
            ServiceError::Unknown("boom".to_string())
        );
    }

    #[test]
    fn recovery_policy_matches_the_taxonomy() {
        assert_eq!(
            ServiceError::Unauthorized.recovery(),
            RecoveryAction::ClearSession
        );
        assert_eq!(
            ServiceError::NotFound.recovery(),
            RecoveryAction::ReinitializeApp
        );
        assert_eq!(
            ServiceError::VersionConflict.recovery(),
            RecoveryAction::ReloadGame
        );
        assert_eq!(
            ServiceError::RuleViolation("x".into()).recovery(),
            RecoveryAction::Surface
        );
        assert_eq!(
            ServiceError::Unknown("x".into()).recovery(),
            RecoveryAction::Surface
        );
    }
}
