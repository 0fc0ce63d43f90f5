//! Errors surfaced by the entitlement and loyalty handlers.
//!
//! # Retry semantics
//!
//! | Error | Retryable |
//! |-------|-----------|
//! | InvalidInput | no |
//! | ProfileNotFound / BonusAccountNotFound | no |
//! | AchievementNotFound | no |
//! | InvalidState | no |
//! | Infrastructure | yes |

use thiserror::Error;

use crate::domain::foundation::{AchievementId, DomainError, ErrorCode, UserId, ValidationError};

#[derive(Debug, Clone, Error)]
pub enum LoyaltyError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    #[error("No profile found for user {0}")]
    ProfileNotFound(UserId),

    #[error("No bonus account found for user {0}")]
    BonusAccountNotFound(UserId),

    #[error("Achievement {0} is not in the catalog")]
    AchievementNotFound(AchievementId),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Infrastructure error: {0}")]
    Infrastructure(DomainError),
}

impl LoyaltyError {
    pub fn infrastructure(message: impl Into<String>) -> Self {
        LoyaltyError::Infrastructure(DomainError::new(ErrorCode::InternalError, message))
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            LoyaltyError::InvalidInput(_) => ErrorCode::ValidationFailed,
            LoyaltyError::ProfileNotFound(_) => ErrorCode::ProfileNotFound,
            LoyaltyError::BonusAccountNotFound(_) => ErrorCode::BonusAccountNotFound,
            LoyaltyError::AchievementNotFound(_) => ErrorCode::AchievementNotFound,
            LoyaltyError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            LoyaltyError::Infrastructure(e) => e.code,
        }
    }

    /// Returns true if this error should trigger a retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, LoyaltyError::Infrastructure(_))
    }
}

impl From<DomainError> for LoyaltyError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => LoyaltyError::InvalidInput(
                ValidationError::invalid_format(
                    err.details.get("field").cloned().unwrap_or_default(),
                    err.message,
                ),
            ),
            _ => LoyaltyError::Infrastructure(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infrastructure_errors_are_retryable() {
        let err: LoyaltyError = DomainError::database("connection reset").into();
        assert!(err.is_retryable());
        assert_eq!(err.code(), ErrorCode::DatabaseError);
    }

    #[test]
    fn validation_domain_errors_become_invalid_input() {
        let err: LoyaltyError = DomainError::validation("lifetime_spend", "negative").into();
        assert!(matches!(err, LoyaltyError::InvalidInput(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn not_found_errors_carry_codes() {
        let user = UserId::new("u1").unwrap();
        assert_eq!(
            LoyaltyError::ProfileNotFound(user.clone()).code(),
            ErrorCode::ProfileNotFound
        );
        assert_eq!(
            LoyaltyError::BonusAccountNotFound(user).code(),
            ErrorCode::BonusAccountNotFound
        );
    }

    #[test]
    fn messages_name_the_user() {
        let err = LoyaltyError::ProfileNotFound(UserId::new("user-9").unwrap());
        assert_eq!(err.to_string(), "No profile found for user user-9");
    }
}
