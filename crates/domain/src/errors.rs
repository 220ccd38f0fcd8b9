//! Domain Errors - Business rule violations
//!
//! Contains ONLY business logic errors, no infrastructure errors

use thiserror::Error;

/// Domain-specific errors representing business rule violations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Business validation: unknown task status
    #[error("Unknown task status: {0}")]
    UnknownTaskStatus(String),

    /// Business validation: unknown appointment status
    #[error("Unknown appointment status: {0}")]
    UnknownAppointmentStatus(String),

    /// Business validation: unknown chat role
    #[error("Unknown chat role: {0}")]
    UnknownChatRole(String),

    /// Business validation: identifier cannot be empty
    #[error("Identifier cannot be empty")]
    EmptyIdentifier,
}

impl DomainError {
    /// Check if error is caused by a value outside a closed set of variants
    pub fn is_enum_membership_error(&self) -> bool {
        matches!(
            self,
            DomainError::UnknownTaskStatus(_)
                | DomainError::UnknownAppointmentStatus(_)
                | DomainError::UnknownChatRole(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categorization() {
        assert!(DomainError::UnknownTaskStatus("done".into()).is_enum_membership_error());
        assert!(!DomainError::EmptyIdentifier.is_enum_membership_error());
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::UnknownAppointmentStatus("pending".to_string());
        assert_eq!(err.to_string(), "Unknown appointment status: pending");
    }
}
