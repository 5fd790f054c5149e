//! # Error Types
//!
//! Domain-specific error types for till-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  till-core errors (this file)                                          │
//! │  ├── AuthError        - login / register / profile failures            │
//! │  ├── AdminError       - guards around the admin user screen            │
//! │  └── ValidationError  - form input failures                            │
//! │                                                                         │
//! │  till-persist errors (separate crate)                                  │
//! │  └── PersistError     - snapshot I/O and config failures               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Two Failure Styles
//! Operations that fail because of what the user typed (login, register,
//! password change) return one of these errors; the `Display` text is the
//! message shown to the user. Operations whose preconditions are the
//! caller's responsibility (checkout on an empty cart, editing an unknown id)
//! never error: they do nothing.

use thiserror::Error;

// =============================================================================
// Auth Error
// =============================================================================

/// Failures of the session and self-service account operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email/password pair did not match any account.
    ///
    /// Deliberately does not say which of the two was wrong.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Registration with an email that already belongs to an account.
    #[error("User with email {email} already exists")]
    EmailTaken { email: String },

    /// A self-service operation was called with nobody signed in.
    #[error("You must be signed in")]
    NotSignedIn,

    /// The current password given to a password change was wrong.
    #[error("Current password is incorrect")]
    IncorrectPassword,

    /// New password and its confirmation differ.
    #[error("Passwords don't match")]
    PasswordMismatch,

    /// Input validation error (wraps ValidationError).
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Admin Error
// =============================================================================

/// Rules the admin user screen applies before calling the unguarded
/// `update_user` / `delete_user` operations.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error("You cannot delete your own account")]
    CannotDeleteSelf,

    /// An admin tried to change their own role to cashier.
    #[error("You cannot remove your own admin role")]
    CannotDemoteSelf,

    #[error("User not found: {0}")]
    UserNotFound(String),

    /// The edit form itself was invalid.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when form input doesn't meet requirements.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Value must be positive.
    #[error("{field} must be greater than zero")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} cannot be negative")]
    Negative { field: String },

    /// Invalid format (e.g. a price with three decimals).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    pub(crate) fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result of a session or self-service account operation.
pub type AuthResult<T> = Result<T, AuthError>;

/// Result of an admin guard check.
pub type AdminResult<T> = Result<T, AdminError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "Invalid email or password"
        );

        let err = AuthError::EmailTaken {
            email: "a@b.c".to_string(),
        };
        assert_eq!(err.to_string(), "User with email a@b.c already exists");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::required("Name");
        assert_eq!(err.to_string(), "Name is required");

        let err = ValidationError::TooShort {
            field: "New password".to_string(),
            min: 6,
        };
        assert_eq!(err.to_string(), "New password must be at least 6 characters");
    }

    #[test]
    fn test_validation_converts_to_auth_error() {
        let err: AuthError = ValidationError::required("Email").into();
        assert!(matches!(err, AuthError::Validation(_)));
        // transparent: the user sees the inner message
        assert_eq!(err.to_string(), "Email is required");
    }
}
