//! Error types for statehub.

use thiserror::Error;

/// Main error type for state container operations.
#[derive(Error, Debug)]
pub enum StatehubError {
    /// User with the given id or username was not found.
    #[error("user not found: {0}")]
    UserNotFound(String),

    /// Session with the given ID was not found, or had already expired.
    #[error("session not found: {0}")]
    SessionNotFound(String),

    /// Username is already registered.
    #[error("username already taken: {0}")]
    UsernameTaken(String),

    /// Unknown role name.
    #[error("invalid role: {0}")]
    InvalidRole(String),

    /// Malformed UUID string.
    #[error("invalid id: {0}")]
    InvalidId(String),

    /// Username and password did not match.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Internal lock was poisoned.
    #[error("internal lock poisoned")]
    LockPoisoned,

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience Result type for statehub operations.
pub type Result<T> = std::result::Result<T, StatehubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_not_found_display() {
        let err = StatehubError::UserNotFound("ada".into());
        assert!(err.to_string().contains("ada"));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_session_not_found_display() {
        let err = StatehubError::SessionNotFound("4a3c".into());
        assert!(err.to_string().contains("4a3c"));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_username_taken_display() {
        let err = StatehubError::UsernameTaken("ada".into());
        assert!(err.to_string().contains("already taken"));
    }

    #[test]
    fn test_invalid_role_display() {
        let err = StatehubError::InvalidRole("wizard".into());
        assert!(err.to_string().contains("invalid role"));
        assert!(err.to_string().contains("wizard"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: StatehubError = io_err.into();
        assert!(matches!(err, StatehubError::Io(_)));
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: StatehubError = json_err.into();
        assert!(matches!(err, StatehubError::Json(_)));
    }
}
