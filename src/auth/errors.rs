//! # Auth Errors
//!
//! Error types for session token handling.

use thiserror::Error;

/// Result type for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Session token errors
///
/// None of these reach the viewer as an error page: the oracle reports the
/// request as signed out and the guards redirect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    // ==================
    // Token Errors
    // ==================
    /// No token on the request
    #[error("Missing session token")]
    MissingToken,

    /// JWT token is malformed
    #[error("Malformed token")]
    MalformedToken,

    /// JWT token has expired
    #[error("Token expired")]
    TokenExpired,

    /// JWT signature is invalid
    #[error("Invalid token signature")]
    InvalidSignature,

    /// Token was logged out
    #[error("Session has been revoked")]
    SessionRevoked,

    // ==================
    // Internal Errors
    // ==================
    /// Token generation failed
    #[error("Internal error: token generation failed")]
    TokenGenerationFailed,
}

impl AuthError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::MalformedToken => 400,

            AuthError::MissingToken => 401,
            AuthError::TokenExpired => 401,
            AuthError::InvalidSignature => 401,
            AuthError::SessionRevoked => 401,

            AuthError::TokenGenerationFailed => 500,
        }
    }

    /// Returns whether this error should be logged at debug rather than error
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(AuthError::MalformedToken.status_code(), 400);
        assert_eq!(AuthError::TokenExpired.status_code(), 401);
        assert_eq!(AuthError::SessionRevoked.status_code(), 401);
        assert_eq!(AuthError::TokenGenerationFailed.status_code(), 500);
    }

    #[test]
    fn test_client_errors() {
        assert!(AuthError::MissingToken.is_client_error());
        assert!(!AuthError::TokenGenerationFailed.is_client_error());
    }
}
