//! Authentication types for the domain layer.
//!
//! These types represent the principal resolved from a bearer token. They
//! carry no provider dependencies; any `SessionValidator` adapter can
//! populate them.

use super::UserId;
use thiserror::Error;

/// Authenticated principal acting on a class room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The unique user identifier (token subject).
    pub id: UserId,

    /// Login name if the token carries one.
    pub username: Option<String>,

    /// Email address if the token carries one.
    pub email: Option<String>,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(id: UserId, username: Option<String>, email: Option<String>) -> Self {
        Self {
            id,
            username,
            email,
        }
    }

    /// Creates a user known only by its identifier.
    pub fn anonymous_profile(id: UserId) -> Self {
        Self::new(id, None, None)
    }

    /// Returns the username, falling back to the identifier.
    pub fn username_or_id(&self) -> &str {
        self.username.as_deref().unwrap_or(self.id.as_str())
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired.
    #[error("Token expired")]
    TokenExpired,

    /// The validator could not be reached or is misconfigured.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ServiceUnavailable(_))
    }
}
