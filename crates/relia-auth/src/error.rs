//! Authentication error types.
//!
//! Messages are fixed and deliberately non-leaking: a missing session
//! and an inactive user both surface as "Invalid token", so a caller
//! cannot probe for account existence. Expiry stays distinguishable —
//! it also carries the session-deletion side effect.

use relia_core::error::ReliaError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("No sent token")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid user name or password")]
    InvalidCredentials,

    #[error("No permissions for module")]
    ModuleDenied,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Transport-level classification of an [`AuthError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 401-equivalent.
    Unauthenticated,
    /// 403-equivalent.
    Forbidden,
    /// 500-equivalent.
    Internal,
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::MissingToken
            | AuthError::InvalidToken
            | AuthError::TokenExpired
            | AuthError::InvalidCredentials => ErrorKind::Unauthenticated,
            AuthError::ModuleDenied => ErrorKind::Forbidden,
            AuthError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Store failures propagate as internal errors — no retry happens
    /// inside this crate.
    pub(crate) fn store(err: ReliaError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<AuthError> for ReliaError {
    fn from(err: AuthError) -> Self {
        match err.kind() {
            ErrorKind::Unauthenticated => ReliaError::Unauthenticated {
                reason: err.to_string(),
            },
            ErrorKind::Forbidden => ReliaError::Forbidden {
                reason: err.to_string(),
            },
            ErrorKind::Internal => ReliaError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_the_taxonomy() {
        assert_eq!(AuthError::MissingToken.kind(), ErrorKind::Unauthenticated);
        assert_eq!(AuthError::InvalidToken.kind(), ErrorKind::Unauthenticated);
        assert_eq!(AuthError::TokenExpired.kind(), ErrorKind::Unauthenticated);
        assert_eq!(AuthError::ModuleDenied.kind(), ErrorKind::Forbidden);
        assert_eq!(AuthError::Internal("x".into()).kind(), ErrorKind::Internal);
    }

    #[test]
    fn conversion_keeps_the_fixed_messages() {
        let err: ReliaError = AuthError::InvalidToken.into();
        match err {
            ReliaError::Unauthenticated { reason } => assert_eq!(reason, "Invalid token"),
            other => panic!("expected Unauthenticated, got {other:?}"),
        }

        let err: ReliaError = AuthError::ModuleDenied.into();
        assert!(matches!(err, ReliaError::Forbidden { .. }));
    }
}
