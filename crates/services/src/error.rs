//! Shared error types for the services crate.

use thiserror::Error;

use academy_core::model::{LessonId, QuizError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

use crate::session::View;

/// Errors emitted by identity providers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("email already registered")]
    EmailAlreadyRegistered,
    #[error("password too weak")]
    WeakPassword,
    #[error("authentication failed: {0}")]
    Failed(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl AuthError {
    /// Inline copy shown under the sign-in form.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "Invalid email or password.",
            AuthError::EmailAlreadyRegistered => "Email already used.",
            AuthError::WeakPassword => "Password too weak.",
            AuthError::Failed(_) | AuthError::Storage(_) => "Login failed. Try again.",
        }
    }
}

/// Controller events rejected before any state changed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("{event} is not accepted on the {view} view")]
    InvalidTransition { event: &'static str, view: View },
    #[error("unknown lesson {0}")]
    UnknownLesson(LessonId),
    #[error(transparent)]
    Quiz(#[from] QuizError),
}

/// Errors emitted by `RosterService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RosterError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_failures_read_as_generic_login_failure() {
        let err = AuthError::from(StorageError::Connection("closed".into()));
        assert_eq!(err.user_message(), "Login failed. Try again.");
        assert_eq!(
            AuthError::EmailAlreadyRegistered.user_message(),
            "Email already used."
        );
    }
}
