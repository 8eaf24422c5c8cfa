use services::{AuthError, SessionError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    /// The session refused the action for the screen it is on.
    Rejected,
    /// Sign-in or sign-up failed; carries the inline form message.
    Auth(&'static str),
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::Rejected => "That action is not available right now.",
            ViewError::Auth(message) => message,
            ViewError::Unknown => "Something went wrong. Please try again.",
        }
    }
}

impl From<SessionError> for ViewError {
    fn from(err: SessionError) -> Self {
        tracing::debug!(error = %err, "session rejected intent");
        ViewError::Rejected
    }
}

impl From<AuthError> for ViewError {
    fn from(err: AuthError) -> Self {
        ViewError::Auth(err.user_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use academy_core::model::LessonId;

    #[test]
    fn errors_carry_displayable_messages() {
        let rejected = ViewError::from(SessionError::UnknownLesson(LessonId::new(99)));
        assert_eq!(rejected, ViewError::Rejected);
        assert_eq!(
            ViewError::from(AuthError::WeakPassword).message(),
            "Password too weak."
        );
        assert_eq!(
            ViewError::Unknown.message(),
            "Something went wrong. Please try again."
        );
    }
}
