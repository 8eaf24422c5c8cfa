use chrono::{DateTime, Utc};

use crate::model::ids::UserId;
use crate::model::principal::Principal;
use crate::model::progress::Progress;
use crate::model::quiz::QuizState;

/// Stored learner record: identity details plus embedded progress and quiz
/// attempt. One per principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    uid: UserId,
    name: String,
    email: String,
    photo: Option<String>,
    joined: Option<DateTime<Utc>>,
    progress: Progress,
    quiz_state: QuizState,
}

impl UserProfile {
    /// Zero-progress profile for a principal seen for the first time.
    #[must_use]
    pub fn for_new_principal(principal: &Principal, joined: DateTime<Utc>) -> Self {
        Self {
            uid: principal.uid.clone(),
            name: principal.profile_name(),
            email: principal.email.clone(),
            photo: principal.photo_url.clone(),
            joined: Some(joined),
            progress: Progress::default(),
            quiz_state: QuizState::default(),
        }
    }

    /// Rebuild from persisted fields. `joined` is optional because older
    /// records may lack it.
    #[must_use]
    pub fn from_persisted(
        uid: UserId,
        name: String,
        email: String,
        photo: Option<String>,
        joined: Option<DateTime<Utc>>,
        progress: Progress,
        quiz_state: QuizState,
    ) -> Self {
        Self {
            uid,
            name,
            email,
            photo,
            joined,
            progress,
            quiz_state,
        }
    }

    #[must_use]
    pub fn uid(&self) -> &UserId {
        &self.uid
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn photo(&self) -> Option<&str> {
        self.photo.as_deref()
    }

    #[must_use]
    pub fn joined(&self) -> Option<DateTime<Utc>> {
        self.joined
    }

    #[must_use]
    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    #[must_use]
    pub fn quiz_state(&self) -> &QuizState {
        &self.quiz_state
    }

    /// Split into the embedded value objects.
    #[must_use]
    pub fn into_parts(self) -> (Progress, QuizState) {
        (self.progress, self.quiz_state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn new_principal_profile_starts_empty() {
        let principal = Principal::new(UserId::new("abc"), "smokey@example.com")
            .with_photo_url("https://example.com/p.png");
        let profile = UserProfile::for_new_principal(&principal, fixed_now());

        assert_eq!(profile.name(), "smokey");
        assert_eq!(profile.photo(), Some("https://example.com/p.png"));
        assert_eq!(profile.joined(), Some(fixed_now()));
        assert_eq!(profile.progress(), &Progress::default());
        assert_eq!(profile.quiz_state(), &QuizState::default());
    }
}
