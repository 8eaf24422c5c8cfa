use std::sync::Arc;

use academy_core::catalog::{CORRECT_ANSWER_XP, PASS_BONUS_XP};
use academy_core::model::{
    AdvanceOutcome, AnswerOutcome, LessonId, Principal, Progress, QuizError, QuizState,
    UserProfile,
};
use academy_core::{Clock, Curriculum};
use storage::document::{DocumentPatch, FIELD_QUIZ_STATE, QuizStateDocument, StudentDocument};
use storage::repository::{StorageError, StudentStore};

use super::view::{Learner, LessonCompletion, SessionSnapshot, View};
use crate::access::AdminPolicy;
use crate::error::SessionError;
use crate::identity::IdentityProvider;
use crate::roster::{RosterEntry, RosterService};

/// Sole owner and mutator of a learner's progress and quiz attempt.
///
/// Every event either applies fully or is rejected with a `SessionError`
/// before touching state. Store writes happen after the in-memory update and
/// a failed write is logged, never rolled back.
pub struct SessionController {
    clock: Clock,
    curriculum: Curriculum,
    students: Arc<dyn StudentStore>,
    identity: Arc<dyn IdentityProvider>,
    admins: AdminPolicy,
    roster: RosterService,
    view: View,
    learner: Option<Learner>,
    progress: Progress,
    quiz: QuizState,
    review_target: Option<LessonId>,
    roster_entries: Vec<RosterEntry>,
}

impl SessionController {
    #[must_use]
    pub fn new(
        clock: Clock,
        curriculum: Curriculum,
        students: Arc<dyn StudentStore>,
        identity: Arc<dyn IdentityProvider>,
        admins: AdminPolicy,
    ) -> Self {
        let roster = RosterService::new(curriculum, Arc::clone(&students));
        Self {
            clock,
            curriculum,
            students,
            identity,
            admins,
            roster,
            view: View::Loading,
            learner: None,
            progress: Progress::default(),
            quiz: QuizState::default(),
            review_target: None,
            roster_entries: Vec::new(),
        }
    }

    #[must_use]
    pub fn view(&self) -> View {
        self.view
    }

    #[must_use]
    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    #[must_use]
    pub fn quiz(&self) -> &QuizState {
        &self.quiz
    }

    #[must_use]
    pub fn learner(&self) -> Option<&Learner> {
        self.learner.as_ref()
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            view: self.view,
            curriculum: self.curriculum,
            learner: self.learner.clone(),
            progress: self.progress.clone(),
            quiz: self.quiz,
            review_target: self.review_target,
            roster: self.roster_entries.clone(),
        }
    }

    /// React to the identity provider reporting a principal (or none).
    ///
    /// Loads or creates the principal's document and routes to the admin
    /// view, the dashboard, or back to login when the load fails.
    pub async fn on_identity_changed(&mut self, principal: Option<Principal>) {
        self.clear();
        let Some(principal) = principal else {
            tracing::info!("identity cleared");
            self.route(View::Login);
            return;
        };

        tracing::info!(uid = %principal.uid, "identity established");
        self.view = View::Loading;
        let is_admin = self.admins.is_admin(&principal);

        let profile = match self.load_or_create(&principal).await {
            Ok(profile) => profile,
            Err(err) => {
                tracing::error!(uid = %principal.uid, error = %err, "failed to load profile");
                self.route(View::Login);
                return;
            }
        };

        self.learner = Some(Learner {
            uid: profile.uid().clone(),
            name: profile.name().to_owned(),
            email: profile.email().to_owned(),
            photo: profile.photo().map(ToOwned::to_owned),
            is_admin,
        });
        let (progress, quiz) = profile.into_parts();
        self.progress = progress;
        self.quiz = quiz;

        if is_admin {
            self.load_roster().await;
            self.route(View::Admin);
        } else {
            self.route(View::Dashboard);
        }
    }

    async fn load_or_create(&self, principal: &Principal) -> Result<UserProfile, StorageError> {
        if let Some(document) = self.students.read(&principal.uid).await? {
            return Ok(document.into_profile(principal.uid.clone(), &self.curriculum));
        }

        let profile = UserProfile::for_new_principal(principal, self.clock.now());
        let patch = DocumentPatch::document(&StudentDocument::from_profile(&profile))?;
        self.students.write(&principal.uid, patch).await?;
        tracing::info!(uid = %principal.uid, "created student profile");
        Ok(profile)
    }

    async fn load_roster(&mut self) {
        match self.roster.list().await {
            Ok(entries) => self.roster_entries = entries,
            Err(err) => {
                tracing::warn!(error = %err, "failed to load roster");
                self.roster_entries.clear();
            }
        }
    }

    /// Finish the lesson on screen.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside the lesson view and
    /// `SessionError::UnknownLesson` for ids not in the curriculum.
    pub async fn complete_lesson(
        &mut self,
        id: LessonId,
        xp: u32,
    ) -> Result<LessonCompletion, SessionError> {
        self.expect_view("complete lesson", &[View::Lesson])?;
        if self.curriculum.lesson(id).is_none() {
            return Err(SessionError::UnknownLesson(id));
        }

        if self.review_target.take().is_some() {
            tracing::debug!(lesson = %id, "review finished");
            self.route(View::Dashboard);
            return Ok(LessonCompletion::Reviewed);
        }

        let outcome = self
            .progress
            .record_completion(id, xp, self.curriculum.lesson_count());
        tracing::debug!(
            lesson = %id,
            newly_completed = outcome.newly_completed,
            xp = self.progress.xp(),
            "lesson completed"
        );
        self.persist_progress().await;

        if outcome.course_complete {
            self.route(View::Dashboard);
        }
        Ok(LessonCompletion::Recorded(outcome))
    }

    /// Open any lesson from the dashboard without affecting progress.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside the dashboard and
    /// `SessionError::UnknownLesson` for ids not in the curriculum.
    pub fn open_lesson_for_review(&mut self, id: LessonId) -> Result<(), SessionError> {
        self.expect_view("review lesson", &[View::Dashboard])?;
        if self.curriculum.lesson(id).is_none() {
            return Err(SessionError::UnknownLesson(id));
        }
        self.review_target = Some(id);
        self.route(View::Lesson);
        Ok(())
    }

    /// Continue where the learner left off: the exam once every lesson is
    /// done, otherwise the lesson at the cursor.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside the dashboard.
    pub fn resume(&mut self) -> Result<View, SessionError> {
        self.expect_view("resume", &[View::Dashboard])?;
        self.review_target = None;
        let next = if self
            .progress
            .is_course_complete(self.curriculum.lesson_count())
        {
            View::Quiz
        } else {
            View::Lesson
        };
        self.route(next);
        Ok(next)
    }

    /// Leave a lesson or the exam without changing progress.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside the lesson and quiz
    /// views.
    pub fn back_to_dashboard(&mut self) -> Result<(), SessionError> {
        self.expect_view("back to dashboard", &[View::Lesson, View::Quiz])?;
        self.review_target = None;
        self.route(View::Dashboard);
        Ok(())
    }

    /// Record an answer for the current exam question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside the quiz view and
    /// `SessionError::Quiz` for out-of-range options or a repeated answer.
    pub async fn answer_question(&mut self, option: usize) -> Result<AnswerOutcome, SessionError> {
        self.expect_view("answer question", &[View::Quiz])?;
        let question = self
            .curriculum
            .question_at(self.quiz.current_question())
            .ok_or(QuizError::NoQuestion)?;

        let outcome = self.quiz.answer(question, option)?;
        tracing::debug!(
            question = %question.id,
            option,
            correct = outcome.correct,
            score = self.quiz.score(),
            "question answered"
        );
        self.persist_quiz().await;

        if outcome.awards_xp {
            self.progress.award_xp(CORRECT_ANSWER_XP);
            self.persist_progress().await;
        }
        Ok(outcome)
    }

    /// Move past the answered question, finishing the exam on the last one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside the quiz view and
    /// `SessionError::Quiz` if the question is unanswered or the exam is
    /// already finished.
    pub async fn advance_quiz(&mut self) -> Result<AdvanceOutcome, SessionError> {
        self.expect_view("advance quiz", &[View::Quiz])?;
        let outcome = self.quiz.advance(self.curriculum.question_count())?;

        match outcome {
            AdvanceOutcome::Next { question_index } => {
                tracing::debug!(question_index, "next question");
                self.persist_quiz().await;
            }
            AdvanceOutcome::Finished { score, passed } => {
                tracing::info!(score, passed, "exam finished");
                if passed && !self.progress.quiz_passed() {
                    self.progress.mark_quiz_passed();
                    self.progress.award_xp(PASS_BONUS_XP);
                    self.persist_progress_and_quiz().await;
                } else {
                    self.persist_quiz().await;
                }
            }
        }
        Ok(outcome)
    }

    /// End the session. The view returns to login even if the provider call
    /// fails.
    pub async fn sign_out(&mut self) {
        if let Err(err) = self.identity.sign_out().await {
            tracing::warn!(error = %err, "sign-out failed");
        }
        self.clear();
        self.route(View::Login);
    }

    fn clear(&mut self) {
        self.learner = None;
        self.progress = Progress::default();
        self.quiz = QuizState::default();
        self.review_target = None;
        self.roster_entries.clear();
    }

    fn route(&mut self, next: View) {
        if self.view != next {
            tracing::info!(from = %self.view, to = %next, "route");
        }
        self.view = next;
    }

    fn expect_view(&self, event: &'static str, allowed: &[View]) -> Result<(), SessionError> {
        if allowed.contains(&self.view) {
            Ok(())
        } else {
            Err(SessionError::InvalidTransition {
                event,
                view: self.view,
            })
        }
    }

    async fn persist_progress(&self) {
        self.persist(DocumentPatch::progress(&self.progress)).await;
    }

    async fn persist_quiz(&self) {
        self.persist(DocumentPatch::quiz_state(&self.quiz)).await;
    }

    async fn persist_progress_and_quiz(&self) {
        let patch = DocumentPatch::progress(&self.progress).and_then(|patch| {
            patch.set(
                FIELD_QUIZ_STATE,
                &QuizStateDocument::from_quiz_state(&self.quiz),
            )
        });
        self.persist(patch).await;
    }

    async fn persist(&self, patch: Result<DocumentPatch, StorageError>) {
        let Some(learner) = self.learner.as_ref() else {
            return;
        };
        let result = match patch {
            Ok(patch) => self.students.write(&learner.uid, patch).await,
            Err(err) => Err(err),
        };
        if let Err(err) = result {
            tracing::warn!(uid = %learner.uid, error = %err, "failed to persist progress");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuthError;
    use crate::identity::{Credentials, IdentitySubscription};
    use academy_core::model::UserId;
    use academy_core::time::fixed_clock;
    use async_trait::async_trait;
    use storage::repository::InMemoryStore;
    use tokio::sync::watch;

    struct SignedOut(watch::Sender<Option<Principal>>);

    #[async_trait]
    impl IdentityProvider for SignedOut {
        async fn sign_in(&self, _: &Credentials) -> Result<Principal, AuthError> {
            Err(AuthError::InvalidCredentials)
        }
        async fn sign_up(&self, _: &Credentials) -> Result<Principal, AuthError> {
            Err(AuthError::InvalidCredentials)
        }
        async fn sign_out(&self) -> Result<(), AuthError> {
            Err(AuthError::Failed("offline".into()))
        }
        fn subscribe(&self) -> IdentitySubscription {
            IdentitySubscription::new(self.0.subscribe())
        }
    }

    fn controller(store: &InMemoryStore) -> SessionController {
        SessionController::new(
            fixed_clock(),
            Curriculum::standard(),
            Arc::new(store.clone()),
            Arc::new(SignedOut(watch::channel(None).0)),
            AdminPolicy::none(),
        )
    }

    fn principal() -> Principal {
        Principal::new(UserId::new("u1"), "berry@example.com")
    }

    #[tokio::test]
    async fn starts_loading_and_rejects_learning_events() {
        let store = InMemoryStore::new();
        let mut session = controller(&store);
        assert_eq!(session.view(), View::Loading);

        let err = session.resume().unwrap_err();
        assert_eq!(
            err,
            SessionError::InvalidTransition {
                event: "resume",
                view: View::Loading
            }
        );
        assert!(session.answer_question(0).await.is_err());
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn unknown_lesson_is_rejected_without_mutation() {
        let store = InMemoryStore::new();
        let mut session = controller(&store);
        session.on_identity_changed(Some(principal())).await;

        assert_eq!(
            session.open_lesson_for_review(LessonId::new(99)),
            Err(SessionError::UnknownLesson(LessonId::new(99)))
        );
        session.resume().unwrap();
        let err = session
            .complete_lesson(LessonId::new(0), 50)
            .await
            .unwrap_err();
        assert_eq!(err, SessionError::UnknownLesson(LessonId::new(0)));
        assert_eq!(session.progress(), &Progress::default());
    }

    #[tokio::test]
    async fn failed_sign_out_still_routes_to_login() {
        let store = InMemoryStore::new();
        let mut session = controller(&store);
        session.on_identity_changed(Some(principal())).await;
        assert_eq!(session.view(), View::Dashboard);

        session.sign_out().await;
        assert_eq!(session.view(), View::Login);
        assert!(session.learner().is_none());
    }

    #[tokio::test]
    async fn back_navigation_clears_review_target() {
        let store = InMemoryStore::new();
        let mut session = controller(&store);
        session.on_identity_changed(Some(principal())).await;

        session.open_lesson_for_review(LessonId::new(3)).unwrap();
        assert_eq!(
            session.snapshot().active_lesson().map(|l| l.id),
            Some(LessonId::new(3))
        );
        session.back_to_dashboard().unwrap();
        assert!(!session.snapshot().is_reviewing());
        assert_eq!(
            session.back_to_dashboard().unwrap_err(),
            SessionError::InvalidTransition {
                event: "back to dashboard",
                view: View::Dashboard,
            }
        );
    }
}
