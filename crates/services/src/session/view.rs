use std::fmt;

use academy_core::Curriculum;
use academy_core::model::{
    CompletionOutcome, LessonId, LessonRecord, Progress, QuizQuestion, QuizState, UserId,
};

use crate::roster::RosterEntry;

/// Screen the session is currently on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    Loading,
    Login,
    Dashboard,
    Lesson,
    Quiz,
    Admin,
}

impl View {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            View::Loading => "loading",
            View::Login => "login",
            View::Dashboard => "dashboard",
            View::Lesson => "lesson",
            View::Quiz => "quiz",
            View::Admin => "admin",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Profile details of the signed-in principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Learner {
    pub uid: UserId,
    pub name: String,
    pub email: String,
    pub photo: Option<String>,
    pub is_admin: bool,
}

/// What "Complete lesson" did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonCompletion {
    /// Review mode: nothing recorded, back on the dashboard.
    Reviewed,
    Recorded(CompletionOutcome),
}

/// Read-only copy of controller state for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionSnapshot {
    pub view: View,
    pub curriculum: Curriculum,
    pub learner: Option<Learner>,
    pub progress: Progress,
    pub quiz: QuizState,
    pub review_target: Option<LessonId>,
    pub roster: Vec<RosterEntry>,
}

impl SessionSnapshot {
    /// Lesson the lesson view shows: the review target, else the cursor.
    #[must_use]
    pub fn active_lesson(&self) -> Option<&'static LessonRecord> {
        match self.review_target {
            Some(id) => self.curriculum.lesson(id),
            None => self
                .curriculum
                .lesson_at(self.progress.current_lesson_index()),
        }
    }

    #[must_use]
    pub fn is_reviewing(&self) -> bool {
        self.review_target.is_some()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&'static QuizQuestion> {
        self.curriculum.question_at(self.quiz.current_question())
    }

    #[must_use]
    pub fn is_course_complete(&self) -> bool {
        self.progress
            .is_course_complete(self.curriculum.lesson_count())
    }
}
