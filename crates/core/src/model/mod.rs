mod badge;
mod ids;
mod lesson;
mod principal;
mod profile;
mod progress;
mod quiz;

pub use ids::{LessonId, QuestionId, UserId};

pub use badge::{BadgeKind, BadgeStatus, evaluate_badges};
pub use lesson::{CaseStudy, LessonRecord};
pub use principal::Principal;
pub use profile::UserProfile;
pub use progress::{CompletionOutcome, Progress};
pub use quiz::{AdvanceOutcome, AnswerOutcome, OPTION_COUNT, QuizError, QuizQuestion, QuizState};
