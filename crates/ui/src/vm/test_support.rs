use academy_core::Curriculum;
use academy_core::model::{Progress, QuizState, UserId};
use services::{Learner, SessionSnapshot, View};

pub(crate) fn snapshot_with(progress: Progress, quiz: QuizState) -> SessionSnapshot {
    SessionSnapshot {
        view: View::Dashboard,
        curriculum: Curriculum::standard(),
        learner: Some(Learner {
            uid: UserId::new("u1"),
            name: "berry".to_string(),
            email: "berry@example.com".to_string(),
            photo: None,
            is_admin: false,
        }),
        progress,
        quiz,
        review_target: None,
        roster: Vec::new(),
    }
}

pub(crate) fn learner_snapshot() -> SessionSnapshot {
    snapshot_with(Progress::default(), QuizState::default())
}
