//! Learner session: the view-state machine over progress, quiz attempt and
//! navigation.

mod controller;
mod view;

pub use controller::SessionController;
pub use view::{LessonCompletion, Learner, SessionSnapshot, View};
