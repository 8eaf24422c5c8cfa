mod admin;
mod dashboard;
mod lesson;
mod login;
mod quiz;
mod shell;
mod state;

pub use admin::AdminView;
pub use dashboard::DashboardView;
pub use lesson::LessonView;
pub use login::LoginView;
pub use quiz::QuizView;
pub use shell::{ErrorBanner, SessionHandle, SessionShell, use_session_handle};
pub use state::ViewError;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
