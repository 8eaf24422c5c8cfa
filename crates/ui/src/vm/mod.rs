mod dashboard_vm;
mod lesson_vm;
mod login_vm;
mod quiz_vm;
mod roster_vm;
mod session_vm;
#[cfg(test)]
mod test_support;

pub use dashboard_vm::{BadgeCardVm, DashboardVm, ReviewItemVm, map_dashboard};
pub use lesson_vm::{LessonVm, map_lesson};
pub use login_vm::{LoginForm, LoginMode, submit_login};
pub use quiz_vm::{OptionStatus, OptionVm, QuestionVm, QuizResultVm, QuizVm, map_quiz};
pub use roster_vm::{RosterRowVm, RosterVm, map_roster};
pub use session_vm::{SessionIntent, apply_intent};
