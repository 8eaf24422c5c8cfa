use academy_core::model::LessonId;
use services::SessionController;

use crate::views::ViewError;

/// Everything a learner can do once signed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionIntent {
    Resume,
    Review(LessonId),
    CompleteLesson { id: LessonId, xp: u32 },
    BackToDashboard,
    Answer(usize),
    NextQuestion,
    SignOut,
}

/// Feed one intent to the controller.
///
/// # Errors
///
/// Returns `ViewError::Rejected` when the controller refuses the event; its
/// state is unchanged in that case.
pub async fn apply_intent(
    session: &mut SessionController,
    intent: SessionIntent,
) -> Result<(), ViewError> {
    match intent {
        SessionIntent::Resume => {
            session.resume()?;
        }
        SessionIntent::Review(id) => session.open_lesson_for_review(id)?,
        SessionIntent::CompleteLesson { id, xp } => {
            session.complete_lesson(id, xp).await?;
        }
        SessionIntent::BackToDashboard => session.back_to_dashboard()?,
        SessionIntent::Answer(option) => {
            session.answer_question(option).await?;
        }
        SessionIntent::NextQuestion => {
            session.advance_quiz().await?;
        }
        SessionIntent::SignOut => session.sign_out().await,
    }
    Ok(())
}
