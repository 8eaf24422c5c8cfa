use academy_core::model::{LessonId, LessonRecord};
use services::SessionSnapshot;

use super::SessionIntent;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonVm {
    pub id: LessonId,
    pub xp: u32,
    pub module_label: String,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub objective: &'static str,
    pub points: &'static [&'static str],
    pub case_heading: String,
    pub case_scenario: &'static str,
    pub case_lesson: &'static str,
    pub gold_tip: &'static str,
    pub reviewing: bool,
}

impl LessonVm {
    #[must_use]
    pub fn new(lesson: &'static LessonRecord, reviewing: bool) -> Self {
        Self {
            id: lesson.id,
            xp: lesson.xp_reward(),
            module_label: format!("Module {}", lesson.id),
            title: lesson.title,
            subtitle: lesson.subtitle,
            objective: lesson.objective,
            points: lesson.points,
            case_heading: format!("Case Study: {}", lesson.case_study.character),
            case_scenario: lesson.case_study.scenario,
            case_lesson: lesson.case_study.lesson,
            gold_tip: lesson.gold_tip,
            reviewing,
        }
    }

    #[must_use]
    pub fn complete_intent(&self) -> SessionIntent {
        SessionIntent::CompleteLesson {
            id: self.id,
            xp: self.xp,
        }
    }
}

/// The lesson on screen, or `None` when the cursor points past the catalog.
#[must_use]
pub fn map_lesson(snapshot: &SessionSnapshot) -> Option<LessonVm> {
    snapshot
        .active_lesson()
        .map(|lesson| LessonVm::new(lesson, snapshot.is_reviewing()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vm::test_support::snapshot_with;
    use academy_core::model::{Progress, QuizState};

    #[test]
    fn cursor_lesson_is_shown_outside_review() {
        let progress = Progress::from_persisted([LessonId::new(1)], 50, false, 1, 10);
        let vm = map_lesson(&snapshot_with(progress, QuizState::default())).expect("lesson");
        assert_eq!(vm.module_label, "Module 2");
        assert_eq!(vm.title, "Financial Readiness");
        assert!(!vm.reviewing);
        assert_eq!(
            vm.complete_intent(),
            SessionIntent::CompleteLesson {
                id: LessonId::new(2),
                xp: vm.xp
            }
        );
    }

    #[test]
    fn review_target_wins_over_cursor() {
        let progress = Progress::from_persisted([LessonId::new(1)], 50, false, 1, 10);
        let mut snapshot = snapshot_with(progress, QuizState::default());
        snapshot.review_target = Some(LessonId::new(1));
        let vm = map_lesson(&snapshot).expect("lesson");
        assert_eq!(vm.title, "The Mindset Shift");
        assert!(vm.reviewing);
        assert!(vm.case_heading.starts_with("Case Study: "));
    }
}
