use academy_core::catalog::CORRECT_ANSWER_XP;
use academy_core::model::{QuizQuestion, QuizState};
use services::SessionSnapshot;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionStatus {
    Open,
    Correct,
    Wrong,
    Dimmed,
}

impl OptionStatus {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            OptionStatus::Open => "option",
            OptionStatus::Correct => "option option-correct",
            OptionStatus::Wrong => "option option-wrong",
            OptionStatus::Dimmed => "option option-dimmed",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub index: usize,
    pub label: &'static str,
    pub status: OptionStatus,
    pub disabled: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub heading: String,
    pub xp_hint: String,
    pub story: &'static str,
    pub prompt: &'static str,
    pub options: Vec<OptionVm>,
    /// Label of the button that moves on; absent until an answer is chosen.
    pub next_label: Option<&'static str>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizResultVm {
    pub score: u32,
    pub total: usize,
    pub passed: bool,
}

impl QuizResultVm {
    #[must_use]
    pub fn headline(&self) -> &'static str {
        if self.passed {
            "Perfect Score!"
        } else {
            "Not Quite Ready."
        }
    }

    #[must_use]
    pub fn detail(&self) -> String {
        if self.passed {
            "You are officially Mortgage Ready.".to_string()
        } else {
            format!(
                "You need {total}/{total} to pass. Review and try again.",
                total = self.total
            )
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizVm {
    Question(QuestionVm),
    Result(QuizResultVm),
}

fn option_status(quiz: &QuizState, question: &QuizQuestion, index: usize) -> OptionStatus {
    match quiz.selected() {
        None => OptionStatus::Open,
        Some(_) if question.is_correct(index) => OptionStatus::Correct,
        Some(selected) if selected == index => OptionStatus::Wrong,
        Some(_) => OptionStatus::Dimmed,
    }
}

fn map_question(quiz: &QuizState, question: &'static QuizQuestion, total: usize) -> QuestionVm {
    let answered = quiz.has_answered_current();
    let next_label = answered.then(|| {
        if quiz.is_last_question(total) {
            "Finish Exam"
        } else {
            "Next Question"
        }
    });

    QuestionVm {
        heading: format!("Question {} of {total}", quiz.current_question() + 1),
        xp_hint: format!("Potential XP: +{CORRECT_ANSWER_XP}"),
        story: question.story,
        prompt: question.question,
        options: question
            .options
            .iter()
            .enumerate()
            .map(|(index, &label)| OptionVm {
                index,
                label,
                status: option_status(quiz, question, index),
                disabled: answered,
            })
            .collect(),
        next_label,
    }
}

#[must_use]
pub fn map_quiz(snapshot: &SessionSnapshot) -> Option<QuizVm> {
    let quiz = &snapshot.quiz;
    let total = snapshot.curriculum.question_count();
    if quiz.is_completed() {
        return Some(QuizVm::Result(QuizResultVm {
            score: quiz.score(),
            total,
            passed: quiz.is_passed(total),
        }));
    }
    snapshot
        .current_question()
        .map(|question| QuizVm::Question(map_question(quiz, question, total)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vm::test_support::snapshot_with;
    use academy_core::model::Progress;

    fn question(snapshot: &SessionSnapshot) -> QuestionVm {
        match map_quiz(snapshot) {
            Some(QuizVm::Question(vm)) => vm,
            other => panic!("expected a question, got {other:?}"),
        }
    }

    #[test]
    fn unanswered_question_is_open() {
        let vm = question(&snapshot_with(Progress::default(), QuizState::default()));
        assert_eq!(vm.heading, "Question 1 of 10");
        assert_eq!(vm.xp_hint, "Potential XP: +10");
        assert!(vm.next_label.is_none());
        assert!(vm.options.iter().all(|o| o.status == OptionStatus::Open && !o.disabled));
    }

    #[test]
    fn answered_question_marks_every_option() {
        // Question 1 expects option 1.
        let quiz = QuizState::from_persisted(0, 0, Some(2), Some(false), false, 10);
        let vm = question(&snapshot_with(Progress::default(), quiz));
        let statuses: Vec<_> = vm.options.iter().map(|o| o.status).collect();
        assert_eq!(
            statuses,
            [OptionStatus::Dimmed, OptionStatus::Correct, OptionStatus::Wrong]
        );
        assert!(vm.options.iter().all(|o| o.disabled));
        assert_eq!(vm.next_label, Some("Next Question"));
    }

    #[test]
    fn last_question_offers_finish() {
        let quiz = QuizState::from_persisted(9, 9, Some(2), Some(true), false, 10);
        let vm = question(&snapshot_with(Progress::default(), quiz));
        assert_eq!(vm.heading, "Question 10 of 10");
        assert_eq!(vm.next_label, Some("Finish Exam"));
    }

    #[test]
    fn finished_attempt_shows_result_copy() {
        let failed = QuizState::from_persisted(9, 9, Some(0), Some(false), true, 10);
        let Some(QuizVm::Result(result)) = map_quiz(&snapshot_with(Progress::default(), failed))
        else {
            panic!("expected result");
        };
        assert!(!result.passed);
        assert_eq!(result.headline(), "Not Quite Ready.");
        assert_eq!(result.detail(), "You need 10/10 to pass. Review and try again.");

        let perfect = QuizState::from_persisted(9, 10, Some(2), Some(true), true, 10);
        let Some(QuizVm::Result(result)) = map_quiz(&snapshot_with(Progress::default(), perfect))
        else {
            panic!("expected result");
        };
        assert!(result.passed);
        assert_eq!(result.headline(), "Perfect Score!");
    }
}
