use thiserror::Error;

use crate::model::ids::QuestionId;

/// Number of answer options on every question.
pub const OPTION_COUNT: usize = 3;

/// One certification question. Defined at build time, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizQuestion {
    pub id: QuestionId,
    pub story: &'static str,
    pub question: &'static str,
    pub options: [&'static str; OPTION_COUNT],
    pub correct_index: usize,
}

impl QuizQuestion {
    #[must_use]
    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct_index
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz already completed")]
    AlreadyCompleted,

    #[error("question {index} already answered")]
    AlreadyAnswered { index: usize },

    #[error("option {option} is out of range")]
    InvalidOption { option: usize },

    #[error("question {index} has not been answered")]
    Unanswered { index: usize },

    #[error("quiz has no questions")]
    NoQuestion,
}

/// Result of recording an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    /// True when the answer should grant progress XP (correct and the quiz was
    /// still open when it was given).
    pub awards_xp: bool,
}

/// Result of moving past the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    Next { question_index: usize },
    Finished { score: u32, passed: bool },
}

/// Highest score reachable at `current_question`. The current question only
/// counts once it has been answered; a finished attempt always has been.
fn score_cap(current_question: usize, answered: bool) -> u32 {
    u32::try_from(current_question + usize::from(answered)).unwrap_or(u32::MAX)
}

/// Resumable exam attempt.
///
/// Invariant: `score <= current_question + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuizState {
    current_question: usize,
    score: u32,
    selected: Option<usize>,
    is_correct: Option<bool>,
    completed: bool,
}

impl QuizState {
    /// Rehydrate from a stored attempt, clamping out-of-range values so a
    /// partially written record still yields a usable state.
    #[must_use]
    pub fn from_persisted(
        current_question: usize,
        score: u32,
        selected: Option<usize>,
        is_correct: Option<bool>,
        completed: bool,
        question_count: usize,
    ) -> Self {
        let current_question = current_question.min(question_count.saturating_sub(1));
        let selected = selected.filter(|option| *option < OPTION_COUNT);
        let is_correct = selected.and(is_correct);
        let max_score = score_cap(current_question, selected.is_some() || completed);

        Self {
            current_question,
            score: score.min(max_score),
            selected,
            is_correct,
            completed,
        }
    }

    #[must_use]
    pub fn current_question(&self) -> usize {
        self.current_question
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn is_correct(&self) -> Option<bool> {
        self.is_correct
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn has_answered_current(&self) -> bool {
        self.selected.is_some()
    }

    /// An attempt that has moved past the first question but not finished.
    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        !self.completed && self.current_question > 0
    }

    /// Passing requires a perfect score on a finished attempt.
    #[must_use]
    pub fn is_passed(&self, question_count: usize) -> bool {
        self.completed && is_perfect(self.score, question_count)
    }

    #[must_use]
    pub fn is_last_question(&self, question_count: usize) -> bool {
        self.current_question + 1 >= question_count
    }

    /// Record the learner's choice for the current question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidOption` if `option` is not one of the
    /// question's options, or `QuizError::AlreadyAnswered` if the current
    /// question already has a recorded choice.
    pub fn answer(
        &mut self,
        question: &QuizQuestion,
        option: usize,
    ) -> Result<AnswerOutcome, QuizError> {
        if option >= question.options.len() {
            return Err(QuizError::InvalidOption { option });
        }
        if self.selected.is_some() {
            return Err(QuizError::AlreadyAnswered {
                index: self.current_question,
            });
        }

        let correct = question.is_correct(option);
        self.selected = Some(option);
        self.is_correct = Some(correct);
        if correct {
            let cap = score_cap(self.current_question, true);
            self.score = self.score.saturating_add(1).min(cap);
        }

        Ok(AnswerOutcome {
            correct,
            awards_xp: correct && !self.completed,
        })
    }

    /// Move to the next question, or finish the attempt on the last one.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::AlreadyCompleted` once the attempt is finished,
    /// `QuizError::NoQuestion` for an empty question set and
    /// `QuizError::Unanswered` while the current question has no choice.
    pub fn advance(&mut self, question_count: usize) -> Result<AdvanceOutcome, QuizError> {
        if self.completed {
            return Err(QuizError::AlreadyCompleted);
        }
        if question_count == 0 {
            return Err(QuizError::NoQuestion);
        }
        if self.selected.is_none() {
            return Err(QuizError::Unanswered {
                index: self.current_question,
            });
        }

        if self.is_last_question(question_count) {
            self.completed = true;
            return Ok(AdvanceOutcome::Finished {
                score: self.score,
                passed: is_perfect(self.score, question_count),
            });
        }

        self.current_question += 1;
        self.selected = None;
        self.is_correct = None;
        Ok(AdvanceOutcome::Next {
            question_index: self.current_question,
        })
    }
}

fn is_perfect(score: u32, question_count: usize) -> bool {
    u32::try_from(question_count).is_ok_and(|count| count > 0 && score == count)
}
