use crate::model::ids::LessonId;

/// Result of applying a lesson completion to `Progress`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionOutcome {
    /// False when the lesson had already been completed (replay).
    pub newly_completed: bool,
    pub xp_awarded: u32,
    pub course_complete: bool,
}

/// Per-learner course progress.
///
/// `xp` only grows, `completed_lessons` only grows and holds no duplicates,
/// and `quiz_passed` never reverts once set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Progress {
    completed_lessons: Vec<LessonId>,
    xp: u32,
    quiz_passed: bool,
    current_lesson_index: usize,
}

impl Progress {
    /// Rehydrate stored progress. Duplicate ids are dropped (first occurrence
    /// wins) and the cursor is clamped to the last lesson.
    #[must_use]
    pub fn from_persisted(
        completed_lessons: impl IntoIterator<Item = LessonId>,
        xp: u32,
        quiz_passed: bool,
        current_lesson_index: usize,
        lesson_count: usize,
    ) -> Self {
        let mut deduped: Vec<LessonId> = Vec::new();
        for id in completed_lessons {
            if !deduped.contains(&id) {
                deduped.push(id);
            }
        }

        Self {
            completed_lessons: deduped,
            xp,
            quiz_passed,
            current_lesson_index: current_lesson_index.min(lesson_count.saturating_sub(1)),
        }
    }

    #[must_use]
    pub fn completed_lessons(&self) -> &[LessonId] {
        &self.completed_lessons
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed_lessons.len()
    }

    #[must_use]
    pub fn xp(&self) -> u32 {
        self.xp
    }

    #[must_use]
    pub fn quiz_passed(&self) -> bool {
        self.quiz_passed
    }

    #[must_use]
    pub fn current_lesson_index(&self) -> usize {
        self.current_lesson_index
    }

    #[must_use]
    pub fn has_completed(&self, id: LessonId) -> bool {
        self.completed_lessons.contains(&id)
    }

    #[must_use]
    pub fn is_course_complete(&self, lesson_count: usize) -> bool {
        lesson_count > 0 && self.completed_lessons.len() >= lesson_count
    }

    /// Whole-number share of completed lessons, rounded half up.
    #[must_use]
    pub fn percent_complete(&self, lesson_count: usize) -> u8 {
        if lesson_count == 0 {
            return 0;
        }
        let done = self.completed_lessons.len().min(lesson_count);
        let percent = (done * 200 + lesson_count) / (lesson_count * 2);
        u8::try_from(percent).unwrap_or(100)
    }

    /// Mark a lesson complete and move the cursor forward.
    ///
    /// Replays of an already completed id add nothing; the cursor still
    /// advances unless it sits on the last lesson.
    pub fn record_completion(
        &mut self,
        id: LessonId,
        xp_reward: u32,
        lesson_count: usize,
    ) -> CompletionOutcome {
        let newly_completed = !self.has_completed(id);
        let xp_awarded = if newly_completed {
            self.completed_lessons.push(id);
            self.award_xp(xp_reward);
            xp_reward
        } else {
            0
        };

        if self.current_lesson_index + 1 < lesson_count {
            self.current_lesson_index += 1;
        }

        CompletionOutcome {
            newly_completed,
            xp_awarded,
            course_complete: self.is_course_complete(lesson_count),
        }
    }

    pub fn award_xp(&mut self, amount: u32) {
        self.xp = self.xp.saturating_add(amount);
    }

    pub fn mark_quiz_passed(&mut self) {
        self.quiz_passed = true;
    }
}
