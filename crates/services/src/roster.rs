use std::sync::Arc;

use academy_core::Curriculum;
use academy_core::model::UserId;
use storage::repository::{StoredStudent, StudentStore};

use crate::error::RosterError;

/// One row of the administrator roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub uid: UserId,
    pub name: String,
    pub email: String,
    pub xp: u32,
    pub completed_count: usize,
    pub lesson_count: usize,
    pub progress_percent: u8,
    pub graduated: bool,
}

impl RosterEntry {
    /// Summarize a stored document. Records without progress read as zero.
    #[must_use]
    pub fn from_stored(stored: StoredStudent, curriculum: &Curriculum) -> Self {
        let lesson_count = curriculum.lesson_count();
        let document = stored.document;
        let progress = document
            .progress
            .unwrap_or_default()
            .into_progress(lesson_count);

        Self {
            uid: stored.uid,
            name: document.name,
            email: document.email,
            xp: progress.xp(),
            completed_count: progress.completed_count().min(lesson_count),
            lesson_count,
            progress_percent: progress.percent_complete(lesson_count),
            graduated: progress.quiz_passed(),
        }
    }

    #[must_use]
    pub fn status_label(&self) -> &'static str {
        if self.graduated { "GRADUATE" } else { "Learning" }
    }
}

/// Read-only listing of every student record.
#[derive(Clone)]
pub struct RosterService {
    curriculum: Curriculum,
    students: Arc<dyn StudentStore>,
}

impl RosterService {
    #[must_use]
    pub fn new(curriculum: Curriculum, students: Arc<dyn StudentStore>) -> Self {
        Self {
            curriculum,
            students,
        }
    }

    /// Snapshot of all students, ordered by uid.
    ///
    /// # Errors
    ///
    /// Returns `RosterError` if the collection cannot be read.
    pub async fn list(&self) -> Result<Vec<RosterEntry>, RosterError> {
        let stored = self.students.list_all().await?;
        Ok(stored
            .into_iter()
            .map(|student| RosterEntry::from_stored(student, &self.curriculum))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use storage::repository::InMemoryStore;

    #[tokio::test]
    async fn summarizes_progress_and_defaults_missing_fields() {
        let store = InMemoryStore::new();
        store
            .put_raw(
                &UserId::new("a"),
                json!({
                    "name": "Berry",
                    "progress": { "completedLessons": [1,2,3,4,5,6,7,8,9,10], "xp": 900, "quizPassed": true }
                }),
            )
            .unwrap();
        store
            .put_raw(&UserId::new("b"), json!({ "name": "Diana" }))
            .unwrap();

        let roster = RosterService::new(Curriculum::standard(), Arc::new(store));
        let entries = roster.list().await.unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].status_label(), "GRADUATE");
        assert_eq!(entries[0].progress_percent, 100);
        assert_eq!(entries[1].name, "Diana");
        assert_eq!(entries[1].xp, 0);
        assert_eq!(entries[1].completed_count, 0);
        assert_eq!(entries[1].status_label(), "Learning");
    }

    #[tokio::test]
    async fn read_failure_is_reported() {
        let store = InMemoryStore::new();
        store.set_fail_reads(true);
        let roster = RosterService::new(Curriculum::standard(), Arc::new(store));
        assert!(matches!(roster.list().await, Err(RosterError::Storage(_))));
    }
}
