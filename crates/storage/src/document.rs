//! Wire shapes for the `students` collection.
//!
//! Documents are camelCase JSON objects. Every field is optional on read and a
//! field that fails to decode falls back to its zero value, so a partial or
//! hand-edited record still hydrates.

use academy_core::Curriculum;
use academy_core::model::{LessonId, Progress, QuizState, UserId, UserProfile};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::repository::StorageError;

pub const FIELD_PROGRESS: &str = "progress";
pub const FIELD_QUIZ_STATE: &str = "quizState";

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressDocument {
    #[serde(deserialize_with = "lenient")]
    pub completed_lessons: Vec<u32>,
    #[serde(deserialize_with = "lenient")]
    pub xp: u32,
    #[serde(deserialize_with = "lenient")]
    pub quiz_passed: bool,
    #[serde(deserialize_with = "lenient")]
    pub current_lesson_index: usize,
}

impl ProgressDocument {
    #[must_use]
    pub fn from_progress(progress: &Progress) -> Self {
        Self {
            completed_lessons: progress
                .completed_lessons()
                .iter()
                .map(LessonId::value)
                .collect(),
            xp: progress.xp(),
            quiz_passed: progress.quiz_passed(),
            current_lesson_index: progress.current_lesson_index(),
        }
    }

    #[must_use]
    pub fn into_progress(self, lesson_count: usize) -> Progress {
        Progress::from_persisted(
            self.completed_lessons.into_iter().map(LessonId::new),
            self.xp,
            self.quiz_passed,
            self.current_lesson_index,
            lesson_count,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuizStateDocument {
    #[serde(deserialize_with = "lenient")]
    pub current_question: usize,
    #[serde(deserialize_with = "lenient")]
    pub score: u32,
    #[serde(deserialize_with = "lenient")]
    pub selected: Option<usize>,
    #[serde(deserialize_with = "lenient")]
    pub is_correct: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub completed: bool,
}

impl QuizStateDocument {
    #[must_use]
    pub fn from_quiz_state(state: &QuizState) -> Self {
        Self {
            current_question: state.current_question(),
            score: state.score(),
            selected: state.selected(),
            is_correct: state.is_correct(),
            completed: state.is_completed(),
        }
    }

    #[must_use]
    pub fn into_quiz_state(self, question_count: usize) -> QuizState {
        QuizState::from_persisted(
            self.current_question,
            self.score,
            self.selected,
            self.is_correct,
            self.completed,
            question_count,
        )
    }
}

/// One record of the `students` collection.
///
/// Mirrors `UserProfile` without the key; the uid lives outside the document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentDocument {
    #[serde(deserialize_with = "lenient")]
    pub name: String,
    #[serde(deserialize_with = "lenient")]
    pub email: String,
    #[serde(deserialize_with = "lenient")]
    pub photo: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub joined: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub progress: Option<ProgressDocument>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub quiz_state: Option<QuizStateDocument>,
}

impl StudentDocument {
    #[must_use]
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            name: profile.name().to_owned(),
            email: profile.email().to_owned(),
            photo: profile.photo().map(ToOwned::to_owned),
            joined: profile.joined(),
            progress: Some(ProgressDocument::from_progress(profile.progress())),
            quiz_state: Some(QuizStateDocument::from_quiz_state(profile.quiz_state())),
        }
    }

    /// Hydrate a domain profile. Absent sub-documents become zero values.
    #[must_use]
    pub fn into_profile(self, uid: UserId, curriculum: &Curriculum) -> UserProfile {
        let progress = self
            .progress
            .unwrap_or_default()
            .into_progress(curriculum.lesson_count());
        let quiz_state = self
            .quiz_state
            .unwrap_or_default()
            .into_quiz_state(curriculum.question_count());

        UserProfile::from_persisted(
            uid,
            self.name,
            self.email,
            self.photo,
            self.joined,
            progress,
            quiz_state,
        )
    }

    /// Decode a stored JSON object.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the value is not an object.
    pub fn from_value(value: Value) -> Result<Self, StorageError> {
        if !value.is_object() {
            return Err(StorageError::Serialization(
                "student document is not an object".into(),
            ));
        }
        serde_json::from_value(value).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.progress
            .as_ref()
            .map_or(0, |progress| progress.completed_lessons.len())
    }

    #[must_use]
    pub fn xp(&self) -> u32 {
        self.progress.as_ref().map_or(0, |progress| progress.xp)
    }

    #[must_use]
    pub fn quiz_passed(&self) -> bool {
        self.progress
            .as_ref()
            .is_some_and(|progress| progress.quiz_passed)
    }
}

/// Top-level fields to upsert into a student document.
///
/// Applying a patch replaces each named field wholesale; fields the patch
/// does not name are left as stored.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentPatch {
    fields: Map<String, Value>,
}

impl DocumentPatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every field of a full document.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the document cannot be encoded.
    pub fn document(document: &StudentDocument) -> Result<Self, StorageError> {
        match serde_json::to_value(document) {
            Ok(Value::Object(fields)) => Ok(Self { fields }),
            Ok(_) => Err(StorageError::Serialization(
                "student document did not encode as an object".into(),
            )),
            Err(e) => Err(StorageError::Serialization(e.to_string())),
        }
    }

    /// Add or replace one top-level field.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if `value` cannot be encoded.
    pub fn set<T: Serialize>(mut self, field: &str, value: &T) -> Result<Self, StorageError> {
        let encoded =
            serde_json::to_value(value).map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.fields.insert(field.to_owned(), encoded);
        Ok(self)
    }

    /// Patch carrying only the `progress` sub-document.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if encoding fails.
    pub fn progress(progress: &Progress) -> Result<Self, StorageError> {
        Self::new().set(FIELD_PROGRESS, &ProgressDocument::from_progress(progress))
    }

    /// Patch carrying only the `quizState` sub-document.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if encoding fails.
    pub fn quiz_state(state: &QuizState) -> Result<Self, StorageError> {
        Self::new().set(FIELD_QUIZ_STATE, &QuizStateDocument::from_quiz_state(state))
    }

    /// Shallow-merge into a stored object.
    pub fn apply_to(self, target: &mut Map<String, Value>) {
        for (field, value) in self.fields {
            target.insert(field, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use academy_core::model::Principal;
    use academy_core::time::fixed_now;
    use serde_json::json;

    #[test]
    fn missing_quiz_state_hydrates_to_zero_value() {
        let document = StudentDocument::from_value(json!({
            "name": "Berry",
            "email": "berry@example.com",
            "progress": { "completedLessons": [1, 2], "xp": 100 }
        }))
        .unwrap();

        let profile = document.into_profile(UserId::new("u1"), &Curriculum::standard());
        assert_eq!(profile.quiz_state(), &QuizState::default());
        assert_eq!(profile.progress().xp(), 100);
        assert_eq!(profile.progress().current_lesson_index(), 0);
        assert!(!profile.progress().quiz_passed());
    }

    #[test]
    fn malformed_fields_default_individually() {
        let document = StudentDocument::from_value(json!({
            "name": 42,
            "email": "diana@example.com",
            "photo": null,
            "joined": "not a date",
            "progress": { "completedLessons": "oops", "xp": -5, "quizPassed": true },
            "quizState": { "currentQuestion": 3, "selected": "x" }
        }))
        .unwrap();

        assert_eq!(document.name, "");
        assert_eq!(document.email, "diana@example.com");
        assert!(document.joined.is_none());
        let progress = document.progress.clone().unwrap();
        assert!(progress.completed_lessons.is_empty());
        assert_eq!(progress.xp, 0);
        assert!(progress.quiz_passed);
        let quiz = document.quiz_state.clone().unwrap();
        assert_eq!(quiz.current_question, 3);
        assert_eq!(quiz.selected, None);
    }

    #[test]
    fn non_object_document_is_rejected() {
        let err = StudentDocument::from_value(json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }

    #[test]
    fn new_profile_encodes_camel_case_wire_shape() {
        let principal = Principal::new(UserId::new("u1"), "smokey@example.com");
        let profile = UserProfile::for_new_principal(&principal, fixed_now());
        let patch = DocumentPatch::document(&StudentDocument::from_profile(&profile)).unwrap();

        let mut stored = Map::new();
        patch.apply_to(&mut stored);
        assert_eq!(stored["name"], json!("smokey"));
        assert_eq!(stored["photo"], Value::Null);
        assert_eq!(
            stored["progress"],
            json!({ "completedLessons": [], "xp": 0, "quizPassed": false, "currentLessonIndex": 0 })
        );
        assert_eq!(
            stored["quizState"],
            json!({ "currentQuestion": 0, "score": 0, "selected": null, "isCorrect": null, "completed": false })
        );
    }

    #[test]
    fn patch_replaces_named_fields_only() {
        let mut stored = json!({
            "name": "Martha",
            "progress": { "completedLessons": [1, 2, 3], "xp": 150, "quizPassed": false, "currentLessonIndex": 3 },
            "quizState": { "currentQuestion": 4, "score": 4 }
        })
        .as_object()
        .cloned()
        .unwrap();

        let progress = Progress::from_persisted([LessonId::new(1)], 50, false, 1, 10);
        DocumentPatch::progress(&progress)
            .unwrap()
            .apply_to(&mut stored);

        assert_eq!(stored["name"], json!("Martha"));
        assert_eq!(stored["quizState"]["score"], json!(4));
        assert_eq!(stored["progress"]["completedLessons"], json!([1]));
        assert_eq!(stored["progress"]["xp"], json!(50));
    }
}
