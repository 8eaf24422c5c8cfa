use academy_core::model::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::document::{DocumentPatch, StudentDocument};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// A student document together with its key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredStudent {
    pub uid: UserId,
    pub document: StudentDocument,
}

/// Persisted shape for a local sign-in account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRecord {
    pub uid: UserId,
    /// Normalized (trimmed, lower-cased) address; unique across accounts.
    pub email: String,
    pub password_hash: String,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Contract for the `students` collection, keyed by principal id.
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Fetch one document.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read or the stored
    /// value is not a JSON object.
    async fn read(&self, uid: &UserId) -> Result<Option<StudentDocument>, StorageError>;

    /// Shallow-merge `patch` into the document, creating it when missing.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the document cannot be stored.
    async fn write(&self, uid: &UserId, patch: DocumentPatch) -> Result<(), StorageError>;

    /// Every document, ordered by uid. Documents that cannot be decoded are
    /// skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the collection cannot be read.
    async fn list_all(&self) -> Result<Vec<StoredStudent>, StorageError>;
}

#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert a new account.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the email or uid is already taken.
    async fn insert_account(&self, account: &AccountRecord) -> Result<(), StorageError>;

    /// Look up an account by normalized email.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn find_account_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AccountRecord>, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
///
/// Counts student writes and can be told to fail reads or writes, which the
/// controller tests use to exercise persistence failure paths.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    students: Arc<Mutex<HashMap<UserId, Map<String, Value>>>>,
    accounts: Arc<Mutex<HashMap<String, AccountRecord>>>,
    writes: Arc<AtomicUsize>,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of student writes attempted so far, failed ones included.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Store a raw JSON value as-is, bypassing patch semantics.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if `value` is not an object.
    pub fn put_raw(&self, uid: &UserId, value: Value) -> Result<(), StorageError> {
        let Value::Object(fields) = value else {
            return Err(StorageError::Serialization(
                "student document is not an object".into(),
            ));
        };
        let mut guard = self
            .students
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(uid.clone(), fields);
        Ok(())
    }

    /// Stored JSON for a uid, exactly as the merges left it.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn raw(&self, uid: &UserId) -> Result<Option<Value>, StorageError> {
        let guard = self
            .students
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(uid).cloned().map(Value::Object))
    }
}

#[async_trait]
impl StudentStore for InMemoryStore {
    async fn read(&self, uid: &UserId) -> Result<Option<StudentDocument>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Connection("injected read failure".into()));
        }
        let stored = {
            let guard = self
                .students
                .lock()
                .map_err(|e| StorageError::Connection(e.to_string()))?;
            guard.get(uid).cloned()
        };
        stored
            .map(|fields| StudentDocument::from_value(Value::Object(fields)))
            .transpose()
    }

    async fn write(&self, uid: &UserId, patch: DocumentPatch) -> Result<(), StorageError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Connection("injected write failure".into()));
        }
        let mut guard = self
            .students
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        patch.apply_to(guard.entry(uid.clone()).or_default());
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<StoredStudent>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Connection("injected read failure".into()));
        }
        let mut entries: Vec<(UserId, Map<String, Value>)> = {
            let guard = self
                .students
                .lock()
                .map_err(|e| StorageError::Connection(e.to_string()))?;
            guard
                .iter()
                .map(|(uid, fields)| (uid.clone(), fields.clone()))
                .collect()
        };
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(entries
            .into_iter()
            .filter_map(|(uid, fields)| {
                match StudentDocument::from_value(Value::Object(fields)) {
                    Ok(document) => Some(StoredStudent { uid, document }),
                    Err(err) => {
                        tracing::warn!(%uid, error = %err, "skipping undecodable student document");
                        None
                    }
                }
            })
            .collect())
    }
}

#[async_trait]
impl AccountRepository for InMemoryStore {
    async fn insert_account(&self, account: &AccountRecord) -> Result<(), StorageError> {
        let mut guard = self
            .accounts
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let uid_taken = guard.values().any(|existing| existing.uid == account.uid);
        if uid_taken || guard.contains_key(&account.email) {
            return Err(StorageError::Conflict);
        }
        guard.insert(account.email.clone(), account.clone());
        Ok(())
    }

    async fn find_account_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AccountRecord>, StorageError> {
        let guard = self
            .accounts
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(email).cloned())
    }
}

/// Aggregates the student and account repositories behind trait objects for
/// easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub students: Arc<dyn StudentStore>,
    pub accounts: Arc<dyn AccountRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_in_memory(InMemoryStore::new())
    }

    /// Wrap an existing in-memory store so a test can keep a handle to it.
    #[must_use]
    pub fn from_in_memory(store: InMemoryStore) -> Self {
        let students: Arc<dyn StudentStore> = Arc::new(store.clone());
        let accounts: Arc<dyn AccountRepository> = Arc::new(store);
        Self { students, accounts }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{FIELD_PROGRESS, ProgressDocument};
    use academy_core::time::fixed_now;
    use serde_json::json;

    fn account(uid: &str, email: &str) -> AccountRecord {
        AccountRecord {
            uid: UserId::new(uid),
            email: email.into(),
            password_hash: "hash".into(),
            display_name: None,
            created_at: fixed_now(),
        }
    }

    #[tokio::test]
    async fn write_creates_then_merges() {
        let store = InMemoryStore::new();
        let uid = UserId::new("u1");
        store
            .write(
                &uid,
                DocumentPatch::new().set("name", &"Aretha").unwrap(),
            )
            .await
            .unwrap();
        let progress = ProgressDocument {
            completed_lessons: vec![1],
            xp: 50,
            ..ProgressDocument::default()
        };
        store
            .write(&uid, DocumentPatch::new().set(FIELD_PROGRESS, &progress).unwrap())
            .await
            .unwrap();

        let document = store.read(&uid).await.unwrap().unwrap();
        assert_eq!(document.name, "Aretha");
        assert_eq!(document.xp(), 50);
        assert_eq!(store.write_count(), 2);
    }

    #[tokio::test]
    async fn missing_document_reads_as_none() {
        let store = InMemoryStore::new();
        assert!(store.read(&UserId::new("nobody")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn injected_failures_surface_as_connection_errors() {
        let store = InMemoryStore::new();
        store.set_fail_writes(true);
        let err = store
            .write(&UserId::new("u1"), DocumentPatch::new())
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Connection(_)));
        assert_eq!(store.write_count(), 1);

        store.set_fail_reads(true);
        assert!(store.read(&UserId::new("u1")).await.is_err());
        assert!(store.list_all().await.is_err());
    }

    #[tokio::test]
    async fn list_all_orders_by_uid() {
        let store = InMemoryStore::new();
        store.put_raw(&UserId::new("b"), json!({ "name": "B" })).unwrap();
        store.put_raw(&UserId::new("a"), json!({ "name": "A" })).unwrap();

        let all = store.list_all().await.unwrap();
        let names: Vec<_> = all.iter().map(|s| s.document.name.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
    }

    #[tokio::test]
    async fn duplicate_account_email_conflicts() {
        let store = InMemoryStore::new();
        store.insert_account(&account("u1", "a@example.com")).await.unwrap();
        let err = store
            .insert_account(&account("u2", "a@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Conflict));

        let found = store.find_account_by_email("a@example.com").await.unwrap();
        assert_eq!(found.map(|a| a.uid), Some(UserId::new("u1")));
    }
}
