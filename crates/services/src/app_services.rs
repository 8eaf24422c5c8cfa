use std::sync::Arc;

use academy_core::Curriculum;
use storage::repository::{InMemoryStore, Storage};

use crate::Clock;
use crate::access::AdminPolicy;
use crate::error::AppServicesError;
use crate::identity::{IdentityProvider, LocalIdentityProvider};
use crate::session::SessionController;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    curriculum: Curriculum,
    storage: Storage,
    admins: AdminPolicy,
    identity: Arc<dyn IdentityProvider>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        admins: AdminPolicy,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(storage, clock, admins))
    }

    /// Build services over a fresh in-memory store.
    #[must_use]
    pub fn in_memory(clock: Clock, admins: AdminPolicy) -> Self {
        Self::from_storage(Storage::from_in_memory(InMemoryStore::new()), clock, admins)
    }

    #[must_use]
    pub fn from_storage(storage: Storage, clock: Clock, admins: AdminPolicy) -> Self {
        let curriculum = Curriculum::standard();
        let identity: Arc<dyn IdentityProvider> = Arc::new(LocalIdentityProvider::new(
            clock,
            Arc::clone(&storage.accounts),
        ));

        Self {
            clock,
            curriculum,
            storage,
            admins,
            identity,
        }
    }

    /// A fresh controller in the loading state, sharing this identity
    /// provider and store.
    #[must_use]
    pub fn session_controller(&self) -> SessionController {
        SessionController::new(
            self.clock,
            self.curriculum,
            Arc::clone(&self.storage.students),
            Arc::clone(&self.identity),
            self.admins.clone(),
        )
    }

    #[must_use]
    pub fn curriculum(&self) -> Curriculum {
        self.curriculum
    }

    #[must_use]
    pub fn identity(&self) -> Arc<dyn IdentityProvider> {
        Arc::clone(&self.identity)
    }
}
