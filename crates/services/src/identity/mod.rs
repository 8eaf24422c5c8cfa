//! Identity provider contract and the bundled local implementation.

use academy_core::model::Principal;
use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::watch;

use crate::error::AuthError;

mod local;
mod password;

pub use local::{LocalIdentityProvider, MIN_PASSWORD_LEN};

/// Email and password as typed into the sign-in form, plus the optional
/// full name collected at sign-up.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
}

impl Credentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            display_name: None,
        }
    }

    /// Attach a display name; blank names are ignored.
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        let trimmed = name.trim();
        self.display_name = (!trimmed.is_empty()).then(|| trimmed.to_owned());
        self
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("display_name", &self.display_name)
            .finish()
    }
}

/// Source of authenticated principals.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Authenticate an existing account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for unknown emails or wrong
    /// passwords, or a storage/generic failure.
    async fn sign_in(&self, credentials: &Credentials) -> Result<Principal, AuthError>;

    /// Register a new account and sign it in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::EmailAlreadyRegistered`, `AuthError::WeakPassword`,
    /// `AuthError::InvalidCredentials` for malformed emails, or a
    /// storage/generic failure.
    async fn sign_up(&self, credentials: &Credentials) -> Result<Principal, AuthError>;

    /// Clear the current principal.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the provider could not end the session.
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Listen for identity changes. Dropping the subscription unsubscribes.
    fn subscribe(&self) -> IdentitySubscription;
}

/// The provider behind a subscription has gone away.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("identity provider closed")]
pub struct SubscriptionClosed;

/// Stream of identity states: the current principal first, then one value per
/// change. Rapid successive changes may coalesce into the latest.
#[derive(Debug)]
pub struct IdentitySubscription {
    receiver: watch::Receiver<Option<Principal>>,
    delivered_initial: bool,
}

impl IdentitySubscription {
    #[must_use]
    pub fn new(receiver: watch::Receiver<Option<Principal>>) -> Self {
        Self {
            receiver,
            delivered_initial: false,
        }
    }

    /// Wait for the next identity state.
    ///
    /// # Errors
    ///
    /// Returns `SubscriptionClosed` once the provider has been dropped.
    pub async fn next(&mut self) -> Result<Option<Principal>, SubscriptionClosed> {
        if !self.delivered_initial {
            self.delivered_initial = true;
            return Ok(self.receiver.borrow_and_update().clone());
        }
        self.receiver
            .changed()
            .await
            .map_err(|_| SubscriptionClosed)?;
        Ok(self.receiver.borrow_and_update().clone())
    }
}
