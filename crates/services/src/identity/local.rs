use std::sync::Arc;

use academy_core::Clock;
use academy_core::model::{Principal, UserId};
use async_trait::async_trait;
use storage::repository::{AccountRecord, AccountRepository, StorageError};
use tokio::sync::watch;

use super::password::{hash_password, verify_password};
use super::{Credentials, IdentityProvider, IdentitySubscription};
use crate::error::AuthError;

/// Shortest password accepted at sign-up, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Email/password accounts kept in the local database.
pub struct LocalIdentityProvider {
    clock: Clock,
    accounts: Arc<dyn AccountRepository>,
    current: watch::Sender<Option<Principal>>,
}

impl LocalIdentityProvider {
    #[must_use]
    pub fn new(clock: Clock, accounts: Arc<dyn AccountRepository>) -> Self {
        let (current, _) = watch::channel(None);
        Self {
            clock,
            accounts,
            current,
        }
    }

    /// Principal currently signed in, if any.
    #[must_use]
    pub fn current(&self) -> Option<Principal> {
        self.current.borrow().clone()
    }

    fn publish(&self, principal: Option<Principal>) {
        self.current.send_replace(principal);
    }
}

fn normalize_email(raw: &str) -> Result<String, AuthError> {
    let email = raw.trim().to_lowercase();
    let Some((local, domain)) = email.split_once('@') else {
        return Err(AuthError::InvalidCredentials);
    };
    let well_formed = !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace);
    if well_formed {
        Ok(email)
    } else {
        Err(AuthError::InvalidCredentials)
    }
}

fn principal_for(account: &AccountRecord) -> Principal {
    let principal = Principal::new(account.uid.clone(), account.email.clone());
    match &account.display_name {
        Some(name) => principal.with_display_name(name.clone()),
        None => principal,
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    async fn sign_in(&self, credentials: &Credentials) -> Result<Principal, AuthError> {
        let email = normalize_email(&credentials.email)?;
        let Some(account) = self.accounts.find_account_by_email(&email).await? else {
            tracing::debug!("sign-in for unknown email");
            return Err(AuthError::InvalidCredentials);
        };
        if !verify_password(&credentials.password, &account.password_hash)? {
            tracing::debug!(uid = %account.uid, "sign-in with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let principal = principal_for(&account);
        tracing::info!(uid = %principal.uid, "signed in");
        self.publish(Some(principal.clone()));
        Ok(principal)
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<Principal, AuthError> {
        let email = normalize_email(&credentials.email)?;
        if credentials.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword);
        }
        if self.accounts.find_account_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailAlreadyRegistered);
        }

        let account = AccountRecord {
            uid: UserId::generate(),
            email,
            password_hash: hash_password(&credentials.password)?,
            display_name: credentials.display_name.clone(),
            created_at: self.clock.now(),
        };
        match self.accounts.insert_account(&account).await {
            Ok(()) => {}
            Err(StorageError::Conflict) => return Err(AuthError::EmailAlreadyRegistered),
            Err(e) => return Err(e.into()),
        }

        let principal = principal_for(&account);
        tracing::info!(uid = %principal.uid, "account created");
        self.publish(Some(principal.clone()));
        Ok(principal)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        if self.current.borrow().is_some() {
            tracing::info!("signed out");
        }
        self.publish(None);
        Ok(())
    }

    fn subscribe(&self) -> IdentitySubscription {
        IdentitySubscription::new(self.current.subscribe())
    }
}
