use std::collections::BTreeSet;

use academy_core::model::Principal;

/// Allow-list of administrator emails, matched case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminPolicy {
    emails: BTreeSet<String>,
}

impl AdminPolicy {
    /// Policy with no administrators.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Build from raw addresses; blanks are ignored.
    #[must_use]
    pub fn new<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let emails = emails
            .into_iter()
            .map(|email| email.as_ref().trim().to_lowercase())
            .filter(|email| !email.is_empty())
            .collect();
        Self { emails }
    }

    #[must_use]
    pub fn is_admin(&self, principal: &Principal) -> bool {
        self.emails
            .contains(&principal.email.trim().to_lowercase())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }

    pub fn emails(&self) -> impl Iterator<Item = &str> {
        self.emails.iter().map(String::as_str)
    }
}
