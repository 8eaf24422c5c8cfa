use crate::model::ids::UserId;

/// An authenticated identity as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub uid: UserId,
    pub email: String,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

impl Principal {
    #[must_use]
    pub fn new(uid: UserId, email: impl Into<String>) -> Self {
        Self {
            uid,
            email: email.into(),
            display_name: None,
            photo_url: None,
        }
    }

    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_photo_url(mut self, url: impl Into<String>) -> Self {
        self.photo_url = Some(url.into());
        self
    }

    /// Name shown for this principal: the display name when set, otherwise
    /// the local part of the email address.
    #[must_use]
    pub fn profile_name(&self) -> String {
        self.display_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map_or_else(
                || {
                    self.email
                        .split('@')
                        .next()
                        .unwrap_or_default()
                        .to_string()
                },
                ToString::to_string,
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_name_prefers_display_name() {
        let principal =
            Principal::new(UserId::new("u1"), "berry@example.com").with_display_name("Berry");
        assert_eq!(principal.profile_name(), "Berry");
    }

    #[test]
    fn profile_name_falls_back_to_email_local_part() {
        let principal =
            Principal::new(UserId::new("u1"), "diana@example.com").with_display_name("  ");
        assert_eq!(principal.profile_name(), "diana");
    }
}
