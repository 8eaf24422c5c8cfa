use services::{Credentials, IdentityProvider};

use crate::views::ViewError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoginMode {
    #[default]
    SignIn,
    SignUp,
}

impl LoginMode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            LoginMode::SignIn => LoginMode::SignUp,
            LoginMode::SignUp => LoginMode::SignIn,
        }
    }

    #[must_use]
    pub fn submit_label(self, busy: bool) -> &'static str {
        match (busy, self) {
            (true, _) => "Processing...",
            (false, LoginMode::SignIn) => "Sign In",
            (false, LoginMode::SignUp) => "Create Account",
        }
    }

    #[must_use]
    pub fn toggle_label(self) -> &'static str {
        match self {
            LoginMode::SignIn => "Need an account? Sign Up",
            LoginMode::SignUp => "Already have an account? Sign In",
        }
    }

    #[must_use]
    pub fn asks_for_name(self) -> bool {
        self == LoginMode::SignUp
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub mode: LoginMode,
    pub name: String,
    pub email: String,
    pub password: String,
}

impl LoginForm {
    /// Credentials for the current mode. The name only travels on sign-up.
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        let credentials = Credentials::new(self.email.clone(), self.password.clone());
        if self.mode.asks_for_name() {
            credentials.with_display_name(self.name.clone())
        } else {
            credentials
        }
    }
}

/// Submit the form to the identity provider. Success is reported through the
/// provider's subscription, so only failures come back here.
///
/// # Errors
///
/// Returns `ViewError::Auth` carrying the inline message for the failure.
pub async fn submit_login(identity: &dyn IdentityProvider, form: &LoginForm) -> Result<(), ViewError> {
    let credentials = form.credentials();
    let result = match form.mode {
        LoginMode::SignIn => identity.sign_in(&credentials).await,
        LoginMode::SignUp => identity.sign_up(&credentials).await,
    };
    result.map(|_| ()).map_err(|err| {
        tracing::debug!(error = %err, mode = ?form.mode, "authentication rejected");
        ViewError::from(err)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use academy_core::time::fixed_clock;
    use services::{AdminPolicy, AppServices};

    fn form(mode: LoginMode, email: &str, password: &str) -> LoginForm {
        LoginForm {
            mode,
            name: "Diana Ross".to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn labels_follow_mode() {
        assert_eq!(LoginMode::SignIn.submit_label(false), "Sign In");
        assert_eq!(LoginMode::SignUp.submit_label(false), "Create Account");
        assert_eq!(LoginMode::SignUp.submit_label(true), "Processing...");
        assert_eq!(LoginMode::SignIn.toggled(), LoginMode::SignUp);
        assert_eq!(LoginMode::SignUp.toggle_label(), "Already have an account? Sign In");
    }

    #[test]
    fn name_only_sent_on_sign_up() {
        let sign_in = form(LoginMode::SignIn, "diana@example.com", "supremes");
        assert_eq!(sign_in.credentials().display_name, None);
        let sign_up = form(LoginMode::SignUp, "diana@example.com", "supremes");
        assert_eq!(sign_up.credentials().display_name.as_deref(), Some("Diana Ross"));
    }

    #[tokio::test]
    async fn failures_map_to_inline_messages() {
        let services = AppServices::in_memory(fixed_clock(), AdminPolicy::none());
        let identity = services.identity();

        let weak = submit_login(identity.as_ref(), &form(LoginMode::SignUp, "diana@example.com", "123"))
            .await
            .unwrap_err();
        assert_eq!(weak.message(), "Password too weak.");

        submit_login(identity.as_ref(), &form(LoginMode::SignUp, "diana@example.com", "supremes"))
            .await
            .unwrap();
        let taken = submit_login(identity.as_ref(), &form(LoginMode::SignUp, "diana@example.com", "supremes"))
            .await
            .unwrap_err();
        assert_eq!(taken.message(), "Email already used.");

        let wrong = submit_login(identity.as_ref(), &form(LoginMode::SignIn, "diana@example.com", "motown"))
            .await
            .unwrap_err();
        assert_eq!(wrong.message(), "Invalid email or password.");
    }
}
