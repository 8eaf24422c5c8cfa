use std::sync::Arc;

use services::{AppServices, IdentityProvider, SessionController};
use tokio::sync::Mutex;

/// What the UI needs from the composition root.
pub trait UiApp: Send + Sync {
    fn identity(&self) -> Arc<dyn IdentityProvider>;
    fn session_controller(&self) -> SessionController;
}

impl UiApp for AppServices {
    fn identity(&self) -> Arc<dyn IdentityProvider> {
        AppServices::identity(self)
    }

    fn session_controller(&self) -> SessionController {
        AppServices::session_controller(self)
    }
}

#[derive(Clone)]
pub struct AppContext {
    identity: Arc<dyn IdentityProvider>,
    // One controller per window. The lock serializes events so their writes
    // reach the store in order.
    session: Arc<Mutex<SessionController>>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            identity: app.identity(),
            session: Arc::new(Mutex::new(app.session_controller())),
        }
    }

    #[must_use]
    pub fn identity(&self) -> Arc<dyn IdentityProvider> {
        Arc::clone(&self.identity)
    }

    #[must_use]
    pub fn session(&self) -> Arc<Mutex<SessionController>> {
        Arc::clone(&self.session)
    }
}

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
