use std::sync::Arc;

use dioxus::prelude::*;
use services::{SessionSnapshot, View};

use super::{AdminView, DashboardView, LessonView, LoginView, QuizView, ViewError};
use crate::context::AppContext;
use crate::vm::{SessionIntent, apply_intent};

#[cfg(test)]
use super::test_harness::SessionTestHandles;

/// Reactive view of the session shared with every screen.
#[derive(Clone, Copy)]
pub struct SessionHandle {
    pub snapshot: Signal<SessionSnapshot>,
    pub error: Signal<Option<ViewError>>,
    pub dispatch: Callback<SessionIntent>,
}

/// Follow the identity provider and expose the controller as signals.
///
/// Each identity change and each intent runs under the controller lock and
/// publishes a fresh snapshot when done.
pub fn use_session_handle(ctx: &AppContext) -> SessionHandle {
    let mut snapshot = use_signal(SessionSnapshot::default);
    let mut error = use_signal(|| None::<ViewError>);
    let session = ctx.session();

    {
        let identity = ctx.identity();
        let session = Arc::clone(&session);
        use_future(move || {
            let identity = Arc::clone(&identity);
            let session = Arc::clone(&session);
            async move {
                let mut subscription = identity.subscribe();
                while let Ok(principal) = subscription.next().await {
                    let mut controller = session.lock().await;
                    controller.on_identity_changed(principal).await;
                    snapshot.set(controller.snapshot());
                    error.set(None);
                }
                tracing::debug!("identity subscription closed");
            }
        });
    }

    let dispatch = use_callback(move |intent: SessionIntent| {
        let session = Arc::clone(&session);
        spawn(async move {
            let mut controller = session.lock().await;
            let result = apply_intent(&mut controller, intent).await;
            snapshot.set(controller.snapshot());
            match result {
                Ok(()) => error.set(None),
                Err(err) => {
                    tracing::warn!(?intent, error = err.message(), "intent not applied");
                    error.set(Some(err));
                }
            }
        });
    });

    SessionHandle {
        snapshot,
        error,
        dispatch,
    }
}

#[component]
pub fn SessionShell() -> Element {
    let ctx = use_context::<AppContext>();
    let handle = use_session_handle(&ctx);
    use_context_provider(|| handle);

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<SessionTestHandles>() {
                handles.register(handle);
            }
        }
    }

    let view = handle.snapshot.read().view;
    match view {
        View::Loading => rsx! {
            div { class: "loading", "Loading Academy..." }
        },
        View::Login => rsx! { LoginView {} },
        View::Dashboard => rsx! { DashboardView {} },
        View::Lesson => rsx! { LessonView {} },
        View::Quiz => rsx! { QuizView {} },
        View::Admin => rsx! { AdminView {} },
    }
}

/// Inline notice for the last rejected intent.
#[component]
pub fn ErrorBanner() -> Element {
    let handle = use_context::<SessionHandle>();
    let error = *handle.error.read();
    rsx! {
        if let Some(err) = error {
            div { class: "banner banner-error", role: "alert", "{err.message()}" }
        }
    }
}
