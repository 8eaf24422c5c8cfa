use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use academy_core::model::Principal;
use academy_core::time::fixed_clock;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use services::{AdminPolicy, AppServices, Credentials, SessionSnapshot};
use storage::repository::{InMemoryStore, Storage};

use super::shell::{SessionHandle, SessionShell};
use crate::context::{UiApp, build_app_context};
use crate::vm::SessionIntent;

pub const ADMIN_EMAIL: &str = "admin@initiative2053.com";

#[derive(Clone, Default)]
pub(crate) struct SessionTestHandles {
    handle: Rc<RefCell<Option<SessionHandle>>>,
}

impl SessionTestHandles {
    pub(crate) fn register(&self, handle: SessionHandle) {
        *self.handle.borrow_mut() = Some(handle);
    }

    fn handle(&self) -> SessionHandle {
        (*self.handle.borrow()).expect("session handle registered")
    }
}

#[derive(Props, Clone)]
struct ShellHarnessProps {
    app: Arc<AppServices>,
    handles: SessionTestHandles,
}

impl PartialEq for ShellHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ShellHarnessProps {}

#[component]
fn ShellHarness(props: ShellHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    rsx! { SessionShell {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub services: AppServices,
    handles: SessionTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Let spawned identity and intent tasks run to completion.
    pub async fn settle(&mut self) {
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    pub fn dispatch(&mut self, intent: SessionIntent) {
        let dispatch = self.handles.handle().dispatch;
        self.dom.in_runtime(|| dispatch.call(intent));
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let snapshot = self.handles.handle().snapshot;
        self.dom.in_runtime(|| snapshot.read().clone())
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Services over a fresh in-memory store with the default admin allow-list.
pub fn test_services() -> (AppServices, InMemoryStore) {
    let store = InMemoryStore::new();
    let services = AppServices::from_storage(
        Storage::from_in_memory(store.clone()),
        fixed_clock(),
        AdminPolicy::new([ADMIN_EMAIL]),
    );
    (services, store)
}

pub async fn sign_up(services: &AppServices, email: &str) -> Principal {
    services
        .identity()
        .sign_up(&Credentials::new(email, "legacy2053"))
        .await
        .expect("sign up")
}

/// Mount the shell over `services` and wait for the first identity event.
pub async fn mount(services: AppServices) -> ViewHarness {
    let handles = SessionTestHandles::default();
    let dom = VirtualDom::new_with_props(
        ShellHarness,
        ShellHarnessProps {
            app: Arc::new(services.clone()),
            handles: handles.clone(),
        },
    );
    let mut harness = ViewHarness {
        dom,
        services,
        handles,
    };
    harness.rebuild();
    harness.settle().await;
    harness
}
