use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::ViewError;
use crate::vm::{LoginForm, submit_login};

#[component]
pub fn LoginView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut form = use_signal(LoginForm::default);
    let mut busy = use_signal(|| false);
    let mut error = use_signal(|| None::<ViewError>);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if busy() {
            return;
        }
        let identity = ctx.identity();
        let submitted = form.read().clone();
        busy.set(true);
        error.set(None);
        spawn(async move {
            if let Err(err) = submit_login(identity.as_ref(), &submitted).await {
                error.set(Some(err));
            }
            busy.set(false);
        });
    };

    let current = form.read().clone();
    let mode = current.mode;
    let submit_label = mode.submit_label(busy());

    rsx! {
        div { class: "page login",
            div { class: "card login-card",
                header { class: "login-header",
                    h1 { "Pre Approval Academy" }
                    p { class: "tagline", "\"Ownership is YOUR Legacy\"" }
                }
                if let Some(err) = error() {
                    div { class: "banner banner-error", role: "alert", "{err.message()}" }
                }
                form { class: "login-form", onsubmit: on_submit,
                    if mode.asks_for_name() {
                        input {
                            r#type: "text",
                            placeholder: "Full Name",
                            value: "{current.name}",
                            oninput: move |evt| form.write().name = evt.value(),
                        }
                    }
                    input {
                        r#type: "email",
                        placeholder: "Email Address",
                        required: true,
                        value: "{current.email}",
                        oninput: move |evt| form.write().email = evt.value(),
                    }
                    input {
                        r#type: "password",
                        placeholder: "Password",
                        required: true,
                        value: "{current.password}",
                        oninput: move |evt| form.write().password = evt.value(),
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: busy(),
                        "{submit_label}"
                    }
                }
                button {
                    class: "btn btn-link",
                    r#type: "button",
                    onclick: move |_| {
                        let next = form.read().mode.toggled();
                        form.write().mode = next;
                        error.set(None);
                    },
                    "{mode.toggle_label()}"
                }
            }
        }
    }
}
