use dioxus::prelude::*;

use super::shell::{ErrorBanner, SessionHandle};
use crate::vm::{SessionIntent, map_roster};

#[component]
pub fn AdminView() -> Element {
    let session = use_context::<SessionHandle>();
    let dispatch = session.dispatch;
    let vm = map_roster(&session.snapshot.read().roster);

    rsx! {
        div { class: "page admin",
            header { class: "admin-header",
                h1 { "Admin Dashboard" }
                p { class: "muted", "{vm.summary()}" }
                button {
                    class: "btn btn-ghost",
                    onclick: move |_| dispatch.call(SessionIntent::SignOut),
                    "Logout"
                }
            }
            ErrorBanner {}
            if vm.rows.is_empty() {
                p { class: "empty", "No students yet." }
            } else {
                table { class: "roster",
                    thead {
                        tr {
                            th { "Student" }
                            th { "XP" }
                            th { "Progress" }
                            th { "Status" }
                        }
                    }
                    tbody {
                        for row in vm.rows.iter().cloned() {
                            tr { key: "{row.uid}",
                                td {
                                    p { class: "student-name", "{row.name}" }
                                    p { class: "muted", "{row.email}" }
                                }
                                td { "{row.xp}" }
                                td {
                                    div { class: "bar",
                                        div { class: "bar-fill", style: "{row.bar_style()}" }
                                    }
                                }
                                td {
                                    span { class: "{row.status_class()}", "{row.status}" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
