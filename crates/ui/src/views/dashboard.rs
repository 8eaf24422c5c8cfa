use dioxus::prelude::*;

use super::shell::{ErrorBanner, SessionHandle};
use crate::vm::{SessionIntent, map_dashboard};

#[component]
pub fn DashboardView() -> Element {
    let session = use_context::<SessionHandle>();
    let dispatch = session.dispatch;
    let vm = map_dashboard(&session.snapshot.read());

    rsx! {
        div { class: "page dashboard",
            nav { class: "topbar",
                div { class: "identity",
                    if let Some(photo) = vm.photo.clone() {
                        img { class: "avatar", src: "{photo}", alt: "Profile" }
                    } else {
                        div { class: "avatar avatar-initial", "{vm.initial}" }
                    }
                    div {
                        h2 { "{vm.name}" }
                        p { class: "muted", "{vm.xp_label()}" }
                    }
                }
                button {
                    class: "btn btn-ghost",
                    onclick: move |_| dispatch.call(SessionIntent::SignOut),
                    "Sign Out"
                }
            }
            ErrorBanner {}
            section { class: "badges",
                for badge in vm.badges.iter().cloned() {
                    div { key: "{badge.slug}", class: "{badge.css_class()}",
                        p { class: "badge-name", "{badge.name}" }
                        p { class: "badge-threshold", "{badge.threshold} XP" }
                    }
                }
            }
            section { class: "card path",
                header { class: "card-header",
                    h3 { "Your Path" }
                    span { class: "pill", "{vm.percent_ready}% Ready" }
                }
                if vm.course_complete {
                    div { class: "exam",
                        h4 { "{vm.exam_heading()}" }
                        if vm.certified {
                            div { class: "certified", "Certified Mortgage Ready" }
                        } else {
                            button {
                                class: "btn btn-gold",
                                onclick: move |_| dispatch.call(SessionIntent::Resume),
                                "{vm.exam_button_label()}"
                            }
                        }
                    }
                } else {
                    div { class: "continue",
                        h4 { "Continue Learning" }
                        if let Some(title) = vm.up_next {
                            p { "Up Next: " strong { "{title}" } }
                        }
                        div { class: "bar",
                            div { class: "bar-fill", style: "width: {vm.percent_ready}%" }
                        }
                        button {
                            class: "btn btn-primary",
                            onclick: move |_| dispatch.call(SessionIntent::Resume),
                            "Resume"
                        }
                    }
                }
            }
            if !vm.review.is_empty() {
                section { class: "card review",
                    h3 { "Review Modules" }
                    div { class: "review-grid",
                        for item in vm.review.iter().cloned() {
                            button {
                                key: "{item.id}",
                                class: "review-item",
                                onclick: move |_| dispatch.call(SessionIntent::Review(item.id)),
                                span { class: "muted", "{item.module_label}" }
                                p { "{item.title}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
