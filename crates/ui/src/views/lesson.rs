use academy_core::model::LessonId;
use dioxus::prelude::*;

use super::shell::{ErrorBanner, SessionHandle};
use crate::vm::{SessionIntent, map_lesson};

#[component]
pub fn LessonView() -> Element {
    let session = use_context::<SessionHandle>();
    let dispatch = session.dispatch;
    // The tip is revealed per lesson; moving on hides it again.
    let mut revealed_tip = use_signal(|| None::<LessonId>);

    let Some(vm) = map_lesson(&session.snapshot.read()) else {
        return rsx! {
            div { class: "page lesson",
                p { "This module is not available." }
                button {
                    class: "btn btn-ghost",
                    onclick: move |_| dispatch.call(SessionIntent::BackToDashboard),
                    "Back"
                }
            }
        };
    };
    let lesson_id = vm.id;
    let show_tip = revealed_tip() == Some(lesson_id);
    let complete = vm.complete_intent();

    rsx! {
        div { class: "page lesson",
            button {
                class: "btn btn-ghost back",
                onclick: move |_| dispatch.call(SessionIntent::BackToDashboard),
                "Back"
            }
            ErrorBanner {}
            article { class: "card lesson-card",
                header { class: "lesson-header",
                    span { class: "eyebrow", "{vm.module_label}" }
                    if vm.reviewing {
                        span { class: "pill", "Review" }
                    }
                    h2 { "{vm.title}" }
                    p { class: "subtitle", "{vm.subtitle}" }
                }
                section { class: "objective",
                    h3 { "Objective" }
                    p { "{vm.objective}" }
                }
                ul { class: "points",
                    for point in vm.points.iter() {
                        li { "{point}" }
                    }
                }
                section { class: "case-study",
                    h3 { "{vm.case_heading}" }
                    p { class: "scenario", "\"{vm.case_scenario}\"" }
                    div { class: "case-lesson",
                        p { class: "eyebrow", "The Lesson" }
                        p { "{vm.case_lesson}" }
                    }
                }
                section { class: "gold-tip",
                    if show_tip {
                        div { class: "tip-revealed",
                            span { class: "eyebrow", "Gold Standard Rule" }
                            p { "\"{vm.gold_tip}\"" }
                        }
                    } else {
                        button {
                            class: "btn btn-outline",
                            onclick: move |_| revealed_tip.set(Some(lesson_id)),
                            "Tap to Unlock Gold Standard Rule"
                        }
                    }
                }
                footer { class: "lesson-footer",
                    button {
                        class: "btn btn-primary",
                        onclick: move |_| dispatch.call(complete),
                        "Complete Module"
                    }
                }
            }
        }
    }
}
