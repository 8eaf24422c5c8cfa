use dioxus::prelude::*;

use super::shell::{ErrorBanner, SessionHandle};
use crate::vm::{QuestionVm, QuizResultVm, QuizVm, SessionIntent, map_quiz};

#[component]
pub fn QuizView() -> Element {
    let session = use_context::<SessionHandle>();
    let dispatch = session.dispatch;
    let vm = map_quiz(&session.snapshot.read());

    match vm {
        Some(QuizVm::Question(question)) => rsx! {
            QuestionCard { question, dispatch }
        },
        Some(QuizVm::Result(result)) => rsx! {
            ResultCard { result, dispatch }
        },
        None => rsx! {
            div { class: "page quiz",
                p { "The exam is not available." }
                button {
                    class: "btn btn-ghost",
                    onclick: move |_| dispatch.call(SessionIntent::BackToDashboard),
                    "Back"
                }
            }
        },
    }
}

#[component]
fn QuestionCard(question: QuestionVm, dispatch: Callback<SessionIntent>) -> Element {
    rsx! {
        div { class: "page quiz",
            button {
                class: "btn btn-ghost back",
                onclick: move |_| dispatch.call(SessionIntent::BackToDashboard),
                "Back"
            }
            ErrorBanner {}
            div { class: "card quiz-card",
                header { class: "quiz-header",
                    span { class: "eyebrow", "{question.heading}" }
                    span { class: "xp-hint", "{question.xp_hint}" }
                }
                section { class: "scenario",
                    h3 { "Real-World Scenario" }
                    p { "\"{question.story}\"" }
                }
                h2 { class: "prompt", "{question.prompt}" }
                div { class: "options",
                    for option in question.options.iter().cloned() {
                        button {
                            key: "{option.index}",
                            class: "{option.status.class()}",
                            disabled: option.disabled,
                            onclick: move |_| dispatch.call(SessionIntent::Answer(option.index)),
                            span { "{option.label}" }
                        }
                    }
                }
                if let Some(label) = question.next_label {
                    div { class: "quiz-footer",
                        button {
                            class: "btn btn-primary",
                            onclick: move |_| dispatch.call(SessionIntent::NextQuestion),
                            "{label}"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ResultCard(result: QuizResultVm, dispatch: Callback<SessionIntent>) -> Element {
    let outcome_class = if result.passed { "result result-pass" } else { "result result-fail" };
    rsx! {
        div { class: "page quiz",
            div { class: "card result-card",
                h2 { "Assessment Complete" }
                p { class: "score",
                    "You scored "
                    span { class: "score-value", "{result.score}" }
                    " / {result.total}"
                }
                div { class: "{outcome_class}",
                    p { class: "result-headline", "{result.headline()}" }
                    p { "{result.detail()}" }
                }
                button {
                    class: "btn btn-primary",
                    onclick: move |_| dispatch.call(SessionIntent::BackToDashboard),
                    "Return to Dashboard"
                }
            }
        }
    }
}
