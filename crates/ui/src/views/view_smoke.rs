use academy_core::model::{LessonId, UserId};
use serde_json::json;
use services::View;

use super::test_harness::{ADMIN_EMAIL, mount, sign_up, test_services};
use crate::vm::SessionIntent;

fn assert_contains(html: &str, needle: &str) {
    assert!(html.contains(needle), "missing {needle:?} in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn signed_out_window_shows_login_form() {
    let (services, _store) = test_services();
    let harness = mount(services).await;

    assert_eq!(harness.snapshot().view, View::Login);
    let html = harness.render();
    assert_contains(&html, "Pre Approval Academy");
    assert_contains(&html, "Sign In");
    assert_contains(&html, "Need an account? Sign Up");
}

#[tokio::test(flavor = "current_thread")]
async fn learner_lands_on_dashboard_and_opens_lesson() {
    let (services, _store) = test_services();
    sign_up(&services, "berry@example.com").await;
    let mut harness = mount(services).await;

    let html = harness.render();
    assert_contains(&html, "berry");
    assert_contains(&html, "0% Ready");
    assert_contains(&html, "The Mindset Shift");
    assert_contains(&html, "Legacy Starter");

    harness.dispatch(SessionIntent::Resume);
    harness.settle().await;
    assert_eq!(harness.snapshot().view, View::Lesson);
    let html = harness.render();
    assert_contains(&html, "Module 1");
    assert_contains(&html, "Tap to Unlock Gold Standard Rule");
    assert_contains(&html, "Complete Module");

    harness.dispatch(SessionIntent::CompleteLesson {
        id: LessonId::new(1),
        xp: 50,
    });
    harness.settle().await;
    let snapshot = harness.snapshot();
    assert_eq!(snapshot.view, View::Lesson);
    assert_eq!(snapshot.progress.xp(), 50);
    assert_contains(&harness.render(), "Module 2");
}

#[tokio::test(flavor = "current_thread")]
async fn graduate_of_lessons_takes_the_exam() {
    let (services, store) = test_services();
    let principal = sign_up(&services, "gladys@example.com").await;
    store
        .put_raw(
            &principal.uid,
            json!({
                "name": "Gladys",
                "email": "gladys@example.com",
                "progress": {
                    "completedLessons": [1, 2, 3, 4, 5, 6, 7, 8, 9, 10],
                    "xp": 500,
                    "quizPassed": false,
                    "currentLessonIndex": 9
                }
            }),
        )
        .unwrap();
    let mut harness = mount(services).await;

    let html = harness.render();
    assert_contains(&html, "100% Ready");
    assert_contains(&html, "Curriculum Complete!");
    assert_contains(&html, "Take Final Exam");
    assert_contains(&html, "Review Modules");

    harness.dispatch(SessionIntent::Resume);
    harness.settle().await;
    assert_eq!(harness.snapshot().view, View::Quiz);
    let html = harness.render();
    assert_contains(&html, "Question 1 of 10");
    assert_contains(&html, "Potential XP: +10");

    harness.dispatch(SessionIntent::Answer(1));
    harness.settle().await;
    let snapshot = harness.snapshot();
    assert_eq!(snapshot.quiz.score(), 1);
    assert_eq!(snapshot.progress.xp(), 510);
    let html = harness.render();
    assert_contains(&html, "option-correct");
    assert_contains(&html, "Next Question");
}

#[tokio::test(flavor = "current_thread")]
async fn rejected_intent_shows_banner_and_changes_nothing() {
    let (services, _store) = test_services();
    sign_up(&services, "smokey@example.com").await;
    let mut harness = mount(services).await;
    let before = harness.snapshot();

    harness.dispatch(SessionIntent::NextQuestion);
    harness.settle().await;
    assert_eq!(harness.snapshot(), before);
    assert_contains(&harness.render(), "That action is not available right now.");
}

#[tokio::test(flavor = "current_thread")]
async fn admin_sees_roster() {
    let (services, store) = test_services();
    store
        .put_raw(
            &UserId::new("student-1"),
            json!({
                "name": "Marvin",
                "email": "marvin@example.com",
                "progress": { "completedLessons": [1, 2], "xp": 100 }
            }),
        )
        .unwrap();
    sign_up(&services, ADMIN_EMAIL).await;
    let harness = mount(services).await;

    assert_eq!(harness.snapshot().view, View::Admin);
    let html = harness.render();
    assert_contains(&html, "Admin Dashboard");
    assert_contains(&html, "Marvin");
    assert_contains(&html, "Learning");
    assert_contains(&html, "width: 20%");
}

#[tokio::test(flavor = "current_thread")]
async fn sign_out_returns_to_login() {
    let (services, _store) = test_services();
    sign_up(&services, "diana@example.com").await;
    let mut harness = mount(services).await;
    assert_eq!(harness.snapshot().view, View::Dashboard);

    harness.dispatch(SessionIntent::SignOut);
    harness.settle().await;
    assert_eq!(harness.snapshot().view, View::Login);
    assert!(harness.services.identity().subscribe().next().await.unwrap().is_none());
    assert_contains(&harness.render(), "Sign In");
}
