use services::QuizStatus;

use super::test_harness::{ViewKind, setup_view_harness};

#[tokio::test(flavor = "current_thread")]
async fn home_view_renders_catalog_summary() {
    let mut harness = setup_view_harness(ViewKind::Home, |_| {});
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("3 questions loaded"), "{html}");
    assert!(html.contains("10 seconds per question"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_shows_flash_once_and_resets_quiz() {
    let mut harness = setup_view_harness(ViewKind::Home, |ctx| {
        ctx.quiz_loop().begin(ctx.session_key(), "").unwrap();
        ctx.set_flash("Start a quiz first.");
    });
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Start a quiz first."), "{html}");

    let ctx = &harness.context;
    assert_eq!(
        ctx.quiz_loop().status(ctx.session_key()).unwrap(),
        QuizStatus::NotStarted
    );
    assert_eq!(ctx.take_flash(), None);
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_renders_current_prompt() {
    let mut harness = setup_view_harness(ViewKind::Quiz, |ctx| {
        ctx.quiz_loop().begin(ctx.session_key(), "B1_001").unwrap();
    });
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Question 1 / 1"), "{html}");
    assert!(html.contains("What erupts?"), "{html}");
    assert!(html.contains("Time left: 0:10"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_shows_previous_result() {
    let mut harness = setup_view_harness(ViewKind::Quiz, |ctx| {
        let quiz_loop = ctx.quiz_loop();
        let key = ctx.session_key();
        quiz_loop.begin(key, "A1_001-A1_002").unwrap();
        quiz_loop.answer(key, "definitely wrong").unwrap();
    });
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Question 2 / 2"), "{html}");
    assert!(html.contains("Incorrect. The correct answer is"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn log_view_renders_answers_and_score() {
    let mut harness = setup_view_harness(ViewKind::Log, |ctx| {
        let quiz_loop = ctx.quiz_loop();
        let key = ctx.session_key();
        quiz_loop.begin(key, "B1_001").unwrap();
        quiz_loop.answer(key, "Volcano").unwrap();
        let _ = quiz_loop.current(key).unwrap();
    });
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("1 / 1 correct"), "{html}");
    assert!(html.contains("What erupts?"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn confirm_quit_view_offers_both_actions() {
    let mut harness = setup_view_harness(ViewKind::ConfirmQuit, |ctx| {
        ctx.quiz_loop().begin(ctx.session_key(), "").unwrap();
    });
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Show results"), "{html}");
    assert!(html.contains("Keep going"), "{html}");
}
