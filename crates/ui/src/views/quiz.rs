use std::time::Duration;

use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use tracing::{debug, warn};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::ViewError;
use crate::vm::{QuizScreen, format_countdown};

const URGENT_SECS: u32 = 3;

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let quiz_loop = ctx.quiz_loop();
    let key = ctx.session_key();

    let mut screen = use_signal({
        let quiz_loop = quiz_loop.clone();
        move || QuizScreen::from_step(quiz_loop.current(key))
    });
    let remaining = use_signal({
        let quiz_loop = quiz_loop.clone();
        move || quiz_loop.seconds_remaining(key).unwrap_or(0)
    });
    let mut answer = use_signal(String::new);

    use_effect({
        let ctx = ctx.clone();
        move || match *screen.read() {
            QuizScreen::Finished => {
                let _ = navigator.replace(Route::Log {});
            }
            QuizScreen::Redirect => {
                ctx.set_flash("Start a quiz first.");
                let _ = navigator.replace(Route::Home {});
            }
            QuizScreen::Prompt(_) | QuizScreen::Failed => {}
        }
    });

    let advance = {
        let quiz_loop = quiz_loop.clone();
        use_callback(move |()| {
            let mut remaining = remaining;
            let next = QuizScreen::from_step(quiz_loop.current(key));
            remaining.set(quiz_loop.seconds_remaining(key).unwrap_or(0));
            answer.set(String::new());
            screen.set(next);
        })
    };

    let submit = {
        let quiz_loop = quiz_loop.clone();
        use_callback(move |text: String| {
            match quiz_loop.answer(key, &text) {
                Ok(record) => debug!(id = %record.id, result = %record.result, "answer submitted"),
                Err(err) if err.is_navigation() => {}
                Err(err) => warn!(error = %err, "answer failed"),
            }
            advance.call(());
        })
    };

    // Client countdown, with the server-side timeout as a backstop.
    use_future({
        let quiz_loop = quiz_loop.clone();
        move || {
            let quiz_loop = quiz_loop.clone();
            let mut remaining = remaining;
            async move {
                loop {
                    tokio::time::sleep(Duration::from_secs(1)).await;
                    if !matches!(*screen.peek(), QuizScreen::Prompt(_)) {
                        continue;
                    }
                    match quiz_loop.poll_timeout(key) {
                        Ok(Some(_)) => {
                            advance.call(());
                            continue;
                        }
                        Ok(None) => {}
                        Err(_) => {
                            advance.call(());
                            break;
                        }
                    }
                    let secs = quiz_loop.seconds_remaining(key).unwrap_or(0);
                    remaining.set(secs);
                    if secs == 0 {
                        submit.call(String::new());
                    }
                }
            }
        }
    });

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let text = answer.read().clone();
        submit.call(text);
    };

    let secs = remaining();
    let countdown = format_countdown(secs);
    let countdown_class = if secs <= URGENT_SECS {
        "countdown urgent"
    } else {
        "countdown"
    };
    let failed_message = ViewError::Unknown.message();
    let current = screen.read().clone();

    rsx! {
        div { class: "page",
            match current {
                QuizScreen::Prompt(prompt) => rsx! {
                    p { class: "hint", id: "quiz-progress", "{prompt.progress_str}" }
                    if let Some(feedback) = prompt.feedback {
                        div { class: feedback.tone.css_class(), id: "quiz-feedback", "{feedback.text}" }
                    }
                    p { class: "question-text", id: "quiz-question", "{prompt.question}" }
                    p { class: countdown_class, id: "quiz-countdown", "{countdown}" }
                    form { onsubmit: on_submit,
                        input {
                            id: "quiz-answer",
                            r#type: "text",
                            autofocus: true,
                            autocomplete: "off",
                            value: "{answer}",
                            oninput: move |evt| answer.set(evt.value()),
                        }
                        div { class: "actions",
                            button { r#type: "submit", id: "quiz-submit", "Answer" }
                            button {
                                r#type: "button",
                                id: "quiz-quit",
                                onclick: move |_| {
                                    let _ = navigator.push(Route::ConfirmQuit {});
                                },
                                "Quit"
                            }
                        }
                    }
                },
                QuizScreen::Failed => rsx! {
                    p { class: "error", "{failed_message}" }
                    Link { to: Route::Home {}, "Back to start" }
                },
                QuizScreen::Finished | QuizScreen::Redirect => rsx! {
                    p { "Loading..." }
                },
            }
        }
    }
}
