use dioxus::prelude::*;
use dioxus_router::use_navigator;
use tracing::warn;

use crate::context::AppContext;
use crate::routes::Route;
use crate::vm::start_error_message;

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let quiz_loop = ctx.quiz_loop();
    let key = ctx.session_key();

    // Returning to the start screen abandons whatever quiz was running.
    let flash = use_hook({
        let ctx = ctx.clone();
        let quiz_loop = quiz_loop.clone();
        move || {
            if let Err(err) = quiz_loop.quit(key) {
                warn!(error = %err, "could not reset quiz session");
            }
            ctx.take_flash()
        }
    });

    let mut range = use_signal(String::new);
    let mut error = use_signal(|| flash);

    let question_count = quiz_loop.catalog().len();
    let time_limit = quiz_loop.settings().time_limit_secs();

    let on_submit = {
        let quiz_loop = quiz_loop.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let input = range.read().clone();
            match quiz_loop.begin(key, &input) {
                Ok(_) => {
                    error.set(None);
                    let _ = navigator.push(Route::Quiz {});
                }
                Err(err) => error.set(Some(start_error_message(&err))),
            }
        }
    };

    rsx! {
        div { class: "page",
            h2 { "Start a quiz" }
            p { class: "hint",
                "{question_count} questions loaded, {time_limit} seconds per question."
            }
            if let Some(message) = error() {
                p { class: "error", id: "start-error", "{message}" }
            }
            form { onsubmit: on_submit,
                label { r#for: "range", "Question range or keywords" }
                input {
                    id: "range",
                    r#type: "text",
                    placeholder: "A1_001-A1_050, volcano",
                    value: "{range}",
                    oninput: move |evt| range.set(evt.value()),
                }
                p { class: "hint",
                    "Leave empty for every question. Separate ranges and keywords with commas."
                }
                button { r#type: "submit", id: "start-quiz", "Start" }
            }
        }
    }
}
