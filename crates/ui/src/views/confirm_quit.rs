use dioxus::prelude::*;
use dioxus_router::use_navigator;
use tracing::warn;

use crate::context::AppContext;
use crate::routes::Route;

#[component]
pub fn ConfirmQuitView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let quiz_loop = ctx.quiz_loop();
    let key = ctx.session_key();

    let on_show_results = {
        let quiz_loop = quiz_loop.clone();
        move |_: MouseEvent| match quiz_loop.show_results(key) {
            Ok(()) => {
                let _ = navigator.push(Route::Log {});
            }
            Err(err) => {
                warn!(error = %err, "could not finish quiz");
                let _ = navigator.push(Route::Home {});
            }
        }
    };

    let on_quit = move |_: MouseEvent| {
        if let Err(err) = quiz_loop.quit(key) {
            warn!(error = %err, "could not reset quiz session");
        }
        let _ = navigator.push(Route::Home {});
    };

    rsx! {
        div { class: "page",
            h2 { "Quit the quiz?" }
            p { "You can review the answers so far, or quit without results." }
            div { class: "actions",
                button { id: "quit-show-results", onclick: on_show_results, "Show results" }
                button { id: "quit-confirm", onclick: on_quit, "Quit" }
                button {
                    id: "quit-cancel",
                    onclick: move |_| {
                        let _ = navigator.push(Route::Quiz {});
                    },
                    "Keep going"
                }
            }
        }
    }
}
