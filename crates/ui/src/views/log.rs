use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::context::AppContext;
use crate::routes::Route;
use crate::vm::{LogRowVm, map_log_rows, score_line};

#[component]
pub fn LogView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let quiz_loop = ctx.quiz_loop();
    let key = ctx.session_key();

    let records = use_hook(move || quiz_loop.log(key).ok());

    use_effect({
        let missing = records.is_none();
        move || {
            if missing {
                let _ = navigator.replace(Route::Home {});
            }
        }
    });

    let records = records.unwrap_or_default();
    let rows = map_log_rows(&records);
    let score = score_line(&records);

    rsx! {
        div { class: "page",
            h2 { "Results" }
            p { class: "hint", id: "log-score", "{score}" }
            LogTable { rows }
            div { class: "actions",
                button {
                    id: "log-restart",
                    onclick: move |_| {
                        let _ = navigator.push(Route::Home {});
                    },
                    "Back to start"
                }
            }
        }
    }
}

#[component]
pub fn LogTable(rows: Vec<LogRowVm>) -> Element {
    if rows.is_empty() {
        return rsx! {
            p { class: "hint", "No answers recorded." }
        };
    }

    rsx! {
        table { class: "log-table",
            thead {
                tr {
                    th { "ID" }
                    th { "Question" }
                    th { "Your answer" }
                    th { "Correct answer" }
                    th { "Result" }
                }
            }
            tbody {
                for row in rows {
                    tr { key: "{row.id}", class: row.row_class,
                        td { "{row.id}" }
                        td { "{row.question}" }
                        td { "{row.user_answer}" }
                        td { "{row.correct_answer}" }
                        td { "{row.result_label}" }
                    }
                }
            }
        }
    }
}
