use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable};

use crate::views::{ConfirmQuitView, HomeView, LogView, QuizView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/quiz", QuizView)] Quiz {},
        #[route("/log", LogView)] Log {},
        #[route("/confirm-quit", ConfirmQuitView)] ConfirmQuit {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            header { class: "topbar",
                h1 { "Quiz" }
            }
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}
