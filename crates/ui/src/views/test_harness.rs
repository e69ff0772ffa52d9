use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use quiz_core::model::{Catalog, Question, QuizSettings};
use quiz_core::time::fixed_now;
use services::{Clock, QuizLoopService};

use crate::context::{AppContext, UiApp, build_app_context};
use crate::views::{ConfirmQuitView, HomeView, LogView, QuizView};

struct TestApp {
    quiz_loop: Arc<QuizLoopService>,
}

impl UiApp for TestApp {
    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Quiz,
    Log,
    ConfirmQuit,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    context: AppContext,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    use_context_provider(|| props.context.clone());
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Quiz => rsx! { QuizView {} },
        ViewKind::Log => rsx! { LogView {} },
        ViewKind::ConfirmQuit => rsx! { ConfirmQuitView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub context: AppContext,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn sample_catalog() -> Arc<Catalog> {
    Arc::new(Catalog::from_questions([
        Question::new("A1_001", "Word 1?", "w1").unwrap(),
        Question::new("A1_002", "Word 2?", "w2").unwrap(),
        Question::new("B1_001", "What erupts?", "Volcano").unwrap(),
    ]))
}

/// Build a view over a fixed-clock quiz loop; `prepare` runs before the first render.
pub fn setup_view_harness(view: ViewKind, prepare: impl FnOnce(&AppContext)) -> ViewHarness {
    let quiz_loop = Arc::new(QuizLoopService::new(
        Clock::fixed(fixed_now()),
        sample_catalog(),
        QuizSettings::default(),
    ));
    let app: Arc<dyn UiApp> = Arc::new(TestApp { quiz_loop });
    let context = build_app_context(&app).expect("open session");
    prepare(&context);

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            context: context.clone(),
            view,
        },
    );

    ViewHarness { dom, context }
}
