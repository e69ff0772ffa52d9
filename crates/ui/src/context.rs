use std::sync::{Arc, Mutex};

use quiz_core::model::SessionKey;
use services::{QuizError, QuizLoopService};

pub trait UiApp: Send + Sync {
    fn quiz_loop(&self) -> Arc<QuizLoopService>;
}

/// Services and the quiz session shared by every view of one window.
#[derive(Clone)]
pub struct AppContext {
    quiz_loop: Arc<QuizLoopService>,
    session_key: SessionKey,
    flash: Arc<Mutex<Option<String>>>,
}

impl AppContext {
    /// Open a quiz session for this window.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` if the session store cannot open a session.
    pub fn new(app: &Arc<dyn UiApp>) -> Result<Self, QuizError> {
        let quiz_loop = app.quiz_loop();
        let session_key = quiz_loop.open_session()?;
        Ok(Self {
            quiz_loop,
            session_key,
            flash: Arc::new(Mutex::new(None)),
        })
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    #[must_use]
    pub fn session_key(&self) -> SessionKey {
        self.session_key
    }

    /// Leave a one-shot message for the start screen.
    pub fn set_flash(&self, message: impl Into<String>) {
        if let Ok(mut guard) = self.flash.lock() {
            *guard = Some(message.into());
        }
    }

    /// Take the pending start-screen message, if any.
    #[must_use]
    pub fn take_flash(&self) -> Option<String> {
        self.flash.lock().ok().and_then(|mut guard| guard.take())
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
///
/// # Errors
///
/// Returns `QuizError` if no session can be opened.
pub fn build_app_context(app: &Arc<dyn UiApp>) -> Result<AppContext, QuizError> {
    AppContext::new(app)
}
