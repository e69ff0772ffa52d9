use std::sync::Arc;

use quiz_core::model::{AnsweredRecord, Catalog, QuizSettings, SessionKey};
use quiz_core::select;
use tracing::{debug, info};

use super::progress::SessionProgress;
use super::service::{FinishReason, QuizStatus, QuizStep};
use super::store::SessionStore;
use crate::Clock;
use crate::error::QuizError;

/// Orchestrates the quiz screens: start, answer, timeout, results, quit.
///
/// The catalog is loaded once and shared read-only by every session.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    catalog: Arc<Catalog>,
    settings: QuizSettings,
    sessions: SessionStore,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(clock: Clock, catalog: Arc<Catalog>, settings: QuizSettings) -> Self {
        Self {
            clock,
            catalog,
            settings,
            sessions: SessionStore::new(),
        }
    }

    /// Same sessions, different clock.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn settings(&self) -> QuizSettings {
        self.settings
    }

    /// Open a new, not-started session.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::StorePoisoned` if the session store is unusable.
    pub fn open_session(&self) -> Result<SessionKey, QuizError> {
        let key = self.sessions.open(Arc::clone(&self.catalog))?;
        debug!(session = %key, open = self.sessions.len()?, "session opened");
        Ok(key)
    }

    /// Drop a session entirely.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::StorePoisoned` if the session store is unusable.
    pub fn close_session(&self, key: SessionKey) -> Result<bool, QuizError> {
        let closed = self.sessions.close(key)?;
        debug!(session = %key, closed, open = self.sessions.len()?, "session closed");
        Ok(closed)
    }

    /// Select questions from `raw_input` and start a new quiz.
    ///
    /// Any previous quiz in the session is discarded first. Returns the
    /// number of questions in the quiz.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Selection` for malformed ranges or empty results,
    /// and `QuizError::UnknownSession` for unknown keys.
    pub fn begin(&self, key: SessionKey, raw_input: &str) -> Result<usize, QuizError> {
        let now = self.clock.unix_seconds();
        self.sessions.with_session(key, |session| {
            session.reset();
            let ids = select(&self.catalog, raw_input)?;
            session.start(ids, now)?;
            info!(%key, input = raw_input, questions = session.total(), "quiz begun");
            Ok(session.total())
        })?
    }

    /// Current question or end-of-quiz for the session.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Session` with `InvalidState` when no quiz is running.
    pub fn current(&self, key: SessionKey) -> Result<QuizStep, QuizError> {
        let now = self.clock.unix_seconds();
        Ok(self
            .sessions
            .with_session(key, |session| session.current_question(now))??)
    }

    /// Submit an answer for the current question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Session` with `InvalidState` when nothing is left to answer.
    pub fn answer(&self, key: SessionKey, text: &str) -> Result<AnsweredRecord, QuizError> {
        let now = self.clock.unix_seconds();
        Ok(self
            .sessions
            .with_session(key, |session| session.submit_answer(text, now))??)
    }

    /// Record a timeout if the current prompt ran past the configured limit.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Session` with `InvalidState` when no quiz is running.
    pub fn poll_timeout(&self, key: SessionKey) -> Result<Option<AnsweredRecord>, QuizError> {
        let now = self.clock.unix_seconds();
        let limit = self.settings.time_limit_secs();
        Ok(self
            .sessions
            .with_session(key, |session| session.timeout_check(now, limit))??)
    }

    /// Whole seconds left on the current prompt's countdown.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::UnknownSession` for unknown keys.
    pub fn seconds_remaining(&self, key: SessionKey) -> Result<u32, QuizError> {
        let now = self.clock.unix_seconds();
        let limit = i64::from(self.settings.time_limit_secs());
        self.sessions.with_session(key, |session| {
            let elapsed = now.saturating_sub(session.last_prompt_at()).max(0);
            u32::try_from((limit - elapsed).max(0)).unwrap_or(0)
        })
    }

    /// Stop the quiz and keep the log for the results screen.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Session` with `InvalidState` if no quiz was started.
    pub fn show_results(&self, key: SessionKey) -> Result<(), QuizError> {
        Ok(self
            .sessions
            .with_session(key, |session| session.finish_now(FinishReason::ShowResults))??)
    }

    /// Abandon the quiz and clear the session.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::UnknownSession` for unknown keys.
    pub fn quit(&self, key: SessionKey) -> Result<(), QuizError> {
        self.sessions.with_session(key, |session| {
            if session.status() != QuizStatus::NotStarted {
                info!(%key, answered = session.log().len(), "quiz abandoned");
            }
            session.reset();
        })
    }

    /// Answered records so far, in answer order.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::UnknownSession` for unknown keys.
    pub fn log(&self, key: SessionKey) -> Result<Vec<AnsweredRecord>, QuizError> {
        self.sessions.with_session(key, |session| session.log().to_vec())
    }

    /// # Errors
    ///
    /// Returns `QuizError::UnknownSession` for unknown keys.
    pub fn progress(&self, key: SessionKey) -> Result<SessionProgress, QuizError> {
        self.sessions.with_session(key, |session| session.progress())
    }

    /// # Errors
    ///
    /// Returns `QuizError::UnknownSession` for unknown keys.
    pub fn status(&self, key: SessionKey) -> Result<QuizStatus, QuizError> {
        self.sessions.with_session(key, |session| session.status())
    }
}
