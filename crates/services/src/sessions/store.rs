use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use quiz_core::model::{Catalog, SessionKey};

use super::service::QuizSession;
use crate::error::QuizError;

/// Quiz sessions addressed by key, one isolated `QuizSession` per key.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<SessionKey, QuizSession>>>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fresh, not-started session and return its key.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::StorePoisoned` if the store lock is poisoned.
    pub fn open(&self, catalog: Arc<Catalog>) -> Result<SessionKey, QuizError> {
        let key = SessionKey::generate();
        let mut guard = self.sessions.lock().map_err(|_| QuizError::StorePoisoned)?;
        guard.insert(key, QuizSession::new(catalog));
        Ok(key)
    }

    /// Run `f` against the session for `key` while holding the store lock.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::UnknownSession` for keys that were never opened or
    /// were closed, and `QuizError::StorePoisoned` if the lock is poisoned.
    pub fn with_session<T>(
        &self,
        key: SessionKey,
        f: impl FnOnce(&mut QuizSession) -> T,
    ) -> Result<T, QuizError> {
        let mut guard = self.sessions.lock().map_err(|_| QuizError::StorePoisoned)?;
        let session = guard.get_mut(&key).ok_or(QuizError::UnknownSession(key))?;
        Ok(f(session))
    }

    /// Drop the session for `key`. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::StorePoisoned` if the store lock is poisoned.
    pub fn close(&self, key: SessionKey) -> Result<bool, QuizError> {
        let mut guard = self.sessions.lock().map_err(|_| QuizError::StorePoisoned)?;
        Ok(guard.remove(&key).is_some())
    }

    /// Number of open sessions.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::StorePoisoned` if the store lock is poisoned.
    pub fn len(&self) -> Result<usize, QuizError> {
        let guard = self.sessions.lock().map_err(|_| QuizError::StorePoisoned)?;
        Ok(guard.len())
    }
}
