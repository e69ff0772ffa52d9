//! Shared error types for the services crate.

use quiz_core::model::SessionKey;
use quiz_core::SelectionError;
use storage::repository::StorageError;
use thiserror::Error;

use crate::sessions::QuizStatus;

/// Errors emitted by `QuizSession` transitions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("cannot start a quiz with no questions")]
    EmptySelection,
    #[error("{operation} is not valid while the quiz is {status}")]
    InvalidState {
        operation: &'static str,
        status: QuizStatus,
    },
}

/// Errors emitted by `QuizLoopService`.
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum QuizError {
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("unknown session {0}")]
    UnknownSession(SessionKey),
    #[error("session store lock poisoned")]
    StorePoisoned,
}

impl QuizError {
    /// True for errors the caller should answer by returning to the start screen.
    #[must_use]
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Self::Session(SessionError::InvalidState { .. }) | Self::UnknownSession(_)
        )
    }
}

/// Errors emitted by `CatalogService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogLoadError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("catalog contains no usable questions")]
    Empty,
}
