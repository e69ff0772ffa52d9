#![forbid(unsafe_code)]

pub mod catalog_service;
pub mod error;
pub mod sessions;

pub use quiz_core::Clock;
pub use sessions as session;

pub use catalog_service::{CatalogService, LoadedCatalog};
pub use error::{CatalogLoadError, QuizError, SessionError};

pub use sessions::{
    FinishReason, QuestionPrompt, QuizLoopService, QuizSession, QuizStatus, QuizStep,
    SessionProgress, SessionStore,
};
