mod progress;
mod service;
mod store;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use progress::SessionProgress;
pub use service::{FinishReason, QuestionPrompt, QuizSession, QuizStatus, QuizStep};
pub use store::SessionStore;
pub use workflow::QuizLoopService;
