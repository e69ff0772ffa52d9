use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question id cannot be empty")]
    BlankId,
}

/// A single catalog entry: an opaque id with question and answer text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: String,
    question: String,
    answer: String,
}

impl Question {
    /// Creates a question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::BlankId` if the id is empty or whitespace-only.
    pub fn new(
        id: impl Into<String>,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(QuestionError::BlankId);
        }
        Ok(Self {
            id,
            question: question.into(),
            answer: answer.into(),
        })
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// The answer as it is compared against user input.
    #[must_use]
    pub fn correct_answer(&self) -> &str {
        self.answer.trim()
    }
}
