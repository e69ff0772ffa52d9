use std::fmt;

use crate::model::Question;

/// Recorded in place of the user's answer when a prompt ran out of time.
pub const TIMED_OUT_PLACEHOLDER: &str = "(no answer / timed out)";

//
// ─── ANSWER RESULT ────────────────────────────────────────────────────────────
//

/// Pass/fail outcome of one answered prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerResult {
    Correct,
    Incorrect,
    /// No answer was given before the time limit; counts as incorrect.
    TimedOut,
}

impl AnswerResult {
    /// Grade raw user input against the correct answer.
    ///
    /// Blank input is a timeout. Otherwise both sides are trimmed and
    /// compared for exact equality; case and inner whitespace matter.
    #[must_use]
    pub fn judge(user_answer: &str, correct_answer: &str) -> Self {
        let user = user_answer.trim();
        if user.is_empty() {
            Self::TimedOut
        } else if user == correct_answer.trim() {
            Self::Correct
        } else {
            Self::Incorrect
        }
    }

    #[must_use]
    pub fn is_correct(self) -> bool {
        matches!(self, Self::Correct)
    }

    /// Label shown in the results log.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Correct => "Correct",
            Self::Incorrect => "Incorrect",
            Self::TimedOut => "Timed out (incorrect)",
        }
    }
}

impl fmt::Display for AnswerResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

//
// ─── ANSWERED RECORD ──────────────────────────────────────────────────────────
//

/// One row of the session log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnsweredRecord {
    pub id: String,
    pub question_text: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub result: AnswerResult,
}

impl AnsweredRecord {
    /// Grade `user_answer` for `question` and capture the log row.
    #[must_use]
    pub fn grade(question: &Question, user_answer: &str) -> Self {
        let correct_answer = question.correct_answer();
        let result = AnswerResult::judge(user_answer, correct_answer);
        let user_answer = match result {
            AnswerResult::TimedOut => TIMED_OUT_PLACEHOLDER.to_string(),
            AnswerResult::Correct | AnswerResult::Incorrect => user_answer.trim().to_string(),
        };

        Self {
            id: question.id().to_string(),
            question_text: question.question().to_string(),
            user_answer,
            correct_answer: correct_answer.to_string(),
            result,
        }
    }

    /// Feedback to show before the next prompt.
    #[must_use]
    pub fn message(&self) -> ResultMessage {
        match self.result {
            AnswerResult::Correct => ResultMessage::Correct,
            AnswerResult::Incorrect => ResultMessage::Incorrect {
                correct_answer: self.correct_answer.clone(),
            },
            AnswerResult::TimedOut => ResultMessage::TimedOut {
                correct_answer: self.correct_answer.clone(),
            },
        }
    }
}

//
// ─── RESULT MESSAGE ───────────────────────────────────────────────────────────
//

/// Feedback for the most recent answer, displayed once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultMessage {
    Correct,
    Incorrect { correct_answer: String },
    TimedOut { correct_answer: String },
}

impl fmt::Display for ResultMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Correct => f.write_str("Correct!"),
            Self::Incorrect { correct_answer } => {
                write!(f, "Incorrect. The correct answer is '{correct_answer}'.")
            }
            Self::TimedOut { correct_answer } => {
                write!(f, "Time's up. The correct answer is '{correct_answer}'.")
            }
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
