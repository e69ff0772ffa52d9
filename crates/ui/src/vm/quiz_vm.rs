use quiz_core::model::ResultMessage;
use quiz_core::SelectionError;
use services::{QuestionPrompt, QuizError, QuizStep};

/// Visual tone of the previous answer's feedback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageTone {
    Correct,
    Incorrect,
    TimedOut,
}

impl MessageTone {
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Correct => "result correct",
            Self::Incorrect => "result incorrect",
            Self::TimedOut => "result timed-out",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub text: String,
    pub tone: MessageTone,
}

impl From<&ResultMessage> for FeedbackVm {
    fn from(message: &ResultMessage) -> Self {
        let tone = match message {
            ResultMessage::Correct => MessageTone::Correct,
            ResultMessage::Incorrect { .. } => MessageTone::Incorrect,
            ResultMessage::TimedOut { .. } => MessageTone::TimedOut,
        };
        Self {
            text: message.to_string(),
            tone,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptVm {
    pub id: String,
    pub question: String,
    pub progress_str: String,
    pub feedback: Option<FeedbackVm>,
}

impl From<&QuestionPrompt> for PromptVm {
    fn from(prompt: &QuestionPrompt) -> Self {
        Self {
            id: prompt.question.id().to_string(),
            question: prompt.question.question().to_string(),
            progress_str: format!("Question {} / {}", prompt.number, prompt.total),
            feedback: prompt.message.as_ref().map(FeedbackVm::from),
        }
    }
}

/// What the quiz screen should show for the session's current step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizScreen {
    Prompt(PromptVm),
    /// The quiz ended; go to the log.
    Finished,
    /// No quiz is running; go back to the start screen.
    Redirect,
    /// Something unexpected failed.
    Failed,
}

impl QuizScreen {
    #[must_use]
    pub fn from_step(step: Result<QuizStep, QuizError>) -> Self {
        match step {
            Ok(QuizStep::Prompt(prompt)) => Self::Prompt(PromptVm::from(&prompt)),
            Ok(QuizStep::Finished { .. }) => Self::Finished,
            Err(err) if err.is_navigation() => Self::Redirect,
            Err(_) => Self::Failed,
        }
    }
}

#[must_use]
pub fn format_countdown(seconds: u32) -> String {
    let minutes = seconds / 60;
    let remainder = seconds % 60;
    format!("Time left: {minutes}:{remainder:02}")
}

/// Message shown on the start screen when a quiz could not begin.
#[must_use]
pub fn start_error_message(err: &QuizError) -> String {
    match err {
        QuizError::Selection(SelectionError::NoMatches { input }) => {
            format!("No questions match '{input}'.")
        }
        QuizError::Selection(err) => err.to_string(),
        _ => "Could not start the quiz. Please try again.".to_string(),
    }
}
