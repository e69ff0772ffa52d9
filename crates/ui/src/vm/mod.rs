mod log_vm;
mod quiz_vm;

pub use log_vm::{LogRowVm, map_log_rows, score_line};
pub use quiz_vm::{
    FeedbackVm, MessageTone, PromptVm, QuizScreen, format_countdown, start_error_message,
};
