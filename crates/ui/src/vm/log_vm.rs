use quiz_core::model::{AnswerResult, AnsweredRecord};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogRowVm {
    pub id: String,
    pub question: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub result_label: &'static str,
    pub row_class: &'static str,
}

impl From<&AnsweredRecord> for LogRowVm {
    fn from(record: &AnsweredRecord) -> Self {
        Self {
            id: record.id.clone(),
            question: record.question_text.clone(),
            user_answer: record.user_answer.clone(),
            correct_answer: record.correct_answer.clone(),
            result_label: record.result.label(),
            row_class: match record.result {
                AnswerResult::Correct => "correct",
                AnswerResult::Incorrect | AnswerResult::TimedOut => "incorrect",
            },
        }
    }
}

#[must_use]
pub fn map_log_rows(records: &[AnsweredRecord]) -> Vec<LogRowVm> {
    records.iter().map(LogRowVm::from).collect()
}

/// "3 / 5 correct" style score line.
#[must_use]
pub fn score_line(records: &[AnsweredRecord]) -> String {
    let correct = records.iter().filter(|r| r.result.is_correct()).count();
    format!("{correct} / {} correct", records.len())
}
