use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use quiz_core::model::{AnsweredRecord, Catalog, Question, ResultMessage};
use rand::Rng;
use rand::rng;
use rand::seq::SliceRandom;
use tracing::{debug, info, warn};

use super::progress::SessionProgress;
use crate::error::SessionError;

//
// ─── STATUS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QuizStatus {
    #[default]
    NotStarted,
    InProgress,
    Finished,
}

impl QuizStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not started",
            Self::InProgress => "in progress",
            Self::Finished => "finished",
        }
    }
}

impl fmt::Display for QuizStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a quiz ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    /// Every selected question was answered or skipped.
    Exhausted,
    /// The user asked to see the results early.
    ShowResults,
}

//
// ─── STEPS ─────────────────────────────────────────────────────────────────────
//

/// Question to show next, with the feedback for the previous answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionPrompt {
    pub question: Question,
    /// 1-based position in the quiz.
    pub number: usize,
    pub total: usize,
    pub message: Option<ResultMessage>,
}

/// Outcome of asking the session for its current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizStep {
    Prompt(QuestionPrompt),
    /// No questions remain; the session is now finished.
    Finished { message: Option<ResultMessage> },
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One user's run through a shuffled question sequence.
///
/// Plain data with `&mut self` transitions. Timestamps are unix seconds
/// supplied by the caller.
#[derive(Clone)]
pub struct QuizSession {
    catalog: Arc<Catalog>,
    status: QuizStatus,
    ids: Vec<String>,
    cursor: usize,
    log: Vec<AnsweredRecord>,
    pending_message: Option<ResultMessage>,
    last_prompt_at: i64,
    finish_reason: Option<FinishReason>,
    skipped: Vec<String>,
}

impl QuizSession {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            status: QuizStatus::NotStarted,
            ids: Vec::new(),
            cursor: 0,
            log: Vec::new(),
            pending_message: None,
            last_prompt_at: 0,
            finish_reason: None,
            skipped: Vec::new(),
        }
    }

    /// Start a quiz over `ids` in a random order.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptySelection` if `ids` is empty, or
    /// `SessionError::InvalidState` unless the session is not started.
    pub fn start(&mut self, ids: Vec<String>, now: i64) -> Result<(), SessionError> {
        self.start_with_rng(ids, now, &mut rng())
    }

    /// Like [`QuizSession::start`] with a caller-provided random source.
    ///
    /// # Errors
    ///
    /// Same as [`QuizSession::start`].
    pub fn start_with_rng<R: Rng + ?Sized>(
        &mut self,
        ids: Vec<String>,
        now: i64,
        rng: &mut R,
    ) -> Result<(), SessionError> {
        self.expect_status("start", QuizStatus::NotStarted)?;
        if ids.is_empty() {
            return Err(SessionError::EmptySelection);
        }

        let mut seen = HashSet::with_capacity(ids.len());
        let mut ids: Vec<String> = ids.into_iter().filter(|id| seen.insert(id.clone())).collect();
        ids.shuffle(rng);

        self.ids = ids;
        self.cursor = 0;
        self.log.clear();
        self.skipped.clear();
        self.pending_message = None;
        self.finish_reason = None;
        self.last_prompt_at = now;
        self.status = QuizStatus::InProgress;

        info!(questions = self.ids.len(), "quiz started");
        Ok(())
    }

    /// The question at the cursor, or the end of the quiz.
    ///
    /// Ids without catalog data are skipped. Any pending result message is
    /// handed out with this step and cleared. Reaching the end moves the
    /// session to `Finished`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` unless the quiz is in progress.
    pub fn current_question(&mut self, now: i64) -> Result<QuizStep, SessionError> {
        self.expect_status("current_question", QuizStatus::InProgress)?;

        let Some(question) = self.seek_question(now) else {
            self.finish(FinishReason::Exhausted);
            return Ok(QuizStep::Finished {
                message: self.pending_message.take(),
            });
        };

        Ok(QuizStep::Prompt(QuestionPrompt {
            question,
            number: self.cursor + 1,
            total: self.ids.len(),
            message: self.pending_message.take(),
        }))
    }

    /// Grade `text` against the current question and advance.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` unless the quiz is in progress
    /// with a question left to answer. Running out of questions here moves
    /// the session to `Finished`.
    pub fn submit_answer(&mut self, text: &str, now: i64) -> Result<AnsweredRecord, SessionError> {
        self.expect_status("submit_answer", QuizStatus::InProgress)?;

        let Some(question) = self.seek_question(now) else {
            self.finish(FinishReason::Exhausted);
            return Err(SessionError::InvalidState {
                operation: "submit_answer",
                status: self.status,
            });
        };

        Ok(self.record(&question, text, now))
    }

    /// Record a timeout if the current prompt has been open longer than `limit_secs`.
    ///
    /// Returns `None` while a result message is still waiting to be shown,
    /// while the prompt is within its limit, or when no question remains.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` unless the quiz is in progress.
    pub fn timeout_check(
        &mut self,
        now: i64,
        limit_secs: u32,
    ) -> Result<Option<AnsweredRecord>, SessionError> {
        self.expect_status("timeout_check", QuizStatus::InProgress)?;

        if self.pending_message.is_some() {
            return Ok(None);
        }
        if now.saturating_sub(self.last_prompt_at) <= i64::from(limit_secs) {
            return Ok(None);
        }
        let Some(question) = self.seek_question(now) else {
            return Ok(None);
        };

        debug!(id = question.id(), limit_secs, "prompt timed out");
        Ok(Some(self.record(&question, "", now)))
    }

    /// End the quiz without answering the remaining questions.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` if the quiz has not started.
    pub fn finish_now(&mut self, reason: FinishReason) -> Result<(), SessionError> {
        match self.status {
            QuizStatus::NotStarted => Err(SessionError::InvalidState {
                operation: "finish_now",
                status: self.status,
            }),
            QuizStatus::InProgress => {
                self.finish(reason);
                Ok(())
            }
            QuizStatus::Finished => Ok(()),
        }
    }

    /// Discard the quiz and return to `NotStarted`.
    pub fn reset(&mut self) {
        self.status = QuizStatus::NotStarted;
        self.ids.clear();
        self.cursor = 0;
        self.log.clear();
        self.pending_message = None;
        self.last_prompt_at = 0;
        self.finish_reason = None;
        self.skipped.clear();
    }

    #[must_use]
    pub fn status(&self) -> QuizStatus {
        self.status
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of questions selected for this quiz.
    #[must_use]
    pub fn total(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    #[must_use]
    pub fn log(&self) -> &[AnsweredRecord] {
        &self.log
    }

    #[must_use]
    pub fn pending_message(&self) -> Option<&ResultMessage> {
        self.pending_message.as_ref()
    }

    #[must_use]
    pub fn last_prompt_at(&self) -> i64 {
        self.last_prompt_at
    }

    #[must_use]
    pub fn finish_reason(&self) -> Option<FinishReason> {
        self.finish_reason
    }

    /// Ids passed over because the catalog had no data for them.
    #[must_use]
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            total: self.total(),
            answered: self.log.len(),
            remaining: self.ids.len().saturating_sub(self.cursor),
            is_complete: self.status == QuizStatus::Finished,
        }
    }

    fn expect_status(
        &self,
        operation: &'static str,
        expected: QuizStatus,
    ) -> Result<(), SessionError> {
        if self.status == expected {
            Ok(())
        } else {
            Err(SessionError::InvalidState {
                operation,
                status: self.status,
            })
        }
    }

    /// Move the cursor past ids without catalog data and return the first resolvable question.
    fn seek_question(&mut self, now: i64) -> Option<Question> {
        let catalog = Arc::clone(&self.catalog);
        while let Some(id) = self.ids.get(self.cursor) {
            match catalog.require(id) {
                Ok(question) => return Some(question.clone()),
                Err(err) => {
                    warn!(error = %err, cursor = self.cursor, "skipping question");
                    self.skipped.push(id.clone());
                    self.cursor += 1;
                    self.last_prompt_at = now;
                }
            }
        }
        None
    }

    fn record(&mut self, question: &Question, text: &str, now: i64) -> AnsweredRecord {
        let record = AnsweredRecord::grade(question, text);
        debug!(id = %record.id, result = %record.result, "answer recorded");

        self.log.push(record.clone());
        self.cursor += 1;
        self.last_prompt_at = now;
        self.pending_message = Some(record.message());
        record
    }

    fn finish(&mut self, reason: FinishReason) {
        self.status = QuizStatus::Finished;
        self.finish_reason = Some(reason);
        info!(
            answered = self.log.len(),
            correct = self.log.iter().filter(|r| r.result.is_correct()).count(),
            ?reason,
            "quiz finished"
        );
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("status", &self.status)
            .field("cursor", &self.cursor)
            .field("total", &self.ids.len())
            .field("answered", &self.log.len())
            .field("last_prompt_at", &self.last_prompt_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{AnswerResult, TIMED_OUT_PLACEHOLDER};
    use quiz_core::time::FIXED_TEST_TIMESTAMP;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const T0: i64 = FIXED_TEST_TIMESTAMP;

    fn catalog(n: usize) -> Arc<Catalog> {
        let questions = (1..=n).map(|i| {
            Question::new(format!("A1_{i:03}"), format!("Q{i}"), format!("answer {i}")).unwrap()
        });
        Arc::new(Catalog::from_questions(questions))
    }

    fn ids(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("A1_{i:03}")).collect()
    }

    fn started(n: usize) -> QuizSession {
        let mut session = QuizSession::new(catalog(n));
        session
            .start_with_rng(ids(n), T0, &mut StdRng::seed_from_u64(7))
            .unwrap();
        session
    }

    fn prompt(session: &mut QuizSession, now: i64) -> QuestionPrompt {
        match session.current_question(now).unwrap() {
            QuizStep::Prompt(prompt) => prompt,
            QuizStep::Finished { .. } => panic!("expected a prompt"),
        }
    }

    #[test]
    fn start_rejects_empty_selection() {
        let mut session = QuizSession::new(catalog(3));
        assert_eq!(session.start(Vec::new(), T0), Err(SessionError::EmptySelection));
        assert_eq!(session.status(), QuizStatus::NotStarted);
    }

    #[test]
    fn start_shuffles_a_full_permutation() {
        let session = started(20);
        let mut shuffled = session.ids().to_vec();
        shuffled.sort();
        assert_eq!(shuffled, ids(20));
        assert_eq!(session.status(), QuizStatus::InProgress);
        assert_eq!(session.cursor(), 0);
        assert_eq!(session.last_prompt_at(), T0);
    }

    #[test]
    fn start_collapses_duplicate_ids() {
        let mut session = QuizSession::new(catalog(3));
        let input = vec!["A1_001".into(), "A1_002".into(), "A1_001".into()];
        session.start(input, T0).unwrap();
        assert_eq!(session.total(), 2);
    }

    #[test]
    fn start_twice_is_invalid() {
        let mut session = started(2);
        assert!(matches!(
            session.start(ids(2), T0),
            Err(SessionError::InvalidState {
                operation: "start",
                status: QuizStatus::InProgress
            })
        ));
    }

    #[test]
    fn each_answer_advances_cursor_and_log_by_one() {
        let mut session = started(3);
        let answers = ["wrong", "", "placeholder"];
        for (i, text) in answers.iter().enumerate() {
            let p = prompt(&mut session, T0);
            let text = if *text == "placeholder" {
                p.question.answer().to_string()
            } else {
                (*text).to_string()
            };
            session.submit_answer(&text, T0 + 1).unwrap();
            assert_eq!(session.cursor(), i + 1);
            assert_eq!(session.log().len(), i + 1);
            assert_eq!(session.status(), QuizStatus::InProgress);
        }

        let results: Vec<_> = session.log().iter().map(|r| r.result).collect();
        assert_eq!(
            results,
            vec![
                AnswerResult::Incorrect,
                AnswerResult::TimedOut,
                AnswerResult::Correct
            ]
        );
    }

    #[test]
    fn blank_answer_is_timed_out_with_placeholder() {
        let mut session = started(1);
        let record = session.submit_answer("   ", T0).unwrap();
        assert_eq!(record.result, AnswerResult::TimedOut);
        assert_eq!(record.user_answer, TIMED_OUT_PLACEHOLDER);
        assert_eq!(
            session.pending_message(),
            Some(&ResultMessage::TimedOut {
                correct_answer: "answer 1".into()
            })
        );
    }

    #[test]
    fn answers_are_trimmed_but_case_sensitive() {
        let mut session = started(2);
        let first = prompt(&mut session, T0);
        let padded = format!("  {}  ", first.question.answer());
        assert_eq!(
            session.submit_answer(&padded, T0).unwrap().result,
            AnswerResult::Correct
        );

        let second = prompt(&mut session, T0);
        let shouted = second.question.answer().to_uppercase();
        assert_eq!(
            session.submit_answer(&shouted, T0).unwrap().result,
            AnswerResult::Incorrect
        );
    }

    #[test]
    fn pending_message_is_shown_once() {
        let mut session = started(2);
        session.submit_answer("nope", T0).unwrap();

        let next = prompt(&mut session, T0);
        assert!(matches!(next.message, Some(ResultMessage::Incorrect { .. })));
        assert_eq!(next.number, 2);
        assert_eq!(next.total, 2);

        let again = prompt(&mut session, T0);
        assert_eq!(again.message, None);
    }

    #[test]
    fn end_of_sequence_finishes_exactly_once() {
        let mut session = started(1);
        session.submit_answer("x", T0).unwrap();

        let step = session.current_question(T0).unwrap();
        assert!(matches!(step, QuizStep::Finished { message: Some(_) }));
        assert_eq!(session.status(), QuizStatus::Finished);
        assert_eq!(session.finish_reason(), Some(FinishReason::Exhausted));

        assert!(matches!(
            session.current_question(T0),
            Err(SessionError::InvalidState {
                status: QuizStatus::Finished,
                ..
            })
        ));
        assert!(session.submit_answer("x", T0).is_err());

        session.reset();
        session.start(ids(1), T0).unwrap();
        assert!(matches!(
            session.current_question(T0).unwrap(),
            QuizStep::Prompt(_)
        ));
    }

    #[test]
    fn submit_past_end_finishes_and_reports_invalid_state() {
        let mut session = started(1);
        session.submit_answer("x", T0).unwrap();
        assert!(matches!(
            session.submit_answer("y", T0),
            Err(SessionError::InvalidState {
                operation: "submit_answer",
                status: QuizStatus::Finished
            })
        ));
        assert_eq!(session.log().len(), 1);
    }

    #[test]
    fn operations_before_start_are_invalid() {
        let mut session = QuizSession::new(catalog(1));
        assert!(session.current_question(T0).is_err());
        assert!(session.submit_answer("x", T0).is_err());
        assert!(session.timeout_check(T0, 10).is_err());
        assert!(session.finish_now(FinishReason::ShowResults).is_err());
    }

    #[test]
    fn missing_catalog_entries_are_skipped() {
        let mut session = QuizSession::new(catalog(2));
        let input = vec!["A1_001".into(), "Z_404".into(), "Z_405".into(), "A1_002".into()];
        session.start(input, T0).unwrap();

        let mut answered = 0;
        loop {
            match session.current_question(T0 + 3).unwrap() {
                QuizStep::Prompt(p) => {
                    assert!(p.question.id().starts_with("A1_"));
                    session.submit_answer("x", T0 + 3).unwrap();
                    answered += 1;
                }
                QuizStep::Finished { .. } => break,
            }
        }

        assert_eq!(answered, 2);
        assert_eq!(session.log().len(), 2);
        let mut skipped = session.skipped().to_vec();
        skipped.sort();
        assert_eq!(skipped, vec!["Z_404", "Z_405"]);
        assert_eq!(session.cursor(), 4);
    }

    #[test]
    fn catalog_with_only_missing_ids_finishes_without_answers() {
        let mut session = QuizSession::new(catalog(1));
        session.start(vec!["Q_001".into(), "Q_002".into()], T0).unwrap();
        assert!(matches!(
            session.current_question(T0).unwrap(),
            QuizStep::Finished { message: None }
        ));
        assert!(session.log().is_empty());
    }

    #[test]
    fn timeout_within_limit_is_a_no_op() {
        let mut session = started(2);
        assert_eq!(session.timeout_check(T0 + 10, 10).unwrap(), None);
        assert!(session.log().is_empty());
    }

    #[test]
    fn timeout_records_once_per_prompt() {
        let mut session = started(3);
        let record = session.timeout_check(T0 + 11, 10).unwrap().unwrap();
        assert_eq!(record.result, AnswerResult::TimedOut);
        assert_eq!(session.last_prompt_at(), T0 + 11);

        // Message not yet displayed: later polls must not stack timeouts.
        assert_eq!(session.timeout_check(T0 + 30, 10).unwrap(), None);
        assert_eq!(session.log().len(), 1);

        // The clock for the next prompt started when the timeout was recorded.
        let _ = prompt(&mut session, T0 + 12);
        assert_eq!(session.timeout_check(T0 + 21, 10).unwrap(), None);
        assert!(session.timeout_check(T0 + 22, 10).unwrap().is_some());
        assert_eq!(session.log().len(), 2);
    }

    #[test]
    fn timeout_after_finish_is_invalid() {
        let mut session = started(1);
        session.submit_answer("x", T0).unwrap();
        let _ = session.current_question(T0);
        assert!(session.timeout_check(T0 + 100, 10).is_err());
        assert_eq!(session.log().len(), 1);
    }

    #[test]
    fn finish_now_keeps_log_and_stops_prompts() {
        let mut session = started(3);
        session.submit_answer("x", T0).unwrap();
        session.finish_now(FinishReason::ShowResults).unwrap();

        assert_eq!(session.status(), QuizStatus::Finished);
        assert_eq!(session.finish_reason(), Some(FinishReason::ShowResults));
        assert_eq!(session.log().len(), 1);
        assert!(session.current_question(T0).is_err());

        session.finish_now(FinishReason::Exhausted).unwrap();
        assert_eq!(session.finish_reason(), Some(FinishReason::ShowResults));
    }

    #[test]
    fn reset_discards_everything() {
        let mut session = started(2);
        session.submit_answer("x", T0).unwrap();
        session.reset();

        assert_eq!(session.status(), QuizStatus::NotStarted);
        assert_eq!(session.total(), 0);
        assert_eq!(session.cursor(), 0);
        assert!(session.log().is_empty());
        assert_eq!(session.pending_message(), None);
    }

    #[test]
    fn progress_tracks_answers() {
        let mut session = started(3);
        session.submit_answer("x", T0).unwrap();
        assert_eq!(
            session.progress(),
            SessionProgress {
                total: 3,
                answered: 1,
                remaining: 2,
                is_complete: false
            }
        );
    }
}
