//! Turns a raw range/search expression into the ids of a quiz session.
//!
//! Input is split on commas; every term is classified on its own as either
//! a range term (`A1_001`, `A1_001-B1_020`) or a free-text term matched
//! against id, question, and answer text.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::model::{Catalog, Question, QuestionId};

#[allow(clippy::expect_used)]
static RANGE_TERM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z]+\d*)_(\d+)(?:-([A-Z]+\d*)_(\d+))?$").expect("range term pattern is valid")
});

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SelectionError {
    #[error("invalid range '{term}': {reason}")]
    InvalidRangeSyntax { term: String, reason: RangeOrder },

    #[error("no questions match '{input}'")]
    NoMatches { input: String },
}

/// Why a well-formed range was rejected.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RangeOrder {
    #[error("the start prefix comes after the end prefix")]
    PrefixInverted,

    #[error("the start number is greater than the end number")]
    NumberInverted,
}

//
// ─── TERMS ─────────────────────────────────────────────────────────────────────
//

/// Inclusive span of ids, possibly crossing prefixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdRange {
    start: QuestionId,
    end: QuestionId,
}

impl IdRange {
    /// # Errors
    ///
    /// Returns `RangeOrder` if `start` comes after `end`.
    pub fn new(start: QuestionId, end: QuestionId) -> Result<Self, RangeOrder> {
        if start.prefix() > end.prefix() {
            return Err(RangeOrder::PrefixInverted);
        }
        if start.prefix() == end.prefix() && start.number() > end.number() {
            return Err(RangeOrder::NumberInverted);
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub fn contains(&self, id: &QuestionId) -> bool {
        let (start, end) = (self.start.prefix(), self.end.prefix());
        let (prefix, number) = (id.prefix(), id.number());

        if start == end {
            return prefix == start && self.start.number() <= number && number <= self.end.number();
        }

        (start < prefix && prefix < end)
            || (prefix == start && number >= self.start.number())
            || (prefix == end && number <= self.end.number())
    }
}

/// One classified comma-separated term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    /// A single id, already normalised to its canonical padded form.
    Single(String),
    Range(IdRange),
    /// Uppercased free-text needle.
    Text(String),
}

impl Term {
    /// Classify one trimmed, uppercased term.
    ///
    /// Anything that does not match the range grammar is free text.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::InvalidRangeSyntax` for a range whose bounds are inverted.
    pub fn parse(term: &str) -> Result<Self, SelectionError> {
        let text = || Term::Text(term.to_string());
        let Some(caps) = RANGE_TERM.captures(term) else {
            return Ok(text());
        };

        let Ok(start) = format!("{}_{}", &caps[1], &caps[2]).parse::<QuestionId>() else {
            return Ok(text());
        };

        let (Some(end_prefix), Some(end_number)) = (caps.get(3), caps.get(4)) else {
            return Ok(Term::Single(start.to_string()));
        };

        let Ok(end) = format!("{}_{}", end_prefix.as_str(), end_number.as_str()).parse::<QuestionId>()
        else {
            return Ok(text());
        };

        IdRange::new(start, end)
            .map(Term::Range)
            .map_err(|reason| SelectionError::InvalidRangeSyntax {
                term: term.to_string(),
                reason,
            })
    }

    fn matches(&self, question: &Question) -> bool {
        match self {
            Term::Single(id) => question.id() == id,
            Term::Range(range) => question
                .id()
                .parse::<QuestionId>()
                .is_ok_and(|id| range.contains(&id)),
            Term::Text(needle) => [question.id(), question.question(), question.answer()]
                .iter()
                .any(|field| field.to_uppercase().contains(needle.as_str())),
        }
    }
}

/// Split raw input into trimmed, uppercased, non-empty terms.
pub fn split_terms(raw_input: &str) -> impl Iterator<Item = String> + '_ {
    raw_input
        .split(',')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_uppercase)
}

//
// ─── SELECT ────────────────────────────────────────────────────────────────────
//

/// Resolve `raw_input` against `catalog` into a sorted, deduplicated id list.
///
/// Blank input selects the whole catalog in catalog order. Otherwise the
/// matches of every term are unioned and returned in ascending id order.
/// The result is never shuffled here.
///
/// # Errors
///
/// Returns `SelectionError::InvalidRangeSyntax` if any range term has inverted bounds.
/// Returns `SelectionError::NoMatches` if no question matched any term.
pub fn select(catalog: &Catalog, raw_input: &str) -> Result<Vec<String>, SelectionError> {
    if raw_input.trim().is_empty() {
        return Ok(catalog.ids().map(str::to_owned).collect());
    }

    let mut found = BTreeSet::new();
    for raw_term in split_terms(raw_input) {
        let term = Term::parse(&raw_term)?;
        match &term {
            Term::Single(id) => {
                if catalog.contains(id) {
                    found.insert(id.clone());
                }
            }
            Term::Range(_) | Term::Text(_) => {
                found.extend(
                    catalog
                        .iter()
                        .filter(|question| term.matches(question))
                        .map(|question| question.id().to_owned()),
                );
            }
        }
    }

    if found.is_empty() {
        return Err(SelectionError::NoMatches {
            input: raw_input.to_string(),
        });
    }

    Ok(found.into_iter().collect())
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn q(id: &str, question: &str, answer: &str) -> Question {
        Question::new(id, question, answer).unwrap()
    }

    fn numbered(prefix: &str, numbers: impl IntoIterator<Item = u32>) -> Vec<Question> {
        numbers
            .into_iter()
            .map(|n| q(&format!("{prefix}_{n:03}"), &format!("q{n}"), &format!("a{n}")))
            .collect()
    }

    fn a1_catalog() -> Catalog {
        Catalog::from_questions(numbered("A1", 1..=5))
    }

    #[test]
    fn blank_input_selects_everything_in_catalog_order() {
        let catalog = Catalog::from_questions(vec![
            q("B_001", "b", "b"),
            q("A_001", "a", "a"),
            q("free-form", "c", "c"),
        ]);
        assert_eq!(
            select(&catalog, "   ").unwrap(),
            vec!["B_001", "A_001", "free-form"]
        );
        assert_eq!(select(&catalog, "").unwrap().len(), 3);
    }

    #[test]
    fn single_id_is_zero_padded() {
        assert_eq!(select(&a1_catalog(), "A1_5").unwrap(), vec!["A1_005"]);
        assert_eq!(select(&a1_catalog(), "a1_0003").unwrap(), vec!["A1_003"]);
    }

    #[test]
    fn single_id_and_range_agree_on_series_zeros() {
        let catalog = a1_catalog();
        assert_eq!(select(&catalog, "A01_3").unwrap(), vec!["A1_003"]);
        assert_eq!(
            select(&catalog, "A01_3").unwrap(),
            select(&catalog, "A01_3-A01_3").unwrap()
        );
    }

    #[test]
    fn single_missing_id_yields_no_matches() {
        let err = select(&a1_catalog(), "A1_9").unwrap_err();
        assert_eq!(
            err,
            SelectionError::NoMatches {
                input: "A1_9".into()
            }
        );
    }

    #[test]
    fn same_prefix_range_is_inclusive() {
        assert_eq!(
            select(&a1_catalog(), "A1_001-A1_003").unwrap(),
            vec!["A1_001", "A1_002", "A1_003"]
        );
    }

    #[test]
    fn inverted_number_range_is_rejected() {
        let err = select(&a1_catalog(), "A1_005-A1_001").unwrap_err();
        assert_eq!(
            err,
            SelectionError::InvalidRangeSyntax {
                term: "A1_005-A1_001".into(),
                reason: RangeOrder::NumberInverted,
            }
        );
    }

    #[test]
    fn inverted_prefix_range_is_rejected() {
        let err = select(&a1_catalog(), "B_001-A_005").unwrap_err();
        assert!(matches!(
            err,
            SelectionError::InvalidRangeSyntax {
                reason: RangeOrder::PrefixInverted,
                ..
            }
        ));
    }

    #[test]
    fn inverted_range_fails_even_after_matching_terms() {
        let err = select(&a1_catalog(), "A1_001, A1_004-A1_002").unwrap_err();
        assert!(matches!(err, SelectionError::InvalidRangeSyntax { .. }));
    }

    #[test]
    fn cross_prefix_range_spans_intermediate_prefixes() {
        let mut questions = numbered("A1", [1, 997, 998, 999]);
        questions.extend(numbered("A2", [1, 500]));
        questions.extend(numbered("B1", [1, 2, 3]));
        questions.extend(numbered("C1", [1]));
        let catalog = Catalog::from_questions(questions);

        let selected = select(&catalog, "A1_998-B1_002").unwrap();
        assert_eq!(
            selected,
            vec!["A1_998", "A1_999", "A2_001", "A2_500", "B1_001", "B1_002"]
        );
    }

    #[test]
    fn alphabetic_prefixes_use_base26_order() {
        let mut questions = numbered("Z", [5]);
        questions.extend(numbered("AA", [1]));
        questions.extend(numbered("AB", [7]));
        questions.extend(numbered("B", [1]));
        let catalog = Catalog::from_questions(questions);

        assert_eq!(
            select(&catalog, "Z_001-AB_003").unwrap(),
            vec!["AA_001", "Z_005"]
        );
    }

    #[test]
    fn range_ignores_ids_outside_the_id_grammar() {
        let mut questions = numbered("A", [1, 2]);
        questions.push(q("a_002", "lower", "x"));
        questions.push(q("A_002b", "suffix", "x"));
        let catalog = Catalog::from_questions(questions);

        assert_eq!(select(&catalog, "A_1-A_9").unwrap(), vec!["A_001", "A_002"]);
    }

    #[test]
    fn free_text_matches_any_field_case_insensitively() {
        let catalog = Catalog::from_questions(vec![
            q("G_001", "What is a Volcano?", "a mountain"),
            q("G_002", "Lava comes from?", "VOLCANOES"),
            q("VOLCANO_1", "id match only", "x"),
            q("G_003", "Unrelated", "nothing"),
        ]);

        assert_eq!(
            select(&catalog, "volcano").unwrap(),
            vec!["G_001", "G_002", "VOLCANO_1"]
        );
    }

    #[test]
    fn free_text_without_matches_fails() {
        let err = select(&a1_catalog(), " tsunami ").unwrap_err();
        assert_eq!(
            err,
            SelectionError::NoMatches {
                input: " tsunami ".into()
            }
        );
    }

    #[test]
    fn near_range_with_trailing_garbage_is_free_text() {
        let catalog = Catalog::from_questions(vec![
            q("A1_001", "see A1_001-A1_003x here", "x"),
            q("A1_002", "q", "x"),
        ]);
        assert_eq!(select(&catalog, "A1_001-A1_003x").unwrap(), vec!["A1_001"]);
    }

    #[test]
    fn mixed_terms_are_unioned_sorted_and_deduplicated() {
        let mut questions = numbered("A1", 1..=10);
        questions.push(q("B_001", "volcano?", "magma"));
        questions.push(q("A1_100", "volcano too", "ash"));
        let catalog = Catalog::from_questions(questions);

        let selected = select(&catalog, "A1_008-A1_010, volcano, A1_9,,  ").unwrap();
        assert_eq!(
            selected,
            vec!["A1_008", "A1_009", "A1_010", "A1_100", "B_001"]
        );
    }

    #[test]
    fn term_parse_classifies_terms() {
        assert_eq!(Term::parse("A1_7").unwrap(), Term::Single("A1_007".into()));
        assert!(matches!(Term::parse("A_1-B_2").unwrap(), Term::Range(_)));
        assert_eq!(Term::parse("A_1-").unwrap(), Term::Text("A_1-".into()));
        assert_eq!(Term::parse("HELLO").unwrap(), Term::Text("HELLO".into()));
    }

    #[test]
    fn split_terms_trims_drops_empty_and_uppercases() {
        let terms: Vec<_> = split_terms(" a1_001 , ,volcano,").collect();
        assert_eq!(terms, vec!["A1_001", "VOLCANO"]);
    }
}
