use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Canonical zero-padded width of the number part of an id.
pub const ID_NUMBER_WIDTH: usize = 3;

/// Opaque key addressing one user's quiz session.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionKey(Uuid);

impl SessionKey {
    /// Creates a fresh random `SessionKey`.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying uuid value
    #[must_use]
    pub fn value(&self) -> Uuid {
        self.0
    }
}

/// Non-negative id number of arbitrary length, compared by numeric value.
///
/// Leading zeros are stripped on parse, so `005` and `5` are the same number.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct IdNumber(String);

impl IdNumber {
    /// Returns the number zero-padded to at least `width` digits.
    #[must_use]
    pub fn padded(&self, width: usize) -> String {
        format!("{:0>width$}", self.0)
    }
}

impl Ord for IdNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for IdNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Alphabetic id prefix with an optional series number (`A`, `AB`, `A1`, `B12`).
///
/// Letters are ordered by their base-26 value (`A`=1, ..., `Z`=26, `AA`=27),
/// ties are broken by the series number. A prefix without a series sorts
/// before the same letters with any series.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct IdPrefix {
    letters: String,
    series: Option<IdNumber>,
}

impl IdPrefix {
    #[must_use]
    pub fn letters(&self) -> &str {
        &self.letters
    }

    #[must_use]
    pub fn series(&self) -> Option<&IdNumber> {
        self.series.as_ref()
    }
}

impl Ord for IdPrefix {
    fn cmp(&self, other: &Self) -> Ordering {
        // Bijective base-26 ordering is length first, then lexicographic;
        // comparing that way avoids overflow on long prefixes.
        self.letters
            .len()
            .cmp(&other.letters.len())
            .then_with(|| self.letters.cmp(&other.letters))
            .then_with(|| self.series.cmp(&other.series))
    }
}

impl PartialOrd for IdPrefix {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Structured form of a `<prefix>_<number>` question identifier.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QuestionId {
    prefix: IdPrefix,
    number: IdNumber,
}

impl QuestionId {
    #[must_use]
    pub fn prefix(&self) -> &IdPrefix {
        &self.prefix
    }

    #[must_use]
    pub fn number(&self) -> &IdNumber {
        &self.number
    }
}

impl fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionKey({})", self.0)
    }
}

impl fmt::Debug for IdNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IdNumber({})", self.0)
    }
}

impl fmt::Debug for IdPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IdPrefix({self})")
    }
}

impl fmt::Debug for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuestionId({self})")
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for IdNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for IdPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.series {
            Some(series) => write!(f, "{}{series}", self.letters),
            None => write!(f, "{}", self.letters),
        }
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.prefix, self.number.padded(ID_NUMBER_WIDTH))
    }
}

// ─── FromStr Implementations ───────────────────────────────────────────────────

/// Error type for parsing ID from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: &'static str,
    raw: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from {:?}", self.kind, self.raw)
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for SessionKey {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(SessionKey).map_err(|_| ParseIdError {
            kind: "SessionKey",
            raw: s.to_string(),
        })
    }
}

impl FromStr for IdNumber {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseIdError {
                kind: "IdNumber",
                raw: s.to_string(),
            });
        }
        let trimmed = s.trim_start_matches('0');
        let digits = if trimmed.is_empty() { "0" } else { trimmed };
        Ok(IdNumber(digits.to_string()))
    }
}

impl FromStr for IdPrefix {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseIdError {
            kind: "IdPrefix",
            raw: s.to_string(),
        };
        let split = s
            .bytes()
            .position(|b| !b.is_ascii_uppercase())
            .unwrap_or(s.len());
        let (letters, series) = s.split_at(split);
        if letters.is_empty() {
            return Err(err());
        }
        let series = if series.is_empty() {
            None
        } else {
            Some(series.parse::<IdNumber>().map_err(|_| err())?)
        };
        Ok(IdPrefix {
            letters: letters.to_string(),
            series,
        })
    }
}

impl FromStr for QuestionId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseIdError {
            kind: "QuestionId",
            raw: s.to_string(),
        };
        let (prefix, number) = s.split_once('_').ok_or_else(err)?;
        Ok(QuestionId {
            prefix: prefix.parse().map_err(|_| err())?,
            number: number.parse().map_err(|_| err())?,
        })
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
