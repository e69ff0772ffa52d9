use std::collections::HashMap;
use std::collections::hash_map::Entry;

use thiserror::Error;

use crate::model::Question;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("question data not found for id {id}")]
    MissingQuestionData { id: String },
}

/// Immutable, ordered question catalog with an id lookup.
///
/// Ids are unique: when the source contains the same id more than once the
/// first occurrence is kept and the rest are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    questions: Vec<Question>,
    index: HashMap<String, usize>,
}

/// Result of building a catalog, including the ids that were dropped as duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogBuild {
    pub catalog: Catalog,
    pub duplicates: Vec<String>,
}

impl Catalog {
    /// Build a catalog, keeping the first question for every id.
    pub fn build(questions: impl IntoIterator<Item = Question>) -> CatalogBuild {
        let mut catalog = Catalog::default();
        let mut duplicates = Vec::new();

        for question in questions {
            match catalog.index.entry(question.id().to_owned()) {
                Entry::Occupied(_) => duplicates.push(question.id().to_owned()),
                Entry::Vacant(slot) => {
                    slot.insert(catalog.questions.len());
                    catalog.questions.push(question);
                }
            }
        }

        CatalogBuild {
            catalog,
            duplicates,
        }
    }

    /// Build a catalog, silently dropping duplicate ids.
    pub fn from_questions(questions: impl IntoIterator<Item = Question>) -> Self {
        Self::build(questions).catalog
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Questions in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    /// Ids in catalog order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.questions.iter().map(Question::id)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Question> {
        self.index.get(id).map(|&i| &self.questions[i])
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Look up a question that is expected to exist.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::MissingQuestionData` if the id is unknown.
    pub fn require(&self, id: &str) -> Result<&Question, CatalogError> {
        self.get(id).ok_or_else(|| CatalogError::MissingQuestionData { id: id.to_owned() })
    }
}
