use thiserror::Error;

use crate::model::{CatalogError, QuestionError, SettingsError};
use crate::selector::SelectionError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}
