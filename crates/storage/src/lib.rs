#![forbid(unsafe_code)]

pub mod import;
pub mod json;
pub mod repository;
pub mod sqlite;

pub use import::{ImportReport, import_catalog};
pub use repository::{InMemoryRepository, QuestionRecord, QuestionRepository, Storage, StorageError};
