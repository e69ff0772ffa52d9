mod answer;
mod catalog;
mod ids;
mod question;
mod settings;

pub use ids::{ID_NUMBER_WIDTH, IdNumber, IdPrefix, ParseIdError, QuestionId, SessionKey};

pub use answer::{AnswerResult, AnsweredRecord, ResultMessage, TIMED_OUT_PLACEHOLDER};
pub use catalog::{Catalog, CatalogBuild, CatalogError};
pub use question::{Question, QuestionError};
pub use settings::{QuizSettings, SettingsError};
