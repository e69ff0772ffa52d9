mod confirm_quit;
mod error;
mod home;
mod log;
mod quiz;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use confirm_quit::ConfirmQuitView;
pub use error::ViewError;
pub use home::HomeView;
pub use log::{LogTable, LogView};
pub use quiz::QuizView;
