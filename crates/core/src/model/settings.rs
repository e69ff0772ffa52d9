use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("time limit must be between {min} and {max} seconds, got {got}")]
    InvalidTimeLimit { min: u32, max: u32, got: u32 },
}

/// Quiz-wide settings shared by every session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSettings {
    time_limit_secs: u32,
}

impl QuizSettings {
    pub const DEFAULT_TIME_LIMIT_SECS: u32 = 10;
    pub const MIN_TIME_LIMIT_SECS: u32 = 5;
    pub const MAX_TIME_LIMIT_SECS: u32 = 600;

    /// # Errors
    ///
    /// Returns `SettingsError::InvalidTimeLimit` if the limit is outside 5..=600 seconds.
    pub fn new(time_limit_secs: u32) -> Result<Self, SettingsError> {
        if !(Self::MIN_TIME_LIMIT_SECS..=Self::MAX_TIME_LIMIT_SECS).contains(&time_limit_secs) {
            return Err(SettingsError::InvalidTimeLimit {
                min: Self::MIN_TIME_LIMIT_SECS,
                max: Self::MAX_TIME_LIMIT_SECS,
                got: time_limit_secs,
            });
        }
        Ok(Self { time_limit_secs })
    }

    /// Seconds a prompt may stay unanswered before it counts as timed out.
    #[must_use]
    pub fn time_limit_secs(&self) -> u32 {
        self.time_limit_secs
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            time_limit_secs: Self::DEFAULT_TIME_LIMIT_SECS,
        }
    }
}
