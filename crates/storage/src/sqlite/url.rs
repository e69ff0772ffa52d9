use std::path::{Path, PathBuf};

use super::SqliteInitError;

/// Turn a bare path or `sqlite:` url into an absolute `sqlite://` url.
///
/// In-memory and already-absolute urls pass through unchanged.
#[must_use]
pub fn normalize_sqlite_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed == "sqlite::memory:"
        || trimmed.starts_with("sqlite://")
        || trimmed.starts_with("sqlite:file:")
    {
        return trimmed.to_string();
    }

    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

/// Create the database file and its parent directories for a `sqlite://` url.
///
/// # Errors
///
/// Returns `SqliteInitError::InvalidUrl` for urls without a file path, or
/// `SqliteInitError::Io` if the file cannot be created.
pub fn prepare_sqlite_file(db_url: &str) -> Result<(), SqliteInitError> {
    if db_url == "sqlite::memory:" || db_url.starts_with("sqlite:file:") {
        return Ok(());
    }

    let invalid = || SqliteInitError::InvalidUrl {
        raw: db_url.to_string(),
    };
    let path = db_url.strip_prefix("sqlite://").ok_or_else(invalid)?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(invalid());
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }
    Ok(())
}
