//! Error taxonomy for the launcher.
//!
//! None of these are fatal to the process: persistence errors degrade to
//! in-memory state and an unknown site only rejects the action that asked for it.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LauncherError {
    /// The position store could not be read or written.
    #[error("Persistence unavailable: {0}")]
    PersistenceUnavailable(String),

    /// The requested site id is not part of the registry.
    #[error("Unknown site: {0}")]
    UnknownSite(String),

    /// A registry entry failed validation (empty id, duplicate id, bad URL).
    #[error("Invalid site entry: {0}")]
    InvalidSite(String),

    /// The settings file could not be read, parsed or validated.
    #[error("Settings error: {0}")]
    Settings(String),

    /// A web view posted a message that does not parse.
    #[error("Malformed IPC message: {0}")]
    Ipc(String),

    /// The window has already been closed; no further transitions are accepted.
    #[error("Window already terminated")]
    Terminated,
}

impl From<rusqlite::Error> for LauncherError {
    fn from(e: rusqlite::Error) -> Self {
        LauncherError::PersistenceUnavailable(e.to_string())
    }
}

impl From<serde_json::Error> for LauncherError {
    fn from(e: serde_json::Error) -> Self {
        LauncherError::Settings(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LauncherError>;
