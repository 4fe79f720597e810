//! Error types for the LightNote core library.

use thiserror::Error;

/// All errors that can occur within the LightNote core library.
#[derive(Debug, Error)]
pub enum LightNoteError {
    /// A SQLite operation failed.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A note ID was requested that does not exist in the database.
    #[error("Note not found: {0}")]
    NoteNotFound(String),

    /// A notebook ID was requested that does not exist in the database.
    #[error("Notebook not found: {0}")]
    NotebookNotFound(String),

    /// A title, name or emoji did not satisfy the form constraints.
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// The user has already marked this note as a favorite.
    #[error("Already favorited: {0}")]
    AlreadyFavorited(String),

    /// The opened file is not a valid LightNote database.
    #[error("Invalid workspace: {0}")]
    InvalidWorkspace(String),

    /// An I/O operation on the filesystem failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored note content could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias that pins the error type to [`LightNoteError`].
pub type Result<T> = std::result::Result<T, LightNoteError>;

impl LightNoteError {
    /// Returns a short, human-readable message suitable for display to the end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Database(e) => format!("Failed to save: {e}"),
            Self::NoteNotFound(_) => "Note no longer exists".to_string(),
            Self::NotebookNotFound(_) => "Notebook no longer exists".to_string(),
            Self::ValidationFailed(msg) => msg.clone(),
            Self::AlreadyFavorited(_) => "Already favorited".to_string(),
            Self::InvalidWorkspace(_) => "Could not open LightNote database".to_string(),
            Self::Io(e) => format!("File error: {e}"),
            Self::Json(e) => format!("Data format error: {e}"),
        }
    }
}
