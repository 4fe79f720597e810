//! Application settings persistence for LightNote.
//!
//! Stores the database location and the placeholder node type in a JSON file
//! at an OS-appropriate location.

use crate::core::document::IMAGE_UPLOAD;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Persisted application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    /// SQLite file notes are read from and written to.
    pub database_path: String,
    /// Node type stripped from documents before they are stored.
    pub placeholder_node_type: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            database_path: default_data_directory()
                .join("lightnote.db")
                .to_string_lossy()
                .to_string(),
            placeholder_node_type: IMAGE_UPLOAD.to_string(),
        }
    }
}

/// Returns the path to the settings JSON file.
///
/// - macOS / Linux: `~/.config/lightnote/settings.json`
/// - Windows: `%APPDATA%/LightNote/settings.json`
pub fn settings_file_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        base.join("LightNote").join("settings.json")
    }
    #[cfg(not(target_os = "windows"))]
    {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config").join("lightnote").join("settings.json")
    }
}

/// Returns the default data directory: `~/Documents/LightNote`.
pub fn default_data_directory() -> PathBuf {
    dirs::document_dir()
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("Documents")
        })
        .join("LightNote")
}

/// Loads settings from disk; returns defaults if the file is missing or corrupt.
pub fn load_settings() -> AppSettings {
    load_settings_from(settings_file_path())
}

pub fn load_settings_from<P: AsRef<Path>>(path: P) -> AppSettings {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("ignoring unreadable settings file {}: {e}", path.display());
            AppSettings::default()
        }),
        Err(_) => AppSettings::default(),
    }
}

/// Saves settings to disk, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`LightNoteError::Io`](crate::LightNoteError::Io) if the file
/// cannot be written.
pub fn save_settings(settings: &AppSettings) -> Result<()> {
    save_settings_to(settings_file_path(), settings)
}

pub fn save_settings_to<P: AsRef<Path>>(path: P, settings: &AppSettings) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;
    Ok(())
}
