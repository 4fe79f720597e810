//! Reading documents and opening the database for CLI commands.

use anyhow::{Context, Result};
use lightnote_core::{DocumentNode, Workspace};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Reads a document tree from a JSON file, or from stdin when `source` is `-`.
pub fn read_document(source: &Path) -> Result<DocumentNode> {
    let raw = if source == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read document from stdin")?;
        buf
    } else {
        fs::read_to_string(source)
            .with_context(|| format!("Failed to read document from {}", source.display()))?
    };
    parse_document(&raw)
}

pub fn parse_document(raw: &str) -> Result<DocumentNode> {
    serde_json::from_str(raw).context("Document is not a JSON object")
}

/// Resolves the image flags into the optional explicit list.
///
/// `--no-images` stores an empty list; no flags at all leaves the list to be
/// derived from the document.
pub fn explicit_images(images: Vec<String>, no_images: bool) -> Option<Vec<String>> {
    if no_images {
        Some(Vec::new())
    } else if images.is_empty() {
        None
    } else {
        Some(images)
    }
}

/// Opens the database at `path`, creating it and its directory on first use.
pub fn open_workspace(path: &Path) -> Result<Workspace> {
    if path.exists() {
        return Workspace::open(path)
            .with_context(|| format!("Failed to open database {}", path.display()));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    log::info!("creating new database at {}", path.display());
    Workspace::create(path).with_context(|| format!("Failed to create database {}", path.display()))
}
