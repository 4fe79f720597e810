//! Core library for LightNote, a notebook-based rich-text note-taking application.
//!
//! Notes carry a rich-text document tree ([`DocumentNode`]) produced by the
//! editor. Before a document is stored, [`NoteService`] strips transient
//! `imageUpload` placeholders, prunes empty paragraphs and derives the note's
//! image list from what remains. [`Workspace`] is the SQLite-backed store.
//!
//! Types are re-exported from their respective sub-modules for convenience;
//! consumers should import from the crate root rather than the `core` module.

pub mod core;

// Re-export commonly used types.
#[doc(inline)]
pub use core::{
    action::{ActionResult, NoteLookup, SanitizeFailure, SanitizeReport},
    document::{DocumentNode, IMAGE, IMAGE_UPLOAD, PARAGRAPH},
    error::{LightNoteError, Result},
    favorite::{Favorite, FavoriteEntry},
    note::{NewNote, Note, NotePatch, MAX_NAME_CHARS, MIN_NAME_CHARS},
    notebook::Notebook,
    notes::NoteService,
    repository::NoteRepository,
    sanitize::{
        extract_image_urls, prepare_content, prune_empty_paragraphs, sanitize_document,
        strip_nodes_of_type, ImageList, PreparedContent,
    },
    settings::{
        default_data_directory, load_settings, load_settings_from, save_settings,
        save_settings_to, settings_file_path, AppSettings,
    },
    storage::Storage,
    workspace::{Workspace, SCHEMA_VERSION},
};
