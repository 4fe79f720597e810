//! Internal domain modules for the LightNote core library.
//!
//! All public types from these modules are re-exported at the crate root
//! with `#[doc(inline)]`; import from there in preference to this module.

pub mod action;
pub mod document;
pub mod error;
pub mod favorite;
pub mod note;
pub mod notebook;
pub mod notes;
pub mod repository;
pub mod sanitize;
pub mod settings;
pub mod storage;
pub mod workspace;

#[doc(inline)]
pub use action::{ActionResult, NoteLookup, SanitizeFailure, SanitizeReport};
#[doc(inline)]
pub use document::{DocumentNode, IMAGE, IMAGE_UPLOAD, PARAGRAPH};
#[doc(inline)]
pub use error::{LightNoteError, Result};
#[doc(inline)]
pub use favorite::{Favorite, FavoriteEntry};
#[doc(inline)]
pub use note::{NewNote, Note, NotePatch};
#[doc(inline)]
pub use notebook::Notebook;
#[doc(inline)]
pub use notes::NoteService;
#[doc(inline)]
pub use repository::NoteRepository;
#[doc(inline)]
pub use sanitize::{
    extract_image_urls, prepare_content, prune_empty_paragraphs, sanitize_document,
    strip_nodes_of_type, ImageList, PreparedContent,
};
#[doc(inline)]
pub use settings::{load_settings, save_settings, AppSettings};
#[doc(inline)]
pub use storage::Storage;
#[doc(inline)]
pub use workspace::Workspace;
