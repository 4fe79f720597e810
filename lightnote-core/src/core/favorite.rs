//! Favorite records and the note summary returned with them.
//!
//! Favorites reference notes by id only; they never read or write document
//! content. A `(user_id, note_id)` pair can be favorited at most once, and
//! deleting a note removes its favorites.

use serde::{Deserialize, Serialize};

/// A user's mark on a note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub id: String,
    pub user_id: String,
    pub note_id: String,
    pub created_at: i64,
}

/// A favorite joined with the fields the sidebar needs to link to its note.
///
/// # Examples
///
/// ```rust
/// use lightnote_core::FavoriteEntry;
///
/// let entry = FavoriteEntry {
///     id: "fav-1".to_string(),
///     note_id: "note-1".to_string(),
///     notebook_id: "nb-1".to_string(),
///     title: "Ideas".to_string(),
///     emoji: "💡".to_string(),
///     created_at: 0,
/// };
/// let json = serde_json::to_string(&entry).unwrap();
/// assert!(json.contains("\"noteId\":\"note-1\""));
/// assert!(json.contains("\"notebookId\":\"nb-1\""));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteEntry {
    pub id: String,
    pub note_id: String,
    pub notebook_id: String,
    pub title: String,
    pub emoji: String,
    pub created_at: i64,
}
