//! The persistence seam between the note write path and storage.

use crate::{Note, NotePatch, Result};

/// Durable storage for note records.
///
/// [`NoteService`](crate::NoteService) only talks to storage through this
/// trait. [`Workspace`](crate::Workspace) is the SQLite implementation; each
/// call is atomic per record.
pub trait NoteRepository {
    /// Stores a new note.
    ///
    /// # Errors
    ///
    /// Implementations return an error if the note cannot be written, e.g.
    /// because its notebook does not exist.
    fn insert(&mut self, note: &Note) -> Result<()>;

    /// Applies `patch` to the stored note and returns the updated record.
    ///
    /// Fields the patch leaves as `None` keep their stored values.
    ///
    /// # Errors
    ///
    /// Returns [`LightNoteError::NoteNotFound`](crate::LightNoteError::NoteNotFound)
    /// if `id` does not exist.
    fn update(&mut self, id: &str, patch: &NotePatch) -> Result<Note>;

    /// Fetches a note, or `None` if `id` does not exist.
    fn find_by_id(&self, id: &str) -> Result<Option<Note>>;

    /// Fetches every note.
    fn find_all(&self) -> Result<Vec<Note>>;

    /// Returns the id of every note.
    ///
    /// Lets bulk passes load records one at a time so a single unreadable
    /// row does not hide the rest. The default loads everything.
    fn find_all_ids(&self) -> Result<Vec<String>> {
        Ok(self.find_all()?.into_iter().map(|note| note.id).collect())
    }

    /// Deletes a note.
    ///
    /// # Errors
    ///
    /// Returns [`LightNoteError::NoteNotFound`](crate::LightNoteError::NoteNotFound)
    /// if `id` does not exist.
    fn delete_by_id(&mut self, id: &str) -> Result<()>;
}
