//! The note write path.
//!
//! [`NoteService`] runs every document through the sanitizer before it
//! reaches storage and keeps the denormalized `images` list in step with it.
//! Its public operations return envelopes ([`ActionResult`], [`NoteLookup`])
//! instead of errors; the `try_*` variants expose the typed error for callers
//! that want it.

use crate::core::document::IMAGE_UPLOAD;
use crate::{
    extract_image_urls, prepare_content, sanitize_document, ActionResult, NewNote, Note,
    NoteLookup, NotePatch, NoteRepository, Result, SanitizeFailure, SanitizeReport,
};

/// Sanitizing front end over a [`NoteRepository`].
pub struct NoteService<R> {
    repository: R,
    placeholder_type: String,
}

impl<R: NoteRepository> NoteService<R> {
    /// Wraps `repository`, stripping `imageUpload` placeholders on write.
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            placeholder_type: IMAGE_UPLOAD.to_string(),
        }
    }

    /// Overrides the node type treated as a transient placeholder.
    #[must_use]
    pub fn with_placeholder_type(mut self, placeholder_type: impl Into<String>) -> Self {
        self.placeholder_type = placeholder_type.into();
        self
    }

    pub fn placeholder_type(&self) -> &str {
        &self.placeholder_type
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn repository_mut(&mut self) -> &mut R {
        &mut self.repository
    }

    pub fn into_inner(self) -> R {
        self.repository
    }

    /// Validates, sanitizes and inserts a new note.
    ///
    /// The envelope carries the new note's id on success.
    pub fn create_note(&mut self, values: NewNote) -> ActionResult {
        match self.try_create_note(values) {
            Ok(note) => ActionResult::ok("Note created successfully").with_id(note.id),
            Err(e) => {
                log::warn!("failed to create note: {e}");
                ActionResult::failed("Failed to create note")
            }
        }
    }

    /// Like [`create_note`](Self::create_note) but returns the stored record
    /// or the underlying error.
    ///
    /// # Errors
    ///
    /// Returns [`LightNoteError::ValidationFailed`](crate::LightNoteError::ValidationFailed)
    /// for an invalid title or emoji, or whatever the repository returns.
    pub fn try_create_note(&mut self, mut values: NewNote) -> Result<Note> {
        values.validate()?;

        let prepared = prepare_content(
            values.content.take(),
            values.images.take(),
            &self.placeholder_type,
        );
        let images = prepared.images.into_images().unwrap_or_default();
        let note = values.into_note(prepared.content, images);

        self.repository.insert(&note)?;
        log::debug!("created note {} with {} images", note.id, note.images.len());
        Ok(note)
    }

    /// Fetches a note with its content sanitized. Storage is not rewritten.
    pub fn get_note_by_id(&self, note_id: &str) -> NoteLookup {
        match self.repository.find_by_id(note_id) {
            Ok(note) => NoteLookup {
                success: true,
                note: note.map(|mut note| {
                    note.content = note
                        .content
                        .map(|doc| sanitize_document(&doc, &self.placeholder_type));
                    note
                }),
                message: None,
            },
            Err(e) => {
                log::warn!("failed to get note {note_id}: {e}");
                NoteLookup {
                    success: false,
                    note: None,
                    message: Some("Failed to get note".to_string()),
                }
            }
        }
    }

    /// Applies a partial update, sanitizing any supplied document.
    pub fn update_note(&mut self, note_id: &str, patch: NotePatch) -> ActionResult {
        match self.try_update_note(note_id, patch) {
            Ok(_) => ActionResult::ok("Note updated successfully"),
            Err(e) => {
                log::warn!("failed to update note {note_id}: {e}");
                ActionResult::failed("Failed to update note")
            }
        }
    }

    /// Like [`update_note`](Self::update_note) but returns the updated record
    /// or the underlying error.
    ///
    /// A supplied `images` list is stored verbatim. Otherwise a supplied
    /// document replaces the list with the one derived from it. With neither,
    /// the stored content and images are kept.
    ///
    /// # Errors
    ///
    /// Returns [`LightNoteError::ValidationFailed`](crate::LightNoteError::ValidationFailed)
    /// for an invalid title or emoji, or whatever the repository returns.
    pub fn try_update_note(&mut self, note_id: &str, mut patch: NotePatch) -> Result<Note> {
        patch.validate()?;

        let prepared = prepare_content(
            patch.content.take(),
            patch.images.take(),
            &self.placeholder_type,
        );
        patch.content = prepared.content;
        patch.images = prepared.images.into_images();

        self.repository.update(note_id, &patch)
    }

    pub fn delete_note(&mut self, note_id: &str) -> ActionResult {
        match self.repository.delete_by_id(note_id) {
            Ok(()) => ActionResult::ok("Note deleted successfully"),
            Err(e) => {
                log::warn!("failed to delete note {note_id}: {e}");
                ActionResult::failed("Failed to delete note")
            }
        }
    }

    /// Re-sanitizes every stored note and rebuilds its image list.
    ///
    /// See [`sanitize_all`](Self::sanitize_all) for the failure behaviour.
    pub fn sanitize_all_notes(&mut self) -> ActionResult {
        match self.sanitize_all() {
            Ok(report) => report.to_action_result(),
            Err(e) => {
                log::warn!("failed to sanitize notes: {e}");
                ActionResult::failed("Failed to sanitize notes")
            }
        }
    }

    /// Maintenance pass over every note.
    ///
    /// Records are independent: a note that fails to load or write is logged
    /// and recorded in the report, and the pass moves on to the next one.
    /// Notes deleted while the pass runs are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error only if the list of notes cannot be read.
    pub fn sanitize_all(&mut self) -> Result<SanitizeReport> {
        let ids = self.repository.find_all_ids()?;
        let mut report = SanitizeReport::default();

        for id in ids {
            match self.sanitize_one(&id) {
                Ok(true) => {
                    report.total += 1;
                    report.processed += 1;
                }
                Ok(false) => log::debug!("note {id} disappeared during sanitize pass"),
                Err(e) => {
                    log::warn!("failed to sanitize note {id}: {e}");
                    report.total += 1;
                    report.failures.push(SanitizeFailure {
                        note_id: id,
                        message: e.to_string(),
                    });
                }
            }
        }

        log::info!(
            "sanitize pass finished: {} of {} notes processed",
            report.processed,
            report.total
        );
        Ok(report)
    }

    /// Returns `false` if the note no longer exists. Notes that are already
    /// clean are not rewritten, so their `updated_at` is kept.
    fn sanitize_one(&mut self, note_id: &str) -> Result<bool> {
        let Some(note) = self.repository.find_by_id(note_id)? else {
            return Ok(false);
        };

        let content = note
            .content
            .as_ref()
            .map(|doc| sanitize_document(doc, &self.placeholder_type));
        let images = extract_image_urls(content.as_ref());
        if content == note.content && images == note.images {
            log::debug!("note {note_id} already clean");
            return Ok(true);
        }

        let patch = NotePatch {
            images: Some(images),
            content,
            ..NotePatch::default()
        };
        self.repository.update(note_id, &patch)?;
        Ok(true)
    }
}
