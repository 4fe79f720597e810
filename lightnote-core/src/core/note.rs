use crate::core::document::DocumentNode;
use crate::{LightNoteError, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimum length, in characters, of a note title or notebook name.
pub const MIN_NAME_CHARS: usize = 2;

/// Maximum length, in characters, of a note title or notebook name.
pub const MAX_NAME_CHARS: usize = 50;

/// A stored note. `images` is derived from `content` on every write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    pub emoji: String,
    pub notebook_id: String,
    pub content: Option<DocumentNode>,
    pub images: Vec<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Payload for creating a note.
///
/// `content` is the raw editor document; `images`, if supplied, overrides
/// the list that would otherwise be extracted from `content`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNote {
    pub title: String,
    pub emoji: String,
    pub notebook_id: String,
    #[serde(default)]
    pub content: Option<DocumentNode>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
}

impl NewNote {
    /// Checks the same constraints as the note creation form.
    ///
    /// # Errors
    ///
    /// Returns [`LightNoteError::ValidationFailed`] if the title is not
    /// 2–50 characters or the emoji is empty.
    pub fn validate(&self) -> Result<()> {
        validate_name("Title", &self.title)?;
        validate_emoji(&self.emoji)
    }

    /// Builds the record to insert, with a fresh id and timestamps.
    ///
    /// `content` and `images` are taken as given; run them through
    /// [`prepare_content`](crate::prepare_content) first.
    pub fn into_note(self, content: Option<DocumentNode>, images: Vec<String>) -> Note {
        let now = chrono::Utc::now().timestamp();
        Note {
            id: Uuid::new_v4().to_string(),
            title: self.title.trim().to_string(),
            emoji: self.emoji,
            notebook_id: self.notebook_id,
            content,
            images,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A partial update. Every `None` field is left as stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notebook_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<DocumentNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

impl NotePatch {
    /// Returns `true` if the patch would not change anything.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.emoji.is_none()
            && self.notebook_id.is_none()
            && self.content.is_none()
            && self.images.is_none()
    }

    /// Validates only the fields the patch supplies.
    ///
    /// # Errors
    ///
    /// Returns [`LightNoteError::ValidationFailed`] on the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title {
            validate_name("Title", title)?;
        }
        if let Some(emoji) = &self.emoji {
            validate_emoji(emoji)?;
        }
        Ok(())
    }

    /// Copies every supplied field onto `note`. Does not touch timestamps.
    pub fn apply_to(&self, note: &mut Note) {
        if let Some(title) = &self.title {
            note.title = title.trim().to_string();
        }
        if let Some(emoji) = &self.emoji {
            note.emoji = emoji.clone();
        }
        if let Some(notebook_id) = &self.notebook_id {
            note.notebook_id = notebook_id.clone();
        }
        if let Some(content) = &self.content {
            note.content = Some(content.clone());
        }
        if let Some(images) = &self.images {
            note.images = images.clone();
        }
    }
}

pub(crate) fn validate_name(label: &str, name: &str) -> Result<()> {
    let len = name.trim().chars().count();
    if len < MIN_NAME_CHARS {
        return Err(LightNoteError::ValidationFailed(format!(
            "{label} must be at least {MIN_NAME_CHARS} characters"
        )));
    }
    if len > MAX_NAME_CHARS {
        return Err(LightNoteError::ValidationFailed(format!(
            "{label} must be at most {MAX_NAME_CHARS} characters"
        )));
    }
    Ok(())
}

pub(crate) fn validate_emoji(emoji: &str) -> Result<()> {
    if emoji.trim().is_empty() {
        return Err(LightNoteError::ValidationFailed(
            "Emoji is required".to_string(),
        ));
    }
    Ok(())
}
