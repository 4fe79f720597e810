//! Result envelopes returned by [`NoteService`](crate::NoteService).
//!
//! Service operations never return `Err`: storage failures are logged and
//! folded into a `{ success: false, message }` envelope with a fixed,
//! per-operation message, so error details never reach the caller.
//!
//! All types serialize in camelCase, matching the JSON the web front end and
//! the CLI print.
//!
//! ```rust
//! use lightnote_core::ActionResult;
//!
//! let result = ActionResult::failed("Failed to create note");
//! let json = serde_json::to_string(&result).unwrap();
//! assert_eq!(json, r#"{"success":false,"message":"Failed to create note"}"#);
//! ```

use crate::Note;
use serde::{Deserialize, Serialize};

/// Outcome of a create, update, delete or maintenance call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResult {
    pub success: bool,
    pub message: String,
    /// ID of the record the call created, when there is one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl ActionResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            id: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            id: None,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Outcome of a single-note read.
///
/// A missing note is a successful lookup with `note: None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteLookup {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<Note>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// One note the maintenance pass could not rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizeFailure {
    pub note_id: String,
    pub message: String,
}

/// Per-record tally of a maintenance pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizeReport {
    /// Notes the pass attempted.
    pub total: usize,
    /// Notes rewritten successfully.
    pub processed: usize,
    pub failures: Vec<SanitizeFailure>,
}

impl SanitizeReport {
    /// Folds the report into the maintenance endpoint's envelope.
    ///
    /// ```rust
    /// use lightnote_core::{SanitizeFailure, SanitizeReport};
    ///
    /// let clean = SanitizeReport { total: 3, processed: 3, failures: vec![] };
    /// assert_eq!(clean.to_action_result().message, "Sanitized 3 notes");
    ///
    /// let partial = SanitizeReport {
    ///     total: 3,
    ///     processed: 2,
    ///     failures: vec![SanitizeFailure { note_id: "n".into(), message: "disk full".into() }],
    /// };
    /// let result = partial.to_action_result();
    /// assert!(!result.success);
    /// assert_eq!(result.message, "Sanitized 2 of 3 notes; 1 failed");
    /// ```
    pub fn to_action_result(&self) -> ActionResult {
        if self.failures.is_empty() {
            ActionResult::ok(format!("Sanitized {} notes", self.processed))
        } else {
            ActionResult::failed(format!(
                "Sanitized {} of {} notes; {} failed",
                self.processed,
                self.total,
                self.failures.len()
            ))
        }
    }
}
