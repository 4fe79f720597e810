//! Notebook record type.

use serde::{Deserialize, Serialize};

/// A named collection of notes owned by a single user.
///
/// Deleting a notebook deletes every note in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notebook {
    pub id: String,
    pub name: String,
    pub emoji: String,
    pub user_id: String,
    pub created_at: i64,
    pub updated_at: i64,
}
