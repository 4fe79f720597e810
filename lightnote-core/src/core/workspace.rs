//! High-level operations over a LightNote SQLite database.

use crate::core::note::{validate_emoji, validate_name};
use crate::{
    DocumentNode, Favorite, FavoriteEntry, LightNoteError, Note, NotePatch, NoteRepository,
    Notebook, Result, Storage,
};
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use uuid::Uuid;

/// Version written to `workspace_meta` when a database is created.
pub const SCHEMA_VERSION: &str = "1";

const NOTE_COLUMNS: &str =
    "id, title, emoji, notebook_id, content_json, images_json, created_at, updated_at";

const NOTEBOOK_COLUMNS: &str = "id, name, emoji, user_id, created_at, updated_at";

/// An open LightNote database.
///
/// `Workspace` owns the SQLite connection and is the [`NoteRepository`] used by
/// [`NoteService`](crate::NoteService). Notebook and favorite operations live
/// here directly since they never touch document content.
pub struct Workspace {
    storage: Storage,
}

impl Workspace {
    /// Creates a new database at `path` and initialises the schema.
    ///
    /// # Errors
    ///
    /// Returns [`LightNoteError::Database`] for any SQLite failure.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let storage = Storage::create(&path)?;
        let now = chrono::Utc::now().timestamp();

        storage.connection().execute(
            "INSERT INTO workspace_meta (key, value) VALUES (?, ?)",
            ["schema_version", SCHEMA_VERSION],
        )?;
        storage.connection().execute(
            "INSERT INTO workspace_meta (key, value) VALUES (?, ?)",
            rusqlite::params!["created_at", now.to_string()],
        )?;

        log::debug!("created workspace at {}", path.as_ref().display());
        Ok(Self { storage })
    }

    /// Opens an existing database at `path`, migrating it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`LightNoteError::InvalidWorkspace`] if the file is not a
    /// LightNote database, or [`LightNoteError::Database`] for any SQLite failure.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let storage = Storage::open(&path)?;
        log::debug!("opened workspace at {}", path.as_ref().display());
        Ok(Self { storage })
    }

    /// Returns the underlying SQLite connection.
    pub fn connection(&self) -> &Connection {
        self.storage.connection()
    }

    /// Returns the schema version recorded when the database was created.
    pub fn schema_version(&self) -> Result<Option<String>> {
        let version = self
            .connection()
            .query_row(
                "SELECT value FROM workspace_meta WHERE key = 'schema_version'",
                [],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(version)
    }

    // ── Notebooks ────────────────────────────────────────────────────

    /// Creates a notebook owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`LightNoteError::ValidationFailed`] if the name is not 2–50
    /// characters or the emoji is empty.
    pub fn create_notebook(&mut self, name: &str, emoji: &str, user_id: &str) -> Result<Notebook> {
        validate_name("Name", name)?;
        validate_emoji(emoji)?;

        let now = chrono::Utc::now().timestamp();
        let notebook = Notebook {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            emoji: emoji.to_string(),
            user_id: user_id.to_string(),
            created_at: now,
            updated_at: now,
        };

        self.connection().execute(
            "INSERT INTO notebooks (id, name, emoji, user_id, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            rusqlite::params![
                notebook.id,
                notebook.name,
                notebook.emoji,
                notebook.user_id,
                notebook.created_at,
                notebook.updated_at,
            ],
        )?;

        Ok(notebook)
    }

    /// Fetches a single notebook by ID.
    ///
    /// # Errors
    ///
    /// Returns [`LightNoteError::NotebookNotFound`] if `notebook_id` does not exist.
    pub fn get_notebook(&self, notebook_id: &str) -> Result<Notebook> {
        load_notebook(self.connection(), notebook_id)
    }

    /// Returns the notebooks owned by `user_id`, oldest first.
    pub fn list_notebooks(&self, user_id: &str) -> Result<Vec<Notebook>> {
        let mut stmt = self.connection().prepare(&format!(
            "SELECT {NOTEBOOK_COLUMNS} FROM notebooks WHERE user_id = ?1 ORDER BY created_at, rowid"
        ))?;
        let notebooks = stmt
            .query_map([user_id], map_notebook_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(notebooks)
    }

    /// Renames a notebook and/or changes its emoji.
    ///
    /// # Errors
    ///
    /// Returns [`LightNoteError::ValidationFailed`] for an invalid name or
    /// emoji, or [`LightNoteError::NotebookNotFound`] if `notebook_id` does not exist.
    pub fn update_notebook(
        &mut self,
        notebook_id: &str,
        name: Option<&str>,
        emoji: Option<&str>,
    ) -> Result<Notebook> {
        if let Some(name) = name {
            validate_name("Name", name)?;
        }
        if let Some(emoji) = emoji {
            validate_emoji(emoji)?;
        }

        let tx = self.storage.connection_mut().transaction()?;
        let mut notebook = load_notebook(&tx, notebook_id)?;
        if let Some(name) = name {
            notebook.name = name.trim().to_string();
        }
        if let Some(emoji) = emoji {
            notebook.emoji = emoji.to_string();
        }
        notebook.updated_at = chrono::Utc::now().timestamp();

        tx.execute(
            "UPDATE notebooks SET name = ?1, emoji = ?2, updated_at = ?3 WHERE id = ?4",
            rusqlite::params![notebook.name, notebook.emoji, notebook.updated_at, notebook.id],
        )?;
        tx.commit()?;

        Ok(notebook)
    }

    /// Deletes a notebook and every note in it. Returns the number of notes removed.
    ///
    /// # Errors
    ///
    /// Returns [`LightNoteError::NotebookNotFound`] if `notebook_id` does not exist.
    pub fn delete_notebook(&mut self, notebook_id: &str) -> Result<usize> {
        let tx = self.storage.connection_mut().transaction()?;

        let note_count: i64 = tx.query_row(
            "SELECT COUNT(*) FROM notes WHERE notebook_id = ?1",
            [notebook_id],
            |row| row.get(0),
        )?;

        tx.execute("DELETE FROM notebooks WHERE id = ?1", [notebook_id])?;
        if tx.changes() == 0 {
            return Err(LightNoteError::NotebookNotFound(notebook_id.to_string()));
        }

        tx.commit()?;
        log::debug!("deleted notebook {notebook_id} with {note_count} notes");
        Ok(note_count as usize)
    }

    // ── Notes ────────────────────────────────────────────────────────

    /// Fetches a single note by ID, exactly as stored.
    ///
    /// # Errors
    ///
    /// Returns [`LightNoteError::NoteNotFound`] if the note does not exist, or
    /// [`LightNoteError::Json`] if its stored content is corrupt.
    pub fn get_note(&self, note_id: &str) -> Result<Note> {
        load_note(self.connection(), note_id)
    }

    /// Returns every note, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`LightNoteError::Json`] if any row's content is corrupt.
    pub fn list_all_notes(&self) -> Result<Vec<Note>> {
        let mut stmt = self
            .connection()
            .prepare(&format!("SELECT {NOTE_COLUMNS} FROM notes ORDER BY created_at, rowid"))?;
        let rows = stmt
            .query_map([], map_note_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        rows.into_iter().map(note_from_row_tuple).collect()
    }

    /// Returns the notes of one notebook, in insertion order.
    pub fn list_notes_in_notebook(&self, notebook_id: &str) -> Result<Vec<Note>> {
        let mut stmt = self.connection().prepare(&format!(
            "SELECT {NOTE_COLUMNS} FROM notes WHERE notebook_id = ?1 ORDER BY created_at, rowid"
        ))?;
        let rows = stmt
            .query_map([notebook_id], map_note_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        rows.into_iter().map(note_from_row_tuple).collect()
    }

    /// Returns the id of every note, in insertion order.
    pub fn list_note_ids(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .connection()
            .prepare("SELECT id FROM notes ORDER BY created_at, rowid")?;
        let ids = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(ids)
    }

    /// Inserts `note` as given. Content is stored verbatim; sanitizing is the
    /// caller's job.
    ///
    /// # Errors
    ///
    /// Returns [`LightNoteError::NotebookNotFound`] if the note's notebook does
    /// not exist, or [`LightNoteError::Database`] for any SQLite failure
    /// (including a duplicate id).
    pub fn insert_note(&mut self, note: &Note) -> Result<()> {
        let content_json = content_to_json(note.content.as_ref())?;
        let images_json = serde_json::to_string(&note.images)?;

        let tx = self.storage.connection_mut().transaction()?;
        ensure_notebook_exists(&tx, &note.notebook_id)?;

        tx.execute(
            &format!("INSERT INTO notes ({NOTE_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?)"),
            rusqlite::params![
                note.id,
                note.title,
                note.emoji,
                note.notebook_id,
                content_json,
                images_json,
                note.created_at,
                note.updated_at,
            ],
        )?;

        tx.commit()?;
        Ok(())
    }

    /// Applies `patch` to the stored note and refreshes `updated_at`.
    ///
    /// Read-modify-write runs in one transaction, so the row is either fully
    /// updated or left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`LightNoteError::NoteNotFound`] if `note_id` does not exist, or
    /// [`LightNoteError::NotebookNotFound`] if the patch moves the note to an
    /// unknown notebook.
    pub fn update_note(&mut self, note_id: &str, patch: &NotePatch) -> Result<Note> {
        let tx = self.storage.connection_mut().transaction()?;

        let mut note = load_note(&tx, note_id)?;
        if let Some(notebook_id) = &patch.notebook_id {
            ensure_notebook_exists(&tx, notebook_id)?;
        }
        patch.apply_to(&mut note);
        note.updated_at = chrono::Utc::now().timestamp();

        let content_json = content_to_json(note.content.as_ref())?;
        let images_json = serde_json::to_string(&note.images)?;

        tx.execute(
            "UPDATE notes SET title = ?1, emoji = ?2, notebook_id = ?3, content_json = ?4,
                              images_json = ?5, updated_at = ?6
             WHERE id = ?7",
            rusqlite::params![
                note.title,
                note.emoji,
                note.notebook_id,
                content_json,
                images_json,
                note.updated_at,
                note.id,
            ],
        )?;

        tx.commit()?;
        Ok(note)
    }

    /// Deletes a note together with any favorites pointing at it.
    ///
    /// # Errors
    ///
    /// Returns [`LightNoteError::NoteNotFound`] if `note_id` does not exist.
    pub fn delete_note(&mut self, note_id: &str) -> Result<()> {
        let tx = self.storage.connection_mut().transaction()?;
        tx.execute("DELETE FROM notes WHERE id = ?1", [note_id])?;

        // SQLite DELETE silently affects zero rows for unknown IDs.
        if tx.changes() == 0 {
            return Err(LightNoteError::NoteNotFound(note_id.to_string()));
        }

        tx.commit()?;
        Ok(())
    }

    // ── Favorites ────────────────────────────────────────────────────

    /// Marks `note_id` as a favorite of `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`LightNoteError::NoteNotFound`] if the note does not exist, or
    /// [`LightNoteError::AlreadyFavorited`] if the pair is already recorded.
    pub fn add_favorite(&mut self, user_id: &str, note_id: &str) -> Result<Favorite> {
        let tx = self.storage.connection_mut().transaction()?;

        let note_exists: bool = tx.query_row(
            "SELECT COUNT(*) FROM notes WHERE id = ?1",
            [note_id],
            |row| row.get::<_, i64>(0).map(|count| count > 0),
        )?;
        if !note_exists {
            return Err(LightNoteError::NoteNotFound(note_id.to_string()));
        }

        let already: bool = tx.query_row(
            "SELECT COUNT(*) FROM favorites WHERE user_id = ?1 AND note_id = ?2",
            [user_id, note_id],
            |row| row.get::<_, i64>(0).map(|count| count > 0),
        )?;
        if already {
            return Err(LightNoteError::AlreadyFavorited(note_id.to_string()));
        }

        let favorite = Favorite {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            note_id: note_id.to_string(),
            created_at: chrono::Utc::now().timestamp(),
        };
        tx.execute(
            "INSERT INTO favorites (id, user_id, note_id, created_at) VALUES (?, ?, ?, ?)",
            rusqlite::params![favorite.id, favorite.user_id, favorite.note_id, favorite.created_at],
        )?;

        tx.commit()?;
        Ok(favorite)
    }

    /// Removes a favorite. Returns `false` if there was nothing to remove.
    pub fn remove_favorite(&mut self, user_id: &str, note_id: &str) -> Result<bool> {
        let removed = self.connection().execute(
            "DELETE FROM favorites WHERE user_id = ?1 AND note_id = ?2",
            [user_id, note_id],
        )?;
        Ok(removed > 0)
    }

    /// Returns `user_id`'s favorites with their note summaries, newest first.
    pub fn list_favorites(&self, user_id: &str) -> Result<Vec<FavoriteEntry>> {
        let mut stmt = self.connection().prepare(
            "SELECT f.id, f.note_id, n.notebook_id, n.title, n.emoji, f.created_at
             FROM favorites f
             JOIN notes n ON n.id = f.note_id
             WHERE f.user_id = ?1
             ORDER BY f.created_at DESC, f.rowid DESC",
        )?;
        let entries = stmt
            .query_map([user_id], |row| {
                Ok(FavoriteEntry {
                    id: row.get(0)?,
                    note_id: row.get(1)?,
                    notebook_id: row.get(2)?,
                    title: row.get(3)?,
                    emoji: row.get(4)?,
                    created_at: row.get(5)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(entries)
    }
}

impl NoteRepository for Workspace {
    fn insert(&mut self, note: &Note) -> Result<()> {
        self.insert_note(note)
    }

    fn update(&mut self, id: &str, patch: &NotePatch) -> Result<Note> {
        self.update_note(id, patch)
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Note>> {
        match self.get_note(id) {
            Ok(note) => Ok(Some(note)),
            Err(LightNoteError::NoteNotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn find_all(&self) -> Result<Vec<Note>> {
        self.list_all_notes()
    }

    fn find_all_ids(&self) -> Result<Vec<String>> {
        self.list_note_ids()
    }

    fn delete_by_id(&mut self, id: &str) -> Result<()> {
        self.delete_note(id)
    }
}

/// Raw 8-column tuple extracted from a `notes` row.
type NoteRow = (String, String, String, String, Option<String>, String, i64, i64);

/// Row-mapping closure for `rusqlite::Row` → raw tuple.
///
/// JSON columns are decoded in `note_from_row_tuple` so that a corrupt
/// document surfaces as [`LightNoteError::Json`] rather than a SQLite error.
fn map_note_row(row: &rusqlite::Row) -> rusqlite::Result<NoteRow> {
    Ok((
        row.get::<_, String>(0)?,
        row.get::<_, String>(1)?,
        row.get::<_, String>(2)?,
        row.get::<_, String>(3)?,
        row.get::<_, Option<String>>(4)?,
        row.get::<_, String>(5)?,
        row.get::<_, i64>(6)?,
        row.get::<_, i64>(7)?,
    ))
}

fn note_from_row_tuple(
    (id, title, emoji, notebook_id, content_json, images_json, created_at, updated_at): NoteRow,
) -> Result<Note> {
    // A JSON `null` in content_json means the same as SQL NULL.
    let content = content_json
        .as_deref()
        .map(serde_json::from_str::<Option<DocumentNode>>)
        .transpose()?
        .flatten();

    Ok(Note {
        id,
        title,
        emoji,
        notebook_id,
        content,
        images: serde_json::from_str(&images_json)?,
        created_at,
        updated_at,
    })
}

fn map_notebook_row(row: &rusqlite::Row) -> rusqlite::Result<Notebook> {
    Ok(Notebook {
        id: row.get(0)?,
        name: row.get(1)?,
        emoji: row.get(2)?,
        user_id: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

fn load_note(conn: &Connection, note_id: &str) -> Result<Note> {
    let row = conn
        .query_row(
            &format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = ?1"),
            [note_id],
            map_note_row,
        )
        .optional()?
        .ok_or_else(|| LightNoteError::NoteNotFound(note_id.to_string()))?;
    note_from_row_tuple(row)
}

fn load_notebook(conn: &Connection, notebook_id: &str) -> Result<Notebook> {
    conn.query_row(
        &format!("SELECT {NOTEBOOK_COLUMNS} FROM notebooks WHERE id = ?1"),
        [notebook_id],
        map_notebook_row,
    )
    .optional()?
    .ok_or_else(|| LightNoteError::NotebookNotFound(notebook_id.to_string()))
}

fn ensure_notebook_exists(conn: &Connection, notebook_id: &str) -> Result<()> {
    let exists: bool = conn.query_row(
        "SELECT COUNT(*) FROM notebooks WHERE id = ?1",
        [notebook_id],
        |row| row.get::<_, i64>(0).map(|count| count > 0),
    )?;
    if !exists {
        return Err(LightNoteError::NotebookNotFound(notebook_id.to_string()));
    }
    Ok(())
}

fn content_to_json(content: Option<&DocumentNode>) -> Result<Option<String>> {
    Ok(content.map(serde_json::to_string).transpose()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NewNote;
    use serde_json::json;
    use tempfile::NamedTempFile;

    fn setup() -> (NamedTempFile, Workspace, Notebook) {
        let temp = NamedTempFile::new().unwrap();
        let mut ws = Workspace::create(temp.path()).unwrap();
        let notebook = ws.create_notebook("Personal", "📓", "user-1").unwrap();
        (temp, ws, notebook)
    }

    fn new_note(ws: &mut Workspace, notebook_id: &str, title: &str) -> Note {
        let note = NewNote {
            title: title.to_string(),
            emoji: "📝".to_string(),
            notebook_id: notebook_id.to_string(),
            ..NewNote::default()
        }
        .into_note(None, vec![]);
        ws.insert_note(&note).unwrap();
        note
    }

    #[test]
    fn test_create_workspace_records_schema_version() {
        let temp = NamedTempFile::new().unwrap();
        let ws = Workspace::create(temp.path()).unwrap();
        assert_eq!(ws.schema_version().unwrap().as_deref(), Some(SCHEMA_VERSION));
    }

    #[test]
    fn test_open_existing_workspace() {
        let temp = NamedTempFile::new().unwrap();
        {
            let mut ws = Workspace::create(temp.path()).unwrap();
            let nb = ws.create_notebook("Work", "💼", "user-1").unwrap();
            new_note(&mut ws, &nb.id, "Standup");
        }

        let ws = Workspace::open(temp.path()).unwrap();
        let notes = ws.list_all_notes().unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "Standup");
    }

    #[test]
    fn test_insert_and_get_note_with_content() {
        let (_temp, mut ws, nb) = setup();
        let content: DocumentNode = serde_json::from_value(json!({
            "type": "doc",
            "content": [{ "type": "image", "attrs": { "src": "a.png" } }]
        }))
        .unwrap();
        let note = NewNote {
            title: "Photos".to_string(),
            emoji: "📷".to_string(),
            notebook_id: nb.id.clone(),
            ..NewNote::default()
        }
        .into_note(Some(content.clone()), vec!["a.png".to_string()]);

        ws.insert_note(&note).unwrap();

        let stored = ws.get_note(&note.id).unwrap();
        assert_eq!(stored, note);
        assert_eq!(stored.content, Some(content));
    }

    #[test]
    fn test_insert_note_into_unknown_notebook() {
        let (_temp, mut ws, _nb) = setup();
        let note = NewNote {
            title: "Orphan".to_string(),
            emoji: "❓".to_string(),
            notebook_id: "missing".to_string(),
            ..NewNote::default()
        }
        .into_note(None, vec![]);

        let result = ws.insert_note(&note);
        assert!(matches!(result, Err(LightNoteError::NotebookNotFound(_))));
    }

    #[test]
    fn test_get_missing_note() {
        let (_temp, ws, _nb) = setup();
        assert!(matches!(ws.get_note("nope"), Err(LightNoteError::NoteNotFound(_))));
        assert_eq!(ws.find_by_id("nope").unwrap(), None);
    }

    #[test]
    fn test_json_null_content_reads_as_absent() {
        let (_temp, mut ws, nb) = setup();
        let note = new_note(&mut ws, &nb.id, "Legacy");
        ws.connection()
            .execute("UPDATE notes SET content_json = 'null' WHERE id = ?1", [&note.id])
            .unwrap();

        assert_eq!(ws.get_note(&note.id).unwrap().content, None);
    }

    #[test]
    fn test_update_note_partial() {
        let (_temp, mut ws, nb) = setup();
        let note = new_note(&mut ws, &nb.id, "Draft");
        ws.update_note(
            &note.id,
            &NotePatch {
                images: Some(vec!["x.png".to_string()]),
                ..NotePatch::default()
            },
        )
        .unwrap();

        let updated = ws
            .update_note(
                &note.id,
                &NotePatch {
                    title: Some("Final".to_string()),
                    ..NotePatch::default()
                },
            )
            .unwrap();

        assert_eq!(updated.title, "Final");
        assert_eq!(updated.emoji, "📝");
        assert_eq!(updated.images, vec!["x.png"]);
        assert_eq!(ws.get_note(&note.id).unwrap(), updated);
    }

    #[test]
    fn test_update_missing_note() {
        let (_temp, mut ws, _nb) = setup();
        let result = ws.update_note("nope", &NotePatch::default());
        assert!(matches!(result, Err(LightNoteError::NoteNotFound(_))));
    }

    #[test]
    fn test_move_note_to_unknown_notebook_leaves_it_untouched() {
        let (_temp, mut ws, nb) = setup();
        let note = new_note(&mut ws, &nb.id, "Pinned");

        let result = ws.update_note(
            &note.id,
            &NotePatch {
                title: Some("Moved".to_string()),
                notebook_id: Some("missing".to_string()),
                ..NotePatch::default()
            },
        );

        assert!(matches!(result, Err(LightNoteError::NotebookNotFound(_))));
        assert_eq!(ws.get_note(&note.id).unwrap().title, "Pinned");
    }

    #[test]
    fn test_delete_note() {
        let (_temp, mut ws, nb) = setup();
        let note = new_note(&mut ws, &nb.id, "Temp");

        ws.delete_note(&note.id).unwrap();
        assert!(ws.list_all_notes().unwrap().is_empty());
        assert!(matches!(ws.delete_note(&note.id), Err(LightNoteError::NoteNotFound(_))));
    }

    #[test]
    fn test_list_notes_in_insertion_order() {
        let (_temp, mut ws, nb) = setup();
        let other = ws.create_notebook("Other", "📁", "user-1").unwrap();
        let a = new_note(&mut ws, &nb.id, "First");
        let b = new_note(&mut ws, &other.id, "Second");
        let c = new_note(&mut ws, &nb.id, "Third");

        let all: Vec<_> = ws.list_all_notes().unwrap().into_iter().map(|n| n.id).collect();
        assert_eq!(all, vec![a.id.clone(), b.id.clone(), c.id.clone()]);
        assert_eq!(ws.list_note_ids().unwrap(), all);

        let in_nb: Vec<_> = ws
            .list_notes_in_notebook(&nb.id)
            .unwrap()
            .into_iter()
            .map(|n| n.id)
            .collect();
        assert_eq!(in_nb, vec![a.id, c.id]);
    }

    #[test]
    fn test_notebook_crud() {
        let (_temp, mut ws, nb) = setup();
        ws.create_notebook("Someone else's", "🔒", "user-2").unwrap();

        let listed = ws.list_notebooks("user-1").unwrap();
        assert_eq!(listed, vec![nb.clone()]);

        let renamed = ws.update_notebook(&nb.id, Some("Journal"), None).unwrap();
        assert_eq!(renamed.name, "Journal");
        assert_eq!(renamed.emoji, "📓");
        assert_eq!(ws.get_notebook(&nb.id).unwrap(), renamed);
    }

    #[test]
    fn test_notebook_validation() {
        let (_temp, mut ws, nb) = setup();
        assert!(matches!(
            ws.create_notebook("x", "📓", "user-1"),
            Err(LightNoteError::ValidationFailed(_))
        ));
        assert!(ws.create_notebook("Valid", "", "user-1").is_err());
        assert!(ws.update_notebook(&nb.id, Some(""), None).is_err());
        assert!(matches!(
            ws.update_notebook("missing", Some("Fine"), None),
            Err(LightNoteError::NotebookNotFound(_))
        ));
    }

    #[test]
    fn test_delete_notebook_cascades_to_notes_and_favorites() {
        let (_temp, mut ws, nb) = setup();
        let note = new_note(&mut ws, &nb.id, "Doomed");
        new_note(&mut ws, &nb.id, "Also doomed");
        ws.add_favorite("user-1", &note.id).unwrap();

        assert_eq!(ws.delete_notebook(&nb.id).unwrap(), 2);
        assert!(ws.list_all_notes().unwrap().is_empty());
        assert!(ws.list_favorites("user-1").unwrap().is_empty());
        assert!(matches!(
            ws.delete_notebook(&nb.id),
            Err(LightNoteError::NotebookNotFound(_))
        ));
    }

    #[test]
    fn test_favorites() {
        let (_temp, mut ws, nb) = setup();
        let a = new_note(&mut ws, &nb.id, "Alpha");
        let b = new_note(&mut ws, &nb.id, "Beta");

        ws.add_favorite("user-1", &a.id).unwrap();
        ws.add_favorite("user-1", &b.id).unwrap();
        ws.add_favorite("user-2", &a.id).unwrap();

        let favs = ws.list_favorites("user-1").unwrap();
        let titles: Vec<_> = favs.iter().map(|f| f.title.as_str()).collect();
        assert_eq!(titles, vec!["Beta", "Alpha"]);
        assert_eq!(favs[0].notebook_id, nb.id);

        assert!(matches!(
            ws.add_favorite("user-1", &a.id),
            Err(LightNoteError::AlreadyFavorited(_))
        ));
        assert!(matches!(
            ws.add_favorite("user-1", "missing"),
            Err(LightNoteError::NoteNotFound(_))
        ));

        assert!(ws.remove_favorite("user-1", &a.id).unwrap());
        assert!(!ws.remove_favorite("user-1", &a.id).unwrap());
        assert_eq!(ws.list_favorites("user-1").unwrap().len(), 1);
        assert_eq!(ws.list_favorites("user-2").unwrap().len(), 1);
    }

    #[test]
    fn test_delete_note_removes_its_favorites() {
        let (_temp, mut ws, nb) = setup();
        let note = new_note(&mut ws, &nb.id, "Starred");
        ws.add_favorite("user-1", &note.id).unwrap();

        ws.delete_note(&note.id).unwrap();
        let count: i64 = ws
            .connection()
            .query_row("SELECT COUNT(*) FROM favorites", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
