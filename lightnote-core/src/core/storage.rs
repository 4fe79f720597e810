//! SQLite connection ownership, schema creation and migration.

use crate::Result;
use rusqlite::Connection;
use std::path::Path;

pub struct Storage {
    conn: Connection,
}

impl Storage {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(include_str!("schema.sql"))?;
        Ok(Self { conn })
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        // Validate database structure
        let table_count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master
             WHERE type='table'
             AND name IN ('notebooks', 'notes', 'favorites', 'workspace_meta')",
            [],
            |row| row.get(0),
        )?;

        if table_count != 4 {
            return Err(crate::LightNoteError::InvalidWorkspace(
                "Not a valid LightNote database".to_string(),
            ));
        }

        // Migrate: stores created before images were denormalized lack images_json.
        // The maintenance pass backfills it from content.
        let column_exists: bool = conn.query_row(
            "SELECT COUNT(*) FROM pragma_table_info('notes') WHERE name='images_json'",
            [],
            |row| row.get::<_, i64>(0).map(|count| count > 0),
        )?;

        if !column_exists {
            log::info!("migrating notes table: adding images_json column");
            conn.execute(
                "ALTER TABLE notes ADD COLUMN images_json TEXT NOT NULL DEFAULT '[]'",
                [],
            )?;
        }

        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }
}
