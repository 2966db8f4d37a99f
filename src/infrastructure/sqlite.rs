// src/infrastructure/sqlite.rs
use crate::application::NoteDataService;
use crate::domain::{DomainError, Identity, NewNote, Note, NoteId};
use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};
use uuid::Uuid;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS notes (
    id          TEXT PRIMARY KEY,
    owner       TEXT NOT NULL,
    name        TEXT NOT NULL,
    description TEXT NOT NULL,
    image       TEXT,
    created_at  TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS notes_owner ON notes(owner);
";

fn db_error(e: rusqlite::Error) -> DomainError {
    DomainError::DataService(e.to_string())
}

/// Note records in a local SQLite database, partitioned by owner
pub struct SqliteNoteService {
    conn: Connection,
}

impl SqliteNoteService {
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let path = PathBuf::from(db_path.as_ref());
        debug!(?path, "Opening note database");

        let conn = Connection::open(&path)
            .with_context(|| format!("Failed to open note database at {}", path.display()))?;
        Self::with_connection(conn)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)
            .context("Failed to initialize note schema")?;
        Ok(Self { conn })
    }
}

impl NoteDataService for SqliteNoteService {
    #[instrument(level = "debug", skip(self))]
    async fn list_notes(&self, owner: &Identity) -> Result<Vec<Note>, DomainError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, name, description, image FROM notes
                 WHERE owner = ?1 ORDER BY created_at, rowid",
            )
            .map_err(db_error)?;

        let notes = stmt
            .query_map(params![owner.as_str()], |row| {
                Ok(Note {
                    id: NoteId::new(row.get::<_, String>(0)?),
                    name: row.get(1)?,
                    description: row.get(2)?,
                    image: row.get(3)?,
                })
            })
            .map_err(db_error)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(db_error)?;

        debug!(count = notes.len(), "Listed notes");
        Ok(notes)
    }

    #[instrument(level = "debug", skip(self, note), fields(name = %note.name))]
    async fn create_note(&self, owner: &Identity, note: NewNote) -> Result<Note, DomainError> {
        let id = NoteId::new(Uuid::new_v4().to_string());
        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);

        self.conn
            .execute(
                "INSERT INTO notes (id, owner, name, description, image, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    id.as_str(),
                    owner.as_str(),
                    note.name,
                    note.description,
                    note.image,
                    created_at
                ],
            )
            .map_err(db_error)?;

        info!(note_id = %id, "Inserted note");
        Ok(Note {
            id,
            name: note.name,
            description: note.description,
            image: note.image,
        })
    }

    #[instrument(level = "debug", skip(self))]
    async fn delete_note(&self, owner: &Identity, id: &NoteId) -> Result<(), DomainError> {
        let deleted = self
            .conn
            .execute(
                "DELETE FROM notes WHERE id = ?1 AND owner = ?2",
                params![id.as_str(), owner.as_str()],
            )
            .map_err(db_error)?;

        if deleted == 0 {
            debug!(note_id = %id, "Note not found for deletion");
            return Err(DomainError::NoteNotFound(id.clone()));
        }
        Ok(())
    }
}
