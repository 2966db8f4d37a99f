// src/application/note_deleter.rs
use crate::application::NoteDataService;
use crate::domain::{DomainError, NoteId, Session};
use tracing::{info, instrument};

pub struct NoteDeleter<'a, D> {
    data: &'a D,
}

impl<'a, D: NoteDataService> NoteDeleter<'a, D> {
    pub fn new(data: &'a D) -> Self {
        Self { data }
    }

    /// Delete a note owned by the signed-in identity
    #[instrument(level = "debug", skip(self, session), fields(identity = %session.identity))]
    pub async fn delete(&self, session: &Session, id: &NoteId) -> Result<(), DomainError> {
        self.data.delete_note(session.identity(), id).await?;
        info!(note_id = %id, "Deleted note");
        Ok(())
    }
}
