// src/application/note_creator.rs
use crate::application::{NoteDataService, ObjectStorage};
use crate::domain::{media_path, DomainError, Note, NoteForm, Session};
use tracing::{info, instrument, warn};

pub struct NoteCreator<'a, D, S> {
    data: &'a D,
    storage: &'a S,
}

impl<'a, D: NoteDataService, S: ObjectStorage> NoteCreator<'a, D, S> {
    pub fn new(data: &'a D, storage: &'a S) -> Self {
        Self { data, storage }
    }

    /// Persist the note, then upload its image under the recorded filename
    ///
    /// The record is created first because the upload path comes from the
    /// filename the service stored. A failed upload leaves the record in
    /// place without an object.
    #[instrument(level = "debug", skip_all, fields(identity = %session.identity, name = %form.name))]
    pub async fn create(&self, session: &Session, form: NoteForm) -> Result<Note, DomainError> {
        form.validate()?;
        let identity = session.identity();

        let note = self.data.create_note(identity, form.to_new_note()).await?;
        info!(note_id = %note.id, "Created note");

        if let (Some(filename), Some(upload)) = (note.image.as_deref(), form.image.as_ref()) {
            let path = media_path(identity, filename)?;
            if let Err(e) = self.storage.upload(&path, &upload.bytes).await {
                warn!(note_id = %note.id, %path, error = %e, "Image upload failed after note was created");
                return Err(e);
            }
            info!(note_id = %note.id, %path, bytes = upload.bytes.len(), "Uploaded image");
        }

        Ok(note)
    }
}
