// src/application/board.rs
use crate::application::{NoteCreator, NoteDataService, NoteDeleter, NoteLoader, ObjectStorage};
use crate::domain::{DomainError, Note, NoteForm, NoteId, Session};
use crate::ports::HtmlPresenter;
use tracing::debug;

/// State behind the board view: the loaded notes and whether the creation
/// modal is showing
///
/// Every mutation is followed by a full reload; the note list is only ever
/// replaced wholesale.
pub struct NoteBoard<D, S> {
    data: D,
    storage: S,
    notes: Vec<Note>,
    modal_open: bool,
}

impl<D: NoteDataService, S: ObjectStorage> NoteBoard<D, S> {
    pub fn new(data: D, storage: S) -> Self {
        Self {
            data,
            storage,
            notes: Vec::new(),
            modal_open: false,
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    pub fn open_modal(&mut self) {
        self.modal_open = true;
    }

    pub fn close_modal(&mut self) {
        self.modal_open = false;
    }

    pub async fn refresh(&mut self, session: &Session) -> Result<&[Note], DomainError> {
        let notes = NoteLoader::new(&self.data, &self.storage)
            .load(session)
            .await?;
        debug!(count = notes.len(), "Board refreshed");
        self.notes = notes;
        Ok(&self.notes)
    }

    /// Create a note from the submitted form, reload, and close the modal
    ///
    /// On failure the modal stays open and the list is not reloaded.
    pub async fn submit(&mut self, session: &Session, form: NoteForm) -> Result<Note, DomainError> {
        let note = NoteCreator::new(&self.data, &self.storage)
            .create(session, form)
            .await?;
        self.refresh(session).await?;
        self.close_modal();
        Ok(note)
    }

    pub async fn remove(&mut self, session: &Session, id: &NoteId) -> Result<(), DomainError> {
        NoteDeleter::new(&self.data).delete(session, id).await?;
        self.refresh(session).await?;
        Ok(())
    }

    pub fn render(&self, presenter: &HtmlPresenter, session: &Session) -> String {
        presenter.render_board(&self.notes, self.modal_open, session)
    }
}
