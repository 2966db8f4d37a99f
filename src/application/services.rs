// src/application/services.rs
//
// Seams to the backend platform. The application only talks to these traits;
// handles are constructed once and passed down.
use crate::domain::{DisplayUrl, DomainError, Identity, NewNote, Note, NoteId, Session};

#[allow(async_fn_in_trait)]
pub trait NoteDataService {
    /// All notes owned by `owner`, in service order
    async fn list_notes(&self, owner: &Identity) -> Result<Vec<Note>, DomainError>;

    /// Persist a note and return it with the service-assigned id
    async fn create_note(&self, owner: &Identity, note: NewNote) -> Result<Note, DomainError>;

    async fn delete_note(&self, owner: &Identity, id: &NoteId) -> Result<(), DomainError>;
}

#[allow(async_fn_in_trait)]
pub trait ObjectStorage {
    /// Signed, time-limited URL for the object at `path`
    async fn display_url(&self, path: &str) -> Result<DisplayUrl, DomainError>;

    async fn upload(&self, path: &str, bytes: &[u8]) -> Result<(), DomainError>;
}

/// Gate for everything that needs a signed-in user
pub trait SessionProvider {
    /// Returns `DomainError::Unauthenticated` when nobody is signed in
    fn current_session(&self) -> Result<Session, DomainError>;

    fn sign_in(&self, identity: Identity) -> Result<Session, DomainError>;

    fn sign_out(&self) -> Result<(), DomainError>;
}
