// src/domain/error.rs
use crate::domain::NoteId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Note not found: {0}")]
    NoteNotFound(NoteId),
    #[error("Object not found: {0}")]
    ObjectNotFound(String),
    #[error("Not signed in")]
    Unauthenticated,
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Invalid storage path: {0}")]
    InvalidPath(String),
    #[error("Data service error: {0}")]
    DataService(String),
    #[error("Storage error: {0}")]
    Storage(String),
}
