// src/domain/mod.rs
pub mod error;
pub mod identity;
pub mod media;
pub mod note;

pub use error::DomainError;
pub use identity::{Identity, Session};
pub use media::{check_filename, is_path_segment, media_path, DisplayUrl};
pub use note::{ImageUpload, NewNote, Note, NoteForm, NoteId};
