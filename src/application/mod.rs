// src/application/mod.rs
pub mod board;
pub mod note_creator;
pub mod note_deleter;
pub mod note_loader;
pub mod services;

pub use board::NoteBoard;
pub use note_creator::NoteCreator;
pub use note_deleter::NoteDeleter;
pub use note_loader::NoteLoader;
pub use services::{NoteDataService, ObjectStorage, SessionProvider};
