// src/infrastructure/mod.rs
pub mod object_store;
pub mod renderer;
pub mod session;
pub mod sqlite;

pub use object_store::{FsObjectStore, UrlSigner};
pub use renderer::ContentRenderer;
pub use session::FileSessionStore;
pub use sqlite::SqliteNoteService;
