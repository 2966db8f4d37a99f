use anyhow::Result;
use stickynotes::application::NoteBoard;
use stickynotes::infrastructure::{FsObjectStore, SqliteNoteService, UrlSigner};
use std::path::PathBuf;
use tempfile::TempDir;

#[allow(dead_code)]
pub const TEST_SECRET: &str = "test-secret";

/// Local backend rooted in a temporary data directory
#[allow(dead_code)]
pub struct TestBackend {
    _temp_dir: TempDir,
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestBackend {
    pub fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        let data_dir = temp_dir.path().to_path_buf();
        Ok(Self {
            _temp_dir: temp_dir,
            data_dir,
        })
    }

    pub fn data_service(&self) -> Result<SqliteNoteService> {
        SqliteNoteService::open(self.data_dir.join("notes.db"))
    }

    pub fn object_store(&self) -> Result<FsObjectStore> {
        FsObjectStore::new(self.data_dir.join("objects"), UrlSigner::new(TEST_SECRET, 900))
    }

    pub fn board(&self) -> Result<NoteBoard<SqliteNoteService, FsObjectStore>> {
        Ok(NoteBoard::new(self.data_service()?, self.object_store()?))
    }
}
