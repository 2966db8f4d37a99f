// src/infrastructure/session.rs
use crate::application::SessionProvider;
use crate::domain::{DomainError, Identity, Session};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Keeps the signed-in session as a JSON file in the data directory
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl SessionProvider for FileSessionStore {
    fn current_session(&self) -> Result<Session, DomainError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(DomainError::Unauthenticated),
            Err(e) => return Err(DomainError::DataService(e.to_string())),
        };

        serde_json::from_str(&content).map_err(|e| {
            warn!(path = ?self.path, error = %e, "Discarding unreadable session");
            DomainError::Unauthenticated
        })
    }

    fn sign_in(&self, identity: Identity) -> Result<Session, DomainError> {
        let session = Session::new(identity);
        let json = serde_json::to_string_pretty(&session)
            .map_err(|e| DomainError::DataService(e.to_string()))?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| DomainError::DataService(e.to_string()))?;
        }
        std::fs::write(&self.path, json).map_err(|e| DomainError::DataService(e.to_string()))?;
        info!(identity = %session.identity, "Signed in");
        Ok(session)
    }

    fn sign_out(&self) -> Result<(), DomainError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Signed out");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DomainError::DataService(e.to_string())),
        }
    }
}
