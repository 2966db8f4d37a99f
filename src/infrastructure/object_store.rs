// src/infrastructure/object_store.rs
use crate::application::ObjectStorage;
use crate::constants::MAX_URL_TTL_SECS;
use crate::domain::{DisplayUrl, DomainError};
use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use sha2::{Digest, Sha256};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, instrument};

/// Signs object paths with an expiry so links stop working after the TTL
///
/// The TTL is capped at seven days.
#[derive(Debug, Clone)]
pub struct UrlSigner {
    secret: String,
    ttl: Duration,
}

impl UrlSigner {
    pub fn new(secret: impl Into<String>, ttl_secs: u64) -> Self {
        Self {
            secret: secret.into(),
            ttl: Duration::seconds(ttl_secs.min(MAX_URL_TTL_SECS) as i64),
        }
    }

    pub fn signature(&self, path: &str, expires: i64) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.secret.as_bytes());
        hasher.update(b":");
        hasher.update(path.as_bytes());
        hasher.update(b":");
        hasher.update(expires.to_string().as_bytes());
        hex::encode(hasher.finalize())
    }

    pub fn expiry_from(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now + self.ttl
    }

    /// True when the signature matches and `now` is not past `expires`
    pub fn verify(&self, path: &str, expires: i64, signature: &str, now: DateTime<Utc>) -> bool {
        now.timestamp() <= expires && self.signature(path, expires) == signature
    }
}

/// Private objects on the local filesystem, served through signed `file://` URLs
///
/// Links are signed without looking at the object unless existence checks are
/// enabled, so a note whose upload never landed still gets a (dead) link.
pub struct FsObjectStore {
    root: PathBuf,
    signer: UrlSigner,
    validate_existence: bool,
}

impl FsObjectStore {
    pub fn new<P: AsRef<Path>>(root: P, signer: UrlSigner) -> Result<Self> {
        let root = root.as_ref();
        std::fs::create_dir_all(root)
            .with_context(|| format!("Failed to create object directory {}", root.display()))?;
        let root = root
            .canonicalize()
            .with_context(|| format!("Failed to resolve object directory {}", root.display()))?;
        debug!(?root, "Object store ready");
        Ok(Self {
            root,
            signer,
            validate_existence: false,
        })
    }

    /// Fail `display_url` with `ObjectNotFound` for missing objects
    pub fn validating_existence(mut self, validate: bool) -> Self {
        self.validate_existence = validate;
        self
    }

    /// Map an object key to a file under the root, refusing anything that escapes it
    fn object_path(&self, path: &str) -> Result<PathBuf, DomainError> {
        let relative = Path::new(path);
        let is_plain = !path.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !is_plain {
            return Err(DomainError::InvalidPath(path.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

impl ObjectStorage for FsObjectStore {
    #[instrument(level = "debug", skip(self))]
    async fn display_url(&self, path: &str) -> Result<DisplayUrl, DomainError> {
        let file = self.object_path(path)?;
        if self.validate_existence {
            let exists = tokio::fs::try_exists(&file)
                .await
                .map_err(|e| DomainError::Storage(e.to_string()))?;
            if !exists {
                return Err(DomainError::ObjectNotFound(path.to_string()));
            }
        }

        let expires_at = self.signer.expiry_from(Utc::now());
        let expires = expires_at.timestamp();
        let signature = self.signer.signature(path, expires);
        Ok(DisplayUrl {
            url: format!(
                "file://{}?expires={}&signature={}",
                file.display(),
                expires,
                signature
            ),
            expires_at,
        })
    }

    #[instrument(level = "debug", skip(self, bytes), fields(len = bytes.len()))]
    async fn upload(&self, path: &str, bytes: &[u8]) -> Result<(), DomainError> {
        let file = self.object_path(path)?;
        if let Some(parent) = file.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::Storage(format!("{}: {}", parent.display(), e)))?;
        }
        tokio::fs::write(&file, bytes)
            .await
            .map_err(|e| DomainError::Storage(format!("{}: {}", file.display(), e)))?;
        debug!(?file, "Stored object");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> FsObjectStore {
        FsObjectStore::new(dir.path().join("objects"), UrlSigner::new("secret", 60)).unwrap()
    }

    #[tokio::test]
    async fn given_uploaded_object_when_requesting_url_then_returns_signed_file_url() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.upload("media/user-1/beach.jpg", b"jpeg").await.unwrap();

        let link = store.display_url("media/user-1/beach.jpg").await.unwrap();

        assert!(link.url.starts_with("file://"));
        assert!(link.url.contains("media/user-1/beach.jpg?expires="));
        assert!(link.url.contains("&signature="));
        assert!(link.expires_at > Utc::now());
        let on_disk = std::fs::read(dir.path().join("objects/media/user-1/beach.jpg")).unwrap();
        assert_eq!(on_disk, b"jpeg");
    }

    #[tokio::test]
    async fn given_missing_object_when_requesting_url_then_still_signs() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let link = store.display_url("media/user-1/none.png").await.unwrap();

        assert!(link.url.contains("media/user-1/none.png?expires="));
    }

    #[tokio::test]
    async fn given_existence_validation_when_object_missing_then_returns_not_found() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir).validating_existence(true);

        let result = store.display_url("media/user-1/none.png").await;

        assert!(matches!(result, Err(DomainError::ObjectNotFound(_))));
    }

    #[rstest]
    #[case("")]
    #[case("../escape.png")]
    #[case("/etc/passwd")]
    #[case("media/../../x")]
    fn given_escaping_key_when_resolving_then_rejects(#[case] key: &str) {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        assert!(matches!(store.object_path(key), Err(DomainError::InvalidPath(_))));
    }

    #[test]
    fn given_signed_path_when_verifying_then_accepts_until_expiry() {
        let signer = UrlSigner::new("secret", 60);
        let now = Utc::now();
        let expires = signer.expiry_from(now).timestamp();
        let signature = signer.signature("media/u/a.png", expires);

        assert!(signer.verify("media/u/a.png", expires, &signature, now));
        assert!(!signer.verify("media/u/b.png", expires, &signature, now));
        assert!(!signer.verify(
            "media/u/a.png",
            expires,
            &signature,
            now + Duration::seconds(120)
        ));
    }

    #[test]
    fn given_different_secret_when_verifying_then_rejects() {
        let signer = UrlSigner::new("secret", 60);
        let other = UrlSigner::new("other", 60);
        let now = Utc::now();
        let expires = signer.expiry_from(now).timestamp();

        let signature = other.signature("media/u/a.png", expires);

        assert!(!signer.verify("media/u/a.png", expires, &signature, now));
    }
}
