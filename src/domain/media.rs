// src/domain/media.rs
use crate::constants::MEDIA_PREFIX;
use crate::domain::{DomainError, Identity};
use chrono::{DateTime, Utc};

/// A time-limited link to an otherwise private object
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayUrl {
    pub url: String,
    pub expires_at: DateTime<Utc>,
}

/// True when `value` can stand as exactly one segment of a storage key
///
/// Dots inside a name are fine (`my..photo.jpg`); only `.` and `..` themselves
/// and separators are refused.
pub fn is_path_segment(value: &str) -> bool {
    !value.trim().is_empty()
        && value != "."
        && value != ".."
        && !value.contains(['/', '\\'])
}

/// Check an attachment's filename before anything is stored under it
pub fn check_filename(filename: &str) -> Result<(), DomainError> {
    if is_path_segment(filename) {
        Ok(())
    } else {
        Err(DomainError::InvalidPath(filename.to_string()))
    }
}

/// Build the storage key `media/<identity>/<filename>`
pub fn media_path(identity: &Identity, filename: &str) -> Result<String, DomainError> {
    check_filename(filename)?;
    Ok(format!("{}/{}/{}", MEDIA_PREFIX, identity.as_str(), filename))
}
