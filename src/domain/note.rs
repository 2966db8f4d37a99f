// src/domain/note.rs
use crate::domain::{check_filename, DomainError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier assigned by the data service when a note is created
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub name: String,
    pub description: String,
    /// Object filename as stored, or a displayable URL once the loader resolved it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Create request sent to the data service
#[derive(Debug, Clone, PartialEq)]
pub struct NewNote {
    pub name: String,
    pub description: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// A submitted creation form
#[derive(Debug, Clone, PartialEq)]
pub struct NoteForm {
    pub name: String,
    pub description: String,
    pub image: Option<ImageUpload>,
}

impl NoteForm {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.image = Some(ImageUpload {
            filename: filename.into(),
            bytes,
        });
        self
    }

    /// Both text fields are required, like the form's `required` inputs, and an
    /// attachment must be storable under its own filename
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::Validation("note title is required".to_string()));
        }
        if self.description.trim().is_empty() {
            return Err(DomainError::Validation(
                "note description is required".to_string(),
            ));
        }
        if let Some(image) = &self.image {
            check_filename(&image.filename)?;
        }
        Ok(())
    }

    pub fn to_new_note(&self) -> NewNote {
        NewNote {
            name: self.name.clone(),
            description: self.description.clone(),
            image: self.image.as_ref().map(|i| i.filename.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_form_without_image_when_converting_then_image_is_absent() {
        let form = NoteForm::new("Groceries", "milk, eggs");

        let new_note = form.to_new_note();

        assert_eq!(new_note.name, "Groceries");
        assert_eq!(new_note.description, "milk, eggs");
        assert_eq!(new_note.image, None);
    }

    #[test]
    fn given_form_with_image_when_converting_then_records_filename_only() {
        let form = NoteForm::new("Trip", "packing list").with_image("beach.jpg", vec![1, 2, 3]);

        let new_note = form.to_new_note();

        assert_eq!(new_note.image.as_deref(), Some("beach.jpg"));
    }

    #[test]
    fn given_blank_title_when_validating_then_returns_validation_error() {
        let form = NoteForm::new("   ", "body");

        let result = form.validate();

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn given_blank_description_when_validating_then_returns_validation_error() {
        let form = NoteForm::new("title", "");

        assert!(matches!(form.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn given_unstorable_image_name_when_validating_then_returns_invalid_path() {
        let form = NoteForm::new("Trip", "packing list").with_image("..", vec![1]);

        assert!(matches!(form.validate(), Err(DomainError::InvalidPath(_))));
    }

    #[test]
    fn given_dotted_image_name_when_validating_then_accepts() {
        let form = NoteForm::new("Trip", "packing list").with_image("my..photo.jpg", vec![1]);

        assert!(form.validate().is_ok());
    }

    #[test]
    fn given_note_without_image_when_serializing_then_omits_image_field() {
        let note = Note {
            id: NoteId::new("abc"),
            name: "n".to_string(),
            description: "d".to_string(),
            image: None,
        };

        let json = serde_json::to_string(&note).expect("serialize");

        assert_eq!(json, r#"{"id":"abc","name":"n","description":"d"}"#);
    }
}
