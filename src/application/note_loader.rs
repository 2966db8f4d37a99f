// src/application/note_loader.rs
use crate::application::{NoteDataService, ObjectStorage};
use crate::domain::{media_path, DomainError, Note, Session};
use futures::future::try_join_all;
use tracing::{debug, instrument, warn};

pub struct NoteLoader<'a, D, S> {
    data: &'a D,
    storage: &'a S,
}

impl<'a, D: NoteDataService, S: ObjectStorage> NoteLoader<'a, D, S> {
    pub fn new(data: &'a D, storage: &'a S) -> Self {
        Self { data, storage }
    }

    /// Fetch every note of the signed-in identity and resolve image keys to
    /// displayable URLs
    ///
    /// URL lookups run concurrently and are all joined before returning.
    /// Notes without an image cause no storage call. A stored filename that
    /// cannot form a storage key leaves that note without an image.
    #[instrument(level = "debug", skip_all, fields(identity = %session.identity))]
    pub async fn load(&self, session: &Session) -> Result<Vec<Note>, DomainError> {
        let identity = session.identity();
        let storage = self.storage;
        let notes = self.data.list_notes(identity).await?;
        debug!(count = notes.len(), "Listed notes");

        let resolved = try_join_all(notes.into_iter().map(|mut note| async move {
            if let Some(filename) = note.image.take() {
                match media_path(identity, &filename) {
                    Ok(path) => {
                        let link = storage.display_url(&path).await?;
                        note.image = Some(link.url);
                    }
                    Err(e) => {
                        warn!(note_id = %note.id, %filename, error = %e, "Dropping unusable image key");
                    }
                }
            }
            Ok::<_, DomainError>(note)
        }))
        .await?;

        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::{test_session, MockNoteService, MockObjectStorage, MOCK_URL_BASE};

    #[tokio::test]
    async fn given_no_notes_when_loading_then_returns_empty() {
        // Arrange
        let data = MockNoteService::builder().build();
        let storage = MockObjectStorage::builder().build();
        let loader = NoteLoader::new(&data, &storage);

        // Act
        let notes = loader.load(&test_session("user-1")).await.expect("load");

        // Assert
        assert!(notes.is_empty());
        assert_eq!(storage.display_url_calls(), 0);
    }

    #[tokio::test]
    async fn given_notes_with_and_without_image_when_loading_then_resolves_only_images() {
        // Arrange
        let data = MockNoteService::builder()
            .with_note("user-1", "n1", "Groceries", "milk, eggs", None)
            .with_note("user-1", "n2", "Trip", "packing list", Some("beach.jpg"))
            .build();
        let storage = MockObjectStorage::builder()
            .with_object("media/user-1/beach.jpg", b"jpeg")
            .build();
        let loader = NoteLoader::new(&data, &storage);

        // Act
        let notes = loader.load(&test_session("user-1")).await.expect("load");

        // Assert
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].image, None);
        assert_eq!(
            notes[1].image.as_deref(),
            Some(format!("{MOCK_URL_BASE}/media/user-1/beach.jpg?signature=mock").as_str())
        );
        assert_eq!(storage.display_url_calls(), 1);
    }

    #[tokio::test]
    async fn given_several_images_when_loading_then_preserves_service_order() {
        let data = MockNoteService::builder()
            .with_note("user-1", "a", "A", "a", Some("a.png"))
            .with_note("user-1", "b", "B", "b", Some("b.png"))
            .with_note("user-1", "c", "C", "c", Some("c.png"))
            .build();
        let storage = MockObjectStorage::builder()
            .with_object("media/user-1/a.png", b"a")
            .with_object("media/user-1/b.png", b"b")
            .with_object("media/user-1/c.png", b"c")
            .build();
        let loader = NoteLoader::new(&data, &storage);

        let notes = loader.load(&test_session("user-1")).await.expect("load");

        let ids: Vec<_> = notes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(storage.display_url_calls(), 3);
    }

    #[tokio::test]
    async fn given_unusable_stored_key_when_loading_then_returns_other_notes() {
        let data = MockNoteService::builder()
            .with_note("user-1", "bad", "Broken", "old record", Some("nested/x.png"))
            .with_note("user-1", "good", "Trip", "packing list", Some("beach.jpg"))
            .build();
        let storage = MockObjectStorage::builder()
            .with_object("media/user-1/beach.jpg", b"jpeg")
            .build();
        let loader = NoteLoader::new(&data, &storage);

        let notes = loader.load(&test_session("user-1")).await.expect("load");

        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].id.as_str(), "bad");
        assert_eq!(notes[0].image, None);
        assert!(notes[1].image.as_deref().is_some_and(|url| url.contains("beach.jpg")));
        assert_eq!(storage.display_url_calls(), 1);
    }

    #[tokio::test]
    async fn given_list_rejection_when_loading_then_propagates_error() {
        let data = MockNoteService::builder().failing_list().build();
        let storage = MockObjectStorage::builder().build();
        let loader = NoteLoader::new(&data, &storage);

        let result = loader.load(&test_session("user-1")).await;

        assert!(matches!(result, Err(DomainError::DataService(_))));
    }

    #[tokio::test]
    async fn given_url_rejection_when_loading_then_propagates_error() {
        let data = MockNoteService::builder()
            .with_note("user-1", "n1", "Trip", "packing list", Some("beach.jpg"))
            .build();
        let storage = MockObjectStorage::builder().failing_display_url().build();
        let loader = NoteLoader::new(&data, &storage);

        let result = loader.load(&test_session("user-1")).await;

        assert!(matches!(result, Err(DomainError::Storage(_))));
    }
}
