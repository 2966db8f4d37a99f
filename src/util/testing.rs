// src/util/testing.rs

use anyhow::Result;
use chrono::{Duration, Utc};
use std::collections::HashMap;
use std::env;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::{NoteDataService, ObjectStorage};
use crate::domain::{DisplayUrl, DomainError, Identity, NewNote, Note, NoteId, Session};

pub const MOCK_URL_BASE: &str = "https://storage.test";

/// Every call made against the mock services, in the order they happened
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceCall {
    List(Identity),
    Create(NewNote),
    Delete(NoteId),
    DisplayUrl(String),
    Upload(String, usize),
}

pub type CallLog = Arc<Mutex<Vec<ServiceCall>>>;

fn record(log: &CallLog, call: ServiceCall) {
    log.lock().expect("call log poisoned").push(call);
}

pub fn test_session(identity: &str) -> Session {
    Session::new(Identity::parse(identity).expect("valid test identity"))
}

/// Shared in-memory data service for use-case tests
///
/// Clones share state, so a test can keep a handle after moving one into a
/// board.
///
/// # Examples
///
/// ```
/// use stickynotes::util::testing::MockNoteService;
///
/// let mock = MockNoteService::builder()
///     .with_note("user-1", "n1", "Groceries", "milk, eggs", None)
///     .failing_delete()
///     .build();
/// assert_eq!(mock.stored_notes().len(), 1);
/// ```
#[derive(Clone)]
pub struct MockNoteService {
    notes: Arc<Mutex<Vec<(Identity, Note)>>>,
    next_id: Arc<Mutex<u64>>,
    fail_list: bool,
    fail_create: bool,
    fail_delete: bool,
    log: CallLog,
}

impl MockNoteService {
    pub fn builder() -> MockNoteServiceBuilder {
        MockNoteServiceBuilder::new()
    }

    /// Raw records as persisted, without URL resolution
    pub fn stored_notes(&self) -> Vec<Note> {
        self.notes
            .lock()
            .expect("notes poisoned")
            .iter()
            .map(|(_, n)| n.clone())
            .collect()
    }

    pub fn calls(&self) -> Vec<ServiceCall> {
        self.log.lock().expect("call log poisoned").clone()
    }
}

impl NoteDataService for MockNoteService {
    async fn list_notes(&self, owner: &Identity) -> Result<Vec<Note>, DomainError> {
        record(&self.log, ServiceCall::List(owner.clone()));
        if self.fail_list {
            return Err(DomainError::DataService("list rejected".to_string()));
        }
        Ok(self
            .notes
            .lock()
            .expect("notes poisoned")
            .iter()
            .filter(|(o, _)| o == owner)
            .map(|(_, n)| n.clone())
            .collect())
    }

    async fn create_note(&self, owner: &Identity, note: NewNote) -> Result<Note, DomainError> {
        record(&self.log, ServiceCall::Create(note.clone()));
        if self.fail_create {
            return Err(DomainError::DataService("create rejected".to_string()));
        }
        let id = {
            let mut next = self.next_id.lock().expect("id counter poisoned");
            *next += 1;
            NoteId::new(format!("note-{}", *next))
        };
        let created = Note {
            id,
            name: note.name,
            description: note.description,
            image: note.image,
        };
        self.notes
            .lock()
            .expect("notes poisoned")
            .push((owner.clone(), created.clone()));
        Ok(created)
    }

    async fn delete_note(&self, owner: &Identity, id: &NoteId) -> Result<(), DomainError> {
        record(&self.log, ServiceCall::Delete(id.clone()));
        if self.fail_delete {
            return Err(DomainError::DataService("delete rejected".to_string()));
        }
        let mut notes = self.notes.lock().expect("notes poisoned");
        let before = notes.len();
        notes.retain(|(o, n)| !(o == owner && &n.id == id));
        if notes.len() == before {
            return Err(DomainError::NoteNotFound(id.clone()));
        }
        Ok(())
    }
}

/// Builder for MockNoteService
pub struct MockNoteServiceBuilder {
    notes: Vec<(Identity, Note)>,
    fail_list: bool,
    fail_create: bool,
    fail_delete: bool,
    log: CallLog,
}

impl MockNoteServiceBuilder {
    pub fn new() -> Self {
        Self {
            notes: vec![],
            fail_list: false,
            fail_create: false,
            fail_delete: false,
            log: CallLog::default(),
        }
    }

    /// Seed a record owned by `owner`
    pub fn with_note(
        mut self,
        owner: &str,
        id: &str,
        name: &str,
        description: &str,
        image: Option<&str>,
    ) -> Self {
        let owner = Identity::parse(owner).expect("valid test identity");
        self.notes.push((
            owner,
            Note {
                id: NoteId::new(id),
                name: name.to_string(),
                description: description.to_string(),
                image: image.map(str::to_string),
            },
        ));
        self
    }

    pub fn failing_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    pub fn failing_delete(mut self) -> Self {
        self.fail_delete = true;
        self
    }

    /// Share a call log with other mocks to assert on cross-service ordering
    pub fn with_call_log(mut self, log: CallLog) -> Self {
        self.log = log;
        self
    }

    pub fn build(self) -> MockNoteService {
        MockNoteService {
            notes: Arc::new(Mutex::new(self.notes)),
            next_id: Arc::new(Mutex::new(0)),
            fail_list: self.fail_list,
            fail_create: self.fail_create,
            fail_delete: self.fail_delete,
            log: self.log,
        }
    }
}

impl Default for MockNoteServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory object storage handing out fake signed URLs
///
/// Unlike the filesystem store it refuses links to objects it does not hold.
#[derive(Clone)]
pub struct MockObjectStorage {
    objects: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    fail_upload: bool,
    fail_url: bool,
    log: CallLog,
}

impl MockObjectStorage {
    pub fn builder() -> MockObjectStorageBuilder {
        MockObjectStorageBuilder::new()
    }

    pub fn object(&self, path: &str) -> Option<Vec<u8>> {
        self.objects.lock().expect("objects poisoned").get(path).cloned()
    }

    pub fn calls(&self) -> Vec<ServiceCall> {
        self.log.lock().expect("call log poisoned").clone()
    }

    pub fn display_url_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, ServiceCall::DisplayUrl(_)))
            .count()
    }
}

impl ObjectStorage for MockObjectStorage {
    async fn display_url(&self, path: &str) -> Result<DisplayUrl, DomainError> {
        record(&self.log, ServiceCall::DisplayUrl(path.to_string()));
        if self.fail_url {
            return Err(DomainError::Storage("signing rejected".to_string()));
        }
        if !self.objects.lock().expect("objects poisoned").contains_key(path) {
            return Err(DomainError::ObjectNotFound(path.to_string()));
        }
        Ok(DisplayUrl {
            url: format!("{MOCK_URL_BASE}/{path}?signature=mock"),
            expires_at: Utc::now() + Duration::seconds(900),
        })
    }

    async fn upload(&self, path: &str, bytes: &[u8]) -> Result<(), DomainError> {
        record(&self.log, ServiceCall::Upload(path.to_string(), bytes.len()));
        if self.fail_upload {
            return Err(DomainError::Storage("upload rejected".to_string()));
        }
        self.objects
            .lock()
            .expect("objects poisoned")
            .insert(path.to_string(), bytes.to_vec());
        Ok(())
    }
}

/// Builder for MockObjectStorage
pub struct MockObjectStorageBuilder {
    objects: HashMap<String, Vec<u8>>,
    fail_upload: bool,
    fail_url: bool,
    log: CallLog,
}

impl MockObjectStorageBuilder {
    pub fn new() -> Self {
        Self {
            objects: HashMap::new(),
            fail_upload: false,
            fail_url: false,
            log: CallLog::default(),
        }
    }

    pub fn with_object(mut self, path: &str, bytes: &[u8]) -> Self {
        self.objects.insert(path.to_string(), bytes.to_vec());
        self
    }

    pub fn failing_upload(mut self) -> Self {
        self.fail_upload = true;
        self
    }

    pub fn failing_display_url(mut self) -> Self {
        self.fail_url = true;
        self
    }

    pub fn with_call_log(mut self, log: CallLog) -> Self {
        self.log = log;
        self
    }

    pub fn build(self) -> MockObjectStorage {
        MockObjectStorage {
            objects: Arc::new(Mutex::new(self.objects)),
            fail_upload: self.fail_upload,
            fail_url: self.fail_url,
            log: self.log,
        }
    }
}

impl Default for MockObjectStorageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "trace");
    }

    let noisy_modules = ["rusqlite", "mio"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}
