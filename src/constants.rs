// src/constants.rs
//
// Application-wide constants: file names inside the data directory, storage
// layout and defaults shared by config and infrastructure.

/// Top-level prefix for uploaded note images.
///
/// Keys have the form `media/<identity>/<filename>`.
///
/// Used in: `domain/media.rs`
pub const MEDIA_PREFIX: &str = "media";

/// SQLite database holding note records.
pub const DATABASE_FILE: &str = "notes.db";

/// Signed-in session marker.
pub const SESSION_FILE: &str = "session.json";

/// Configuration file looked up in the data directory when `--config` is not given.
pub const CONFIG_FILE: &str = "stickynotes.toml";

/// Directory under the data directory holding uploaded objects.
pub const OBJECTS_DIR: &str = "objects";

/// Lifetime of a displayable URL in seconds.
///
/// Used in: `config.rs`, `infrastructure/object_store.rs`
pub const DEFAULT_URL_TTL_SECS: u64 = 900;

/// Upper bound for the displayable URL lifetime (seven days).
pub const MAX_URL_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Delay in milliseconds after writing the board HTML before returning.
///
/// The browser is spawned asynchronously; the temp directory must outlive the
/// launch long enough for the file to be read.
///
/// Used in: `infrastructure/renderer.rs`
pub const BROWSER_LAUNCH_DELAY_MS: u64 = 500;
