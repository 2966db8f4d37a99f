// src/lib.rs
pub mod application;
pub mod cli;
pub mod config;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use crate::application::{NoteBoard, NoteDataService, ObjectStorage, SessionProvider};
use crate::cli::args::{Args, BoardCommand, Command};
use crate::config::Config;
use crate::constants::{CONFIG_FILE, DATABASE_FILE, OBJECTS_DIR, SESSION_FILE};
use crate::domain::{Identity, NoteForm, NoteId, Session};
use anyhow::{Context, Result};
use infrastructure::{ContentRenderer, FileSessionStore, FsObjectStore, SqliteNoteService, UrlSigner};
use ports::HtmlPresenter;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub async fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting stickynotes with arguments");

    let data_dir = match args.data_dir {
        Some(path) => {
            debug!(?path, "Using provided data directory");
            path
        }
        None => default_data_dir()?,
    };
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory {}", data_dir.display()))?;

    let config_path = args.config.unwrap_or_else(|| data_dir.join(CONFIG_FILE));
    let config = Config::load_or_default(&config_path)?;

    let sessions = FileSessionStore::new(data_dir.join(SESSION_FILE));
    let command = match args.command {
        Command::SignIn { identity } => {
            let session = sessions.sign_in(Identity::parse(identity)?)?;
            println!("Signed in as {}", session.identity);
            return Ok(());
        }
        Command::SignOut => {
            sessions.sign_out()?;
            println!("Signed out");
            return Ok(());
        }
        Command::Board(command) => command,
    };

    let session = sessions
        .current_session()
        .context("Sign in first with `stickynotes sign-in <IDENTITY>`")?;

    // Initialize infrastructure
    let data = SqliteNoteService::open(data_dir.join(DATABASE_FILE))?;
    let storage = FsObjectStore::new(
        data_dir.join(OBJECTS_DIR),
        UrlSigner::new(
            config.storage.signing_secret.clone(),
            config.storage.url_ttl_secs,
        ),
    )?
    .validating_existence(config.storage.validate_object_existence);

    // Initialize application
    let mut board = NoteBoard::new(data, storage);
    board
        .refresh(&session)
        .await
        .context("Failed to load notes")?;

    match command {
        BoardCommand::List { json } => list_notes(&board, json)?,
        BoardCommand::Create {
            name,
            description,
            image,
        } => {
            let form = read_form(name, description, image.as_deref()).await?;
            board.open_modal();
            let note = board
                .submit(&session, form)
                .await
                .context("Failed to create note")?;
            println!("Created note {}", note.id);
        }
        BoardCommand::Delete { note_id } => {
            let id = NoteId::new(note_id);
            board
                .remove(&session, &id)
                .await
                .with_context(|| format!("Failed to delete note {id}"))?;
            println!("Deleted note {id}");
        }
        BoardCommand::View { new } => {
            if new {
                board.open_modal();
            }
            view_board(&board, &HtmlPresenter::with_theme(config.theme), &session)?;
        }
    }

    Ok(())
}

fn list_notes<D: NoteDataService, S: ObjectStorage>(board: &NoteBoard<D, S>, json: bool) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(board.notes()).context("Failed to serialize notes")?;
        println!("{out}");
        return Ok(());
    }

    if board.notes().is_empty() {
        println!("No notes yet");
        return Ok(());
    }
    for note in board.notes() {
        println!(
            "{}\t{}\t{}",
            note.id,
            note.name,
            util::text::summarize(&note.description, 60)
        );
        if let Some(url) = &note.image {
            println!("\t{url}");
        }
    }
    Ok(())
}

/// Build a creation form, reading the attached image from disk
pub async fn read_form(name: String, description: String, image: Option<&Path>) -> Result<NoteForm> {
    let form = NoteForm::new(name, description);
    let Some(path) = image else {
        return Ok(form);
    };

    let filename = path
        .file_name()
        .and_then(|f| f.to_str())
        .with_context(|| format!("Image path has no usable file name: {}", path.display()))?
        .to_string();
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read image {}", path.display()))?;
    debug!(%filename, bytes = bytes.len(), "Read image");

    Ok(form.with_image(filename, bytes))
}

fn view_board<D: NoteDataService, S: ObjectStorage>(
    board: &NoteBoard<D, S>,
    presenter: &HtmlPresenter,
    session: &Session,
) -> Result<()> {
    let html = board.render(presenter, session);
    let mut renderer = ContentRenderer::new();
    let temp_path = renderer.create_temp_file(&html)?;
    info!(path = ?temp_path, notes = board.notes().len(), "Opening board");
    renderer.open_in_browser(&temp_path)?;
    Ok(())
}

pub fn default_data_dir() -> Result<PathBuf> {
    let base = dirs::data_dir().context("Could not find data directory")?;
    Ok(base.join("stickynotes"))
}
