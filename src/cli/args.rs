// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Directory holding notes, objects and the session (optional)
    #[arg(short, long, value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Path to TOML config file (optional)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Start a session for the given identity
    SignIn {
        #[arg(value_name = "IDENTITY")]
        identity: String,
    },

    /// End the current session
    SignOut,

    #[command(flatten)]
    Board(BoardCommand),
}

/// Commands that need a signed-in session and a loaded board
#[derive(Subcommand, Debug, Clone)]
pub enum BoardCommand {
    /// List notes with resolved image links
    List {
        /// Output notes as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a note, optionally attaching an image
    Create {
        /// Note title
        #[arg(short, long)]
        name: String,

        /// Note body
        #[arg(short = 'D', long)]
        description: String,

        /// Image file to attach
        #[arg(short, long, value_name = "FILE")]
        image: Option<PathBuf>,
    },

    /// Delete a note
    Delete {
        #[arg(value_name = "NOTE_ID")]
        note_id: String,
    },

    /// Render the board and open it in the browser
    View {
        /// Render with the creation form open
        #[arg(long)]
        new: bool,
    },
}
