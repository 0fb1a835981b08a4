// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::{CategoryId, NoteId, StatusFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Base URL of the notes API (overrides NOTES_API_URL and the config file)
    #[arg(long, value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Path to config file (optional)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List notes by status or by category
    List {
        /// Status filter: active, archived or all
        #[arg(short, long, default_value_t = StatusFilter::Active)]
        status: StatusFilter,

        /// Show the notes of one category instead (ignores --status)
        #[arg(long, value_name = "CATEGORY_ID")]
        category: Option<CategoryId>,

        /// Output notes as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a note
    Add {
        #[arg(long)]
        title: String,

        #[arg(long)]
        content: String,

        /// Category to tag the note with (repeatable)
        #[arg(long = "category", value_name = "CATEGORY_ID")]
        categories: Vec<CategoryId>,
    },

    /// Replace a note's title, content or categories
    Edit {
        #[arg(value_name = "NOTE_ID")]
        note_id: NoteId,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        content: Option<String>,

        /// Replace the note's categories (repeatable)
        #[arg(long = "category", value_name = "CATEGORY_ID")]
        categories: Vec<CategoryId>,

        /// Remove all categories from the note
        #[arg(long, conflicts_with = "categories")]
        clear_categories: bool,
    },

    /// Toggle a note between archived and active
    Archive {
        #[arg(value_name = "NOTE_ID")]
        note_id: NoteId,
    },

    /// Delete a note
    Delete {
        #[arg(value_name = "NOTE_ID")]
        note_id: NoteId,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Manage categories
    Categories {
        #[command(subcommand)]
        command: CategoryCommand,
    },

    /// Interactive session
    Shell,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CategoryCommand {
    /// List all categories
    List,

    /// Create a category
    Add {
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// Delete a category and every note tagged with it
    Delete {
        #[arg(value_name = "CATEGORY_ID")]
        category_id: CategoryId,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}
