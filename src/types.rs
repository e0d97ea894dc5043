//! Shared types for the webnotes application: the crate `Result` alias and
//! the subcommands the terminal front end understands.
use clap::Subcommand;

use crate::{Category, NotesError};

/// A specialized Result type for webnotes operations.
pub type Result<T> = std::result::Result<T, NotesError>;

/// Available subcommands for the webnotes application
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Create a new note
    Create {
        /// Title of the note
        #[clap(short = 'T', long)]
        title: String,

        /// Body text of the note
        #[clap(short, long)]
        content: String,

        /// Category label, e.g. "Hero Work" or hero-work (default from config)
        #[clap(short = 'k', long)]
        category: Option<Category>,
    },

    /// Edit an existing note; omitted fields keep their current value
    Edit {
        /// ID of the note to edit
        id: String,

        /// New title for the note
        #[clap(short = 'T', long)]
        title: Option<String>,

        /// New content for the note
        #[clap(short, long)]
        content: Option<String>,

        /// New category for the note
        #[clap(short = 'k', long)]
        category: Option<Category>,
    },

    /// Delete a note by ID
    Delete {
        /// ID of the note to delete
        id: String,

        /// Skip confirmation prompt
        #[clap(short, long)]
        force: bool,
    },

    /// List notes, newest first
    List {
        /// Limit the number of notes shown (0 shows all)
        #[clap(short = 'n', long, default_value_t = 0)]
        limit: usize,

        /// Format output as JSON
        #[clap(short, long)]
        json: bool,
    },

    /// Search notes by title, content or category
    Search {
        /// Search query text, matched case-insensitively
        query: String,

        /// Limit the number of search results (0 shows all)
        #[clap(short = 'n', long, default_value_t = 0)]
        limit: usize,

        /// Format output as JSON
        #[clap(short, long)]
        json: bool,
    },

    /// Show the available categories
    Categories,
}
