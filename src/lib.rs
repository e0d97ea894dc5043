//! Category-tagged note-taking library
//!
//! This library keeps a small collection of notes in memory, mirrors every
//! change to a key-value persistence adapter, and offers case-insensitive
//! search over the collection.

mod adapter;
mod cli;
mod config;
mod errors;
mod helper;
mod note;
mod storage;
mod types;

// Re-export key components
pub use adapter::*;
pub use cli::*;
pub use config::*;
pub use errors::*;
pub use helper::*;
pub use note::*;
pub use storage::*;
pub use types::*;
