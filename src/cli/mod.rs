//! Terminal front end: argument parsing and the command runner.

mod app;
mod args;

pub use app::*;
pub use args::*;
