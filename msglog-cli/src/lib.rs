//! # msglog-cli
//!
//! Command-line surface over the storage repositories: argument parsing and command handlers.

pub mod cli;
pub mod commands;


pub use cli::{Cli, Commands, NameAction};
pub use commands::{execute, Repositories};
