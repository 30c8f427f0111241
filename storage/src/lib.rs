//! Storage crate: log message persistence and repository abstractions.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – Message, Level, ObjectLog, DbRecords
//! - [`period`] – Fixed `YYYY-MM-DD HH:MM:SS` timestamp format
//! - [`repository`] – Repository trait
//! - [`message_repo`] – MessageRepository (SQLite)
//! - [`reference_repo`] – LevelRepository / ObjectLogRepository (generic over [`NamedEntity`])
//! - [`schema`] – table bootstrap
//! - [`sqlite_pool`] – SqlitePoolManager

mod error;
mod message_repo;
mod models;
pub mod period;
mod reference_repo;
mod repository;
mod row;
mod schema;
mod sqlite_pool;


pub use error::{RowDecodeError, StorageError};
pub use message_repo::MessageRepository;
pub use models::{DbRecords, Level, Message, ObjectLog};
pub use reference_repo::{LevelRepository, NamedEntity, NamedRepository, ObjectLogRepository};
pub use repository::Repository;
pub use row::decode_message_row;
pub use schema::ensure_schema;
pub use sqlite_pool::SqlitePoolManager;
