//! Severity level reference entity.
//!
//! Maps to the `levels` table; read back through joins by MessageRepository.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub id: i64,
    /// `None` when a message points at a level row that no longer exists.
    pub name: Option<String>,
}

impl Level {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
        }
    }

    /// A reference by id only, e.g. when building a message to insert.
    pub fn reference(id: i64) -> Self {
        Self { id, name: None }
    }
}
