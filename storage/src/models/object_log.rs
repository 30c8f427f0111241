//! Source object reference entity: the named component that emitted a message.
//!
//! Maps to the `objects` table.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectLog {
    pub id: i64,
    pub name: Option<String>,
}

impl ObjectLog {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
        }
    }

    pub fn reference(id: i64) -> Self {
        Self { id, name: None }
    }
}
