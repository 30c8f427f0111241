//! Log message model for persistence.
//!
//! Maps to the `messages` table joined with `levels` and `objects`.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{Level, ObjectLog};
use crate::period::now_period;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub period: NaiveDateTime,
    pub level: Level,
    pub object: ObjectLog,
    pub text: String,
}

impl Message {
    /// Creates an unsaved message for the given level and object ids.
    ///
    /// `id` is 0 and `period` is the current time; the repository assigns both on insert.
    pub fn draft(level_id: i64, object_id: i64, text: impl Into<String>) -> Self {
        Self {
            id: 0,
            period: now_period(),
            level: Level::reference(level_id),
            object: ObjectLog::reference(object_id),
            text: text.into(),
        }
    }
}
