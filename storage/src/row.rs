//! Row decoding: one function per entity, each returning a typed record or a decode error.

use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::error::RowDecodeError;
use crate::models::{Level, Message, ObjectLog};
use crate::period::parse_period;

/// Decodes one row of the messages/levels/objects join.
///
/// Expects the columns `id`, `period`, `id_level`, `name_level`, `id_object`, `name_object`, `text`.
pub fn decode_message_row(row: &SqliteRow) -> Result<Message, RowDecodeError> {
    let id: i64 = row.try_get("id")?;
    let raw_period: Option<String> = row.try_get("period")?;
    let period = raw_period
        .as_deref()
        .and_then(|value| parse_period(value).ok())
        .ok_or_else(|| RowDecodeError::Period {
            id,
            value: raw_period.clone(),
        })?;

    Ok(Message {
        id,
        period,
        level: Level {
            id: row.try_get("id_level")?,
            name: row.try_get("name_level")?,
        },
        object: ObjectLog {
            id: row.try_get("id_object")?,
            name: row.try_get("name_object")?,
        },
        text: row.try_get("text")?,
    })
}

pub fn decode_level_row(row: &SqliteRow) -> Result<Level, RowDecodeError> {
    Ok(Level {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
    })
}

pub fn decode_object_row(row: &SqliteRow) -> Result<ObjectLog, RowDecodeError> {
    Ok(ObjectLog {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
    })
}

/// Decodes message rows, dropping those whose period cannot be parsed.
///
/// Skipped rows are logged at `warn`; any other decode failure aborts the whole read.
pub fn collect_messages(rows: &[SqliteRow]) -> Result<Vec<Message>, RowDecodeError> {
    let mut messages = Vec::with_capacity(rows.len());
    for row in rows {
        match decode_message_row(row) {
            Ok(message) => messages.push(message),
            Err(RowDecodeError::Period { id, value }) => {
                tracing::warn!(
                    message_id = id,
                    period = ?value,
                    "Skipping message with unparseable period"
                );
            }
            Err(err) => return Err(err),
        }
    }
    Ok(messages)
}
