//! Table bootstrap for the `levels`, `objects` and `messages` tables.
//!
//! Idempotent `CREATE ... IF NOT EXISTS`; there is no versioned migration.

use sqlx::SqlitePool;
use tracing::info;

use crate::error::StorageError;

const CREATE_LEVELS: &str = r#"
    CREATE TABLE IF NOT EXISTS levels (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE
    )
"#;

const CREATE_OBJECTS: &str = r#"
    CREATE TABLE IF NOT EXISTS objects (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE
    )
"#;

const CREATE_MESSAGES: &str = r#"
    CREATE TABLE IF NOT EXISTS messages (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        period TEXT NOT NULL,
        id_level INTEGER NOT NULL REFERENCES levels(id),
        id_object INTEGER NOT NULL REFERENCES objects(id),
        text TEXT NOT NULL
    )
"#;

const CREATE_INDEXES: &str = r#"
    CREATE INDEX IF NOT EXISTS idx_messages_period ON messages(period);
    CREATE INDEX IF NOT EXISTS idx_messages_id_level ON messages(id_level);
    CREATE INDEX IF NOT EXISTS idx_messages_id_object ON messages(id_object);
"#;

/// Creates the three tables and their indexes if they do not exist yet.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), StorageError> {
    info!("Creating database tables if not exist");

    for statement in [CREATE_LEVELS, CREATE_OBJECTS, CREATE_MESSAGES, CREATE_INDEXES] {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database tables created successfully");
    Ok(())
}
