//! Message repository: persistence and queries for log messages.
//!
//! Uses SqlitePoolManager, the models (Message, DbRecords) and the row decoders.
//! Reads join `levels` and `objects` so each message carries the referenced names.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use tracing::{debug, info};

use crate::error::StorageError;
use crate::models::{DbRecords, Message};
use crate::period::{format_period, now_period};
use crate::repository::Repository;
use crate::row::collect_messages;
use crate::schema::ensure_schema;
use crate::sqlite_pool::SqlitePoolManager;

const SQL_CREATE: &str =
    "INSERT INTO messages (period, id_level, id_object, text) VALUES (?, ?, ?, ?)";

const SQL_SELECT_ALL: &str = r#"
    SELECT
        messages.id AS id,
        messages.period AS period,
        messages.id_level AS id_level,
        levels.name AS name_level,
        messages.id_object AS id_object,
        objects.name AS name_object,
        messages.text AS text
    FROM messages
        LEFT JOIN objects ON objects.id = messages.id_object
        LEFT JOIN levels ON levels.id = messages.id_level
    ORDER BY messages.period
"#;

const SQL_FIND_BY_PERIOD: &str = r#"
    SELECT
        messages.id AS id,
        messages.period AS period,
        messages.id_level AS id_level,
        levels.name AS name_level,
        messages.id_object AS id_object,
        objects.name AS name_object,
        messages.text AS text
    FROM messages
        LEFT JOIN objects ON objects.id = messages.id_object
        LEFT JOIN levels ON levels.id = messages.id_level
    WHERE messages.period BETWEEN ? AND ?
    ORDER BY messages.period
    LIMIT ? OFFSET ?
"#;

const SQL_COUNT_BY_PERIOD: &str =
    "SELECT COUNT(*) AS count_records FROM messages WHERE messages.period BETWEEN ? AND ?";

const SQL_DELETE_ALL: &str = "DELETE FROM messages";

#[derive(Clone)]
pub struct MessageRepository {
    pool_manager: SqlitePoolManager,
}

impl MessageRepository {
    /// Opens a pool for `database_url` and creates the tables if needed.
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        ensure_schema(pool_manager.pool()).await?;
        Ok(Self::with_pool(pool_manager))
    }

    /// Shares an existing pool; the schema is assumed to exist.
    pub fn with_pool(pool_manager: SqlitePoolManager) -> Self {
        Self { pool_manager }
    }

    /// Inserts `message` stamped with `period`; only level id, object id and text are read from it.
    pub(crate) async fn insert_with_period(
        &self,
        message: &Message,
        period: &NaiveDateTime,
    ) -> Result<i64, StorageError> {
        let mut conn = self.pool_manager.acquire().await?;

        let result = sqlx::query(SQL_CREATE)
            .bind(format_period(period))
            .bind(message.level.id)
            .bind(message.object.id)
            .bind(&message.text)
            .execute(&mut *conn)
            .await?;

        let id = result.last_insert_rowid();
        info!(
            "Saved message: id={}, level={}, object={}, text={}",
            id, message.level.id, message.object.id, message.text
        );
        Ok(id)
    }

    /// Returns one page of messages whose period lies in `[from, to]`, plus the total in range.
    ///
    /// Bounds are formatted with the period format and compared as strings. The page and the
    /// count are read by two separate statements, so concurrent writes between them can make
    /// `count` disagree with the page.
    pub async fn find_by_period(
        &self,
        from: &NaiveDateTime,
        to: &NaiveDateTime,
        limit: i64,
        offset: i64,
    ) -> Result<DbRecords<Message>, StorageError> {
        let from = format_period(from);
        let to = format_period(to);

        let rows = {
            let mut conn = self.pool_manager.acquire().await?;
            sqlx::query(SQL_FIND_BY_PERIOD)
                .bind(&from)
                .bind(&to)
                .bind(limit)
                .bind(offset)
                .fetch_all(&mut *conn)
                .await?
        };
        let messages = collect_messages(&rows)?;

        let count = self.count_between(&from, &to).await?;

        debug!(
            "Found {} of {} messages between {} and {} (limit={}, offset={})",
            messages.len(),
            count,
            from,
            to,
            limit,
            offset
        );
        Ok(DbRecords::with_count(messages, count))
    }

    /// Number of messages whose period lies in `[from, to]`.
    pub async fn count_by_period(
        &self,
        from: &NaiveDateTime,
        to: &NaiveDateTime,
    ) -> Result<i64, StorageError> {
        self.count_between(&format_period(from), &format_period(to))
            .await
    }

    async fn count_between(&self, from: &str, to: &str) -> Result<i64, StorageError> {
        let mut conn = self.pool_manager.acquire().await?;
        let count: (i64,) = sqlx::query_as(SQL_COUNT_BY_PERIOD)
            .bind(from)
            .bind(to)
            .fetch_one(&mut *conn)
            .await?;
        Ok(count.0)
    }
}

#[async_trait]
impl Repository<Message, i64> for MessageRepository {
    /// Inserts a message stamped with the current local time; `message.id` and
    /// `message.period` are ignored.
    async fn create(&self, message: &Message) -> Result<i64, StorageError> {
        self.insert_with_period(message, &now_period()).await
    }

    async fn select_all(&self) -> Result<DbRecords<Message>, StorageError> {
        let rows = {
            let mut conn = self.pool_manager.acquire().await?;
            sqlx::query(SQL_SELECT_ALL).fetch_all(&mut *conn).await?
        };
        let messages = collect_messages(&rows)?;

        info!("Retrieved {} messages", messages.len());
        Ok(DbRecords::new(messages))
    }

    async fn delete_all(&self) -> Result<(), StorageError> {
        let mut conn = self.pool_manager.acquire().await?;
        let result = sqlx::query(SQL_DELETE_ALL).execute(&mut *conn).await?;

        info!("Deleted {} messages", result.rows_affected());
        Ok(())
    }
}
