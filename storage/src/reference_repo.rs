//! Reference repositories: the level and object name tables messages point at.
//!
//! Both tables have the same `(id, name UNIQUE NOT NULL)` shape, so one generic repository
//! serves them; [`NamedEntity`] supplies the table and the row decoder.

use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use tracing::info;

use crate::error::{RowDecodeError, StorageError};
use crate::models::{DbRecords, Level, ObjectLog};
use crate::repository::Repository;
use crate::row::{decode_level_row, decode_object_row};
use crate::schema::ensure_schema;
use crate::sqlite_pool::SqlitePoolManager;

/// An entity stored as a unique name in its own table.
pub trait NamedEntity: Sized + Send + Sync + 'static {
    const TABLE: &'static str;

    fn name(&self) -> Option<&str>;
    fn decode(row: &SqliteRow) -> Result<Self, RowDecodeError>;
}

impl NamedEntity for Level {
    const TABLE: &'static str = "levels";

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn decode(row: &SqliteRow) -> Result<Self, RowDecodeError> {
        decode_level_row(row)
    }
}

impl NamedEntity for ObjectLog {
    const TABLE: &'static str = "objects";

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn decode(row: &SqliteRow) -> Result<Self, RowDecodeError> {
        decode_object_row(row)
    }
}

pub struct NamedRepository<E> {
    pool_manager: SqlitePoolManager,
    _entity: PhantomData<fn() -> E>,
}

pub type LevelRepository = NamedRepository<Level>;
pub type ObjectLogRepository = NamedRepository<ObjectLog>;

impl<E> Clone for NamedRepository<E> {
    fn clone(&self) -> Self {
        Self::with_pool(self.pool_manager.clone())
    }
}

impl<E> NamedRepository<E> {
    pub fn with_pool(pool_manager: SqlitePoolManager) -> Self {
        Self {
            pool_manager,
            _entity: PhantomData,
        }
    }
}

impl<E: NamedEntity> NamedRepository<E> {
    /// Opens a pool for `database_url` and creates the tables if needed.
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        ensure_schema(pool_manager.pool()).await?;
        Ok(Self::with_pool(pool_manager))
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<E>, StorageError> {
        let sql = format!("SELECT id, name FROM {} WHERE name = ?", E::TABLE);
        let mut conn = self.pool_manager.acquire().await?;
        let row = sqlx::query(&sql)
            .bind(name)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(row.as_ref().map(E::decode).transpose()?)
    }
}

#[async_trait]
impl<E: NamedEntity> Repository<E, i64> for NamedRepository<E> {
    /// Inserts the entity's name; its id is ignored.
    async fn create(&self, entity: &E) -> Result<i64, StorageError> {
        let sql = format!("INSERT INTO {} (name) VALUES (?)", E::TABLE);
        let mut conn = self.pool_manager.acquire().await?;
        let result = sqlx::query(&sql)
            .bind(entity.name())
            .execute(&mut *conn)
            .await?;

        let id = result.last_insert_rowid();
        info!("Saved {} row: id={}, name={:?}", E::TABLE, id, entity.name());
        Ok(id)
    }

    async fn select_all(&self) -> Result<DbRecords<E>, StorageError> {
        let sql = format!("SELECT id, name FROM {} ORDER BY id", E::TABLE);
        let mut conn = self.pool_manager.acquire().await?;
        let rows = sqlx::query(&sql).fetch_all(&mut *conn).await?;

        let entities = rows
            .iter()
            .map(E::decode)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(DbRecords::new(entities))
    }

    async fn delete_all(&self) -> Result<(), StorageError> {
        let sql = format!("DELETE FROM {}", E::TABLE);
        let mut conn = self.pool_manager.acquire().await?;
        let result = sqlx::query(&sql).execute(&mut *conn).await?;

        info!("Deleted {} rows from {}", result.rows_affected(), E::TABLE);
        Ok(())
    }
}
