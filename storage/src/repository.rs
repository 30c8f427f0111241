//! Generic persistence capabilities shared by every entity repository.

use async_trait::async_trait;

use crate::error::StorageError;
use crate::models::DbRecords;

/// Create / read-all / delete-all for one entity type `T` keyed by `ID`.
#[async_trait]
pub trait Repository<T, ID> {
    /// Inserts `entity` and returns the identifier assigned by the store.
    async fn create(&self, entity: &T) -> Result<ID, StorageError>;
    async fn select_all(&self) -> Result<DbRecords<T>, StorageError>;
    async fn delete_all(&self) -> Result<(), StorageError>;
}
