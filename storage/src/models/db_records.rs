//! Result envelope for repository reads.

use serde::{Deserialize, Serialize};

/// Rows returned by a query plus an optional total.
///
/// `count` is only set by paginated queries, where it reports the number of matching rows
/// regardless of limit/offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbRecords<T> {
    pub records: Vec<T>,
    pub count: Option<i64>,
}

impl<T> DbRecords<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self {
            records,
            count: None,
        }
    }

    pub fn with_count(records: Vec<T>, count: i64) -> Self {
        Self {
            records,
            count: Some(count),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    pub fn into_records(self) -> Vec<T> {
        self.records
    }
}

impl<T> IntoIterator for DbRecords<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a DbRecords<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
