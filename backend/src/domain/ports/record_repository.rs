//! Port abstraction for tracked record storage.
//!
//! One generic port serves every record type; adapters are instantiated per
//! type.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::PageRequest;

use crate::domain::UserId;
use crate::domain::records::{OwnedRecord, Record, RecordId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by record repository adapters.
    pub enum RecordPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "record repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "record repository query failed: {message}",
    }
}

/// Storage for records of type `R`.
#[async_trait]
pub trait RecordRepository<R: OwnedRecord>: Send + Sync {
    /// Insert a newly created record.
    async fn insert(&self, record: &Record<R>) -> Result<(), RecordPersistenceError>;

    /// Fetch a record by id regardless of owner.
    async fn find_by_id(&self, id: RecordId) -> Result<Option<Record<R>>, RecordPersistenceError>;

    /// Records owned by `owner`, newest first, optionally paged.
    async fn list_for_owner(
        &self,
        owner: &UserId,
        page: Option<PageRequest>,
    ) -> Result<Vec<Record<R>>, RecordPersistenceError>;

    /// Records owned by `owner` whose sort key lies in `from..=to`,
    /// newest first.
    async fn list_between(
        &self,
        owner: &UserId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Record<R>>, RecordPersistenceError>;

    /// Number of records owned by `owner`.
    async fn count_for_owner(&self, owner: &UserId) -> Result<u64, RecordPersistenceError>;

    /// Overwrite a stored record. Returns `false` when it no longer exists.
    async fn update(&self, record: &Record<R>) -> Result<bool, RecordPersistenceError>;

    /// Remove a record. Returns `false` when it no longer exists.
    async fn delete(&self, id: RecordId) -> Result<bool, RecordPersistenceError>;
}
