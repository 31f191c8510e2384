//! Driving port for record mutations.
//!
//! Update and delete are only carried out for the record's owner; other
//! callers get `forbidden`, unknown ids get `not_found`.

use async_trait::async_trait;

use crate::domain::records::{OwnedRecord, Record, RecordId};
use crate::domain::{Error, UserId};

/// Domain use-case port for creating and changing records of type `R`.
#[async_trait]
pub trait RecordCommand<R: OwnedRecord>: Send + Sync {
    /// Create a record owned by `caller`.
    async fn create(&self, caller: &UserId, draft: R::Draft) -> Result<Record<R>, Error>;

    /// Shallow-merge `patch` into a record the caller owns.
    async fn update(
        &self,
        caller: &UserId,
        id: RecordId,
        patch: R::Patch,
    ) -> Result<Record<R>, Error>;

    /// Delete a record the caller owns.
    async fn delete(&self, caller: &UserId, id: RecordId) -> Result<(), Error>;
}
