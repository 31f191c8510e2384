//! Generic record service implementing the record command and query ports.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::PageRequest;
use tracing::debug;

use crate::domain::ownership::{load_owned, map_record_persistence_error, record_not_found};
use crate::domain::ports::{RecordCommand, RecordQuery, RecordRepository};
use crate::domain::records::{OwnedRecord, Record, RecordId};
use crate::domain::{Error, UserId};

/// Record service for type `R`, backed by any [`RecordRepository`].
pub struct RecordService<R: OwnedRecord> {
    repo: Arc<dyn RecordRepository<R>>,
    clock: Arc<dyn Clock>,
    _record: PhantomData<fn() -> R>,
}

impl<R: OwnedRecord> Clone for RecordService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            clock: Arc::clone(&self.clock),
            _record: PhantomData,
        }
    }
}

impl<R: OwnedRecord> RecordService<R> {
    /// Create a service over `repo`, timestamping with `clock`.
    pub fn new(repo: Arc<dyn RecordRepository<R>>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repo,
            clock,
            _record: PhantomData,
        }
    }
}

#[async_trait]
impl<R: OwnedRecord> RecordCommand<R> for RecordService<R> {
    async fn create(&self, caller: &UserId, draft: R::Draft) -> Result<Record<R>, Error> {
        let record = Record::create(RecordId::random(), caller.clone(), draft, self.clock.utc());
        self.repo
            .insert(&record)
            .await
            .map_err(map_record_persistence_error)?;
        debug!(record_kind = %R::KIND, record_id = %record.id(), "record created");
        Ok(record)
    }

    async fn update(
        &self,
        caller: &UserId,
        id: RecordId,
        patch: R::Patch,
    ) -> Result<Record<R>, Error> {
        let mut record = load_owned(self.repo.as_ref(), id, caller).await?;
        record.apply(patch, self.clock.utc());
        let stored = self
            .repo
            .update(&record)
            .await
            .map_err(map_record_persistence_error)?;
        if !stored {
            return Err(record_not_found::<R>(id));
        }
        debug!(record_kind = %R::KIND, record_id = %id, "record updated");
        Ok(record)
    }

    async fn delete(&self, caller: &UserId, id: RecordId) -> Result<(), Error> {
        load_owned(self.repo.as_ref(), id, caller).await?;
        let removed = self
            .repo
            .delete(id)
            .await
            .map_err(map_record_persistence_error)?;
        if !removed {
            return Err(record_not_found::<R>(id));
        }
        debug!(record_kind = %R::KIND, record_id = %id, "record deleted");
        Ok(())
    }
}

#[async_trait]
impl<R: OwnedRecord> RecordQuery<R> for RecordService<R> {
    async fn list(
        &self,
        caller: &UserId,
        page: Option<PageRequest>,
    ) -> Result<Vec<Record<R>>, Error> {
        self.repo
            .list_for_owner(caller, page)
            .await
            .map_err(map_record_persistence_error)
    }
}

#[cfg(test)]
#[path = "record_service_tests.rs"]
mod tests;
