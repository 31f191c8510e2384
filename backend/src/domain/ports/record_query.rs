//! Driving port for listing the caller's records.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::records::{OwnedRecord, Record};
use crate::domain::{Error, UserId};

/// Domain use-case port for reading records of type `R`.
#[async_trait]
pub trait RecordQuery<R: OwnedRecord>: Send + Sync {
    /// Records owned by `caller`, newest first. `page` limits the window;
    /// `None` returns every record.
    async fn list(&self, caller: &UserId, page: Option<PageRequest>)
    -> Result<Vec<Record<R>>, Error>;
}
