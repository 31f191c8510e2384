//! Single ownership gate for mutating tracked records.

use serde_json::json;
use tracing::warn;

use crate::domain::ports::{RecordPersistenceError, RecordRepository};
use crate::domain::records::{OwnedRecord, Record, RecordId};
use crate::domain::{Error, UserId};

/// Map record persistence failures to domain errors.
pub(crate) fn map_record_persistence_error(error: RecordPersistenceError) -> Error {
    match error {
        RecordPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("record store unavailable: {message}"))
        }
        RecordPersistenceError::Query { message } => {
            Error::internal(format!("record store error: {message}"))
        }
    }
}

pub(crate) fn record_not_found<R: OwnedRecord>(id: RecordId) -> Error {
    Error::not_found(format!("{} not found", R::KIND))
        .with_details(json!({ "id": id.to_string() }))
}

/// Load record `id` for mutation by `caller`.
///
/// Unknown ids fail with `not_found`; records owned by someone else fail
/// with `forbidden` and are left untouched.
pub async fn load_owned<R: OwnedRecord>(
    repo: &dyn RecordRepository<R>,
    id: RecordId,
    caller: &UserId,
) -> Result<Record<R>, Error> {
    let record = repo
        .find_by_id(id)
        .await
        .map_err(map_record_persistence_error)?
        .ok_or_else(|| record_not_found::<R>(id))?;

    if !record.is_owned_by(caller) {
        warn!(
            record_kind = %R::KIND,
            record_id = %id,
            caller = %caller,
            "rejected access to a record owned by another user"
        );
        return Err(Error::forbidden(format!(
            "not authorized to modify this {}",
            R::KIND
        )));
    }
    Ok(record)
}
