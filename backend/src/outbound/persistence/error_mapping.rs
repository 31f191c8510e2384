//! Shared Diesel and pool error mapping into the persistence port errors.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::{RecordPersistenceError, UserPersistenceError};

use super::pool::PoolError;

fn pool_message(error: PoolError) -> String {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    }
}

fn log_diesel_error(error: &DieselError) {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(error),
            "diesel operation failed"
        ),
    }
}

/// Map Diesel errors onto query/connection constructors.
///
/// `NotFound` and query-builder failures are query errors; closed
/// connections are connection errors.
fn map_basic_diesel_error<E>(
    error: DieselError,
    query: impl Fn(&'static str) -> E,
    connection: impl Fn(&'static str) -> E,
) -> E {
    log_diesel_error(&error);
    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        _ => query("database error"),
    }
}

pub(crate) fn map_record_pool_error(error: PoolError) -> RecordPersistenceError {
    RecordPersistenceError::connection(pool_message(error))
}

pub(crate) fn map_record_diesel_error(error: DieselError) -> RecordPersistenceError {
    map_basic_diesel_error(
        error,
        RecordPersistenceError::query,
        RecordPersistenceError::connection,
    )
}

pub(crate) fn map_user_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(pool_message(error))
}

pub(crate) fn map_user_diesel_error(error: DieselError) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

/// Map an insert failure, reporting unique violations on the email index as
/// duplicates.
pub(crate) fn map_user_insert_error(error: DieselError, email: &str) -> UserPersistenceError {
    if let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) = &error {
        log_diesel_error(&error);
        return UserPersistenceError::duplicate_email(email);
    }
    map_user_diesel_error(error)
}
