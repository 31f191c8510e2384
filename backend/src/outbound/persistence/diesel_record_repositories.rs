//! PostgreSQL-backed record repositories using Diesel ORM.
//!
//! Every record table has the same shape around its body columns, so one
//! macro generates the `RecordRepository` implementation per table. Lists are
//! ordered by the table's sort column, then by `created_at`, newest first.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::PageRequest;

use crate::domain::UserId;
use crate::domain::ports::{RecordPersistenceError, RecordRepository};
use crate::domain::records::{Activity, Goal, Nutrition, Record, RecordId, Sleep};

use super::error_mapping::{map_record_diesel_error, map_record_pool_error};
use super::models::{ActivityRow, GoalRow, NutritionRow, RecordRow, SleepRow};
use super::pool::DbPool;
use super::schema::{activities, goals, nutrition_entries, sleep_logs};

fn page_bounds(page: PageRequest) -> Result<(i64, i64), RecordPersistenceError> {
    let offset = i64::try_from(page.offset())
        .map_err(|_| RecordPersistenceError::query("page offset out of range"))?;
    Ok((offset, i64::from(page.limit())))
}

fn rows_into_records<R, Row>(rows: Vec<Row>) -> Result<Vec<Record<R>>, RecordPersistenceError>
where
    R: crate::domain::records::OwnedRecord,
    Row: RecordRow<R>,
{
    rows.into_iter().map(RecordRow::into_record).collect()
}

macro_rules! diesel_record_repository {
    (
        $(#[$meta:meta])*
        $repo:ident for $record:ty {
            table: $table:ident,
            row: $row:ty,
            order: $order:ident $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $repo {
            pool: DbPool,
        }

        impl $repo {
            /// Create a new repository with the given connection pool.
            pub fn new(pool: DbPool) -> Self {
                Self { pool }
            }
        }

        #[async_trait]
        impl RecordRepository<$record> for $repo {
            async fn insert(&self, record: &Record<$record>) -> Result<(), RecordPersistenceError> {
                let mut conn = self.pool.get().await.map_err(map_record_pool_error)?;
                let row = <$row as RecordRow<$record>>::from_record(record);
                diesel::insert_into($table::table)
                    .values(&row)
                    .execute(&mut conn)
                    .await
                    .map(|_| ())
                    .map_err(map_record_diesel_error)
            }

            async fn find_by_id(
                &self,
                id: RecordId,
            ) -> Result<Option<Record<$record>>, RecordPersistenceError> {
                let mut conn = self.pool.get().await.map_err(map_record_pool_error)?;
                let row: Option<$row> = $table::table
                    .find(*id.as_uuid())
                    .select(<$row>::as_select())
                    .first(&mut conn)
                    .await
                    .optional()
                    .map_err(map_record_diesel_error)?;
                row.map(RecordRow::into_record).transpose()
            }

            async fn list_for_owner(
                &self,
                owner: &UserId,
                page: Option<PageRequest>,
            ) -> Result<Vec<Record<$record>>, RecordPersistenceError> {
                let mut conn = self.pool.get().await.map_err(map_record_pool_error)?;
                let mut query = $table::table
                    .filter($table::user_id.eq(*owner.as_uuid()))
                    .order(($table::$order.desc(), $table::created_at.desc()))
                    .select(<$row>::as_select())
                    .into_boxed();
                if let Some(page) = page {
                    let (offset, limit) = page_bounds(page)?;
                    query = query.offset(offset).limit(limit);
                }
                let rows: Vec<$row> = query
                    .load(&mut conn)
                    .await
                    .map_err(map_record_diesel_error)?;
                rows_into_records(rows)
            }

            async fn list_between(
                &self,
                owner: &UserId,
                from: DateTime<Utc>,
                to: DateTime<Utc>,
            ) -> Result<Vec<Record<$record>>, RecordPersistenceError> {
                let mut conn = self.pool.get().await.map_err(map_record_pool_error)?;
                let rows: Vec<$row> = $table::table
                    .filter($table::user_id.eq(*owner.as_uuid()))
                    .filter($table::$order.ge(from))
                    .filter($table::$order.le(to))
                    .order(($table::$order.desc(), $table::created_at.desc()))
                    .select(<$row>::as_select())
                    .load(&mut conn)
                    .await
                    .map_err(map_record_diesel_error)?;
                rows_into_records(rows)
            }

            async fn count_for_owner(&self, owner: &UserId) -> Result<u64, RecordPersistenceError> {
                let mut conn = self.pool.get().await.map_err(map_record_pool_error)?;
                let count: i64 = $table::table
                    .filter($table::user_id.eq(*owner.as_uuid()))
                    .count()
                    .get_result(&mut conn)
                    .await
                    .map_err(map_record_diesel_error)?;
                u64::try_from(count)
                    .map_err(|_| RecordPersistenceError::query("negative record count"))
            }

            async fn update(&self, record: &Record<$record>) -> Result<bool, RecordPersistenceError> {
                let mut conn = self.pool.get().await.map_err(map_record_pool_error)?;
                let row = <$row as RecordRow<$record>>::from_record(record);
                let updated = diesel::update($table::table.find(*record.id().as_uuid()))
                    .set(&row)
                    .execute(&mut conn)
                    .await
                    .map_err(map_record_diesel_error)?;
                Ok(updated > 0)
            }

            async fn delete(&self, id: RecordId) -> Result<bool, RecordPersistenceError> {
                let mut conn = self.pool.get().await.map_err(map_record_pool_error)?;
                let deleted = diesel::delete($table::table.find(*id.as_uuid()))
                    .execute(&mut conn)
                    .await
                    .map_err(map_record_diesel_error)?;
                Ok(deleted > 0)
            }
        }
    };
}

diesel_record_repository! {
    /// Diesel-backed activity storage.
    DieselActivityRepository for Activity {
        table: activities,
        row: ActivityRow,
        order: date,
    }
}

diesel_record_repository! {
    /// Diesel-backed nutrition entry storage.
    DieselNutritionRepository for Nutrition {
        table: nutrition_entries,
        row: NutritionRow,
        order: date,
    }
}

diesel_record_repository! {
    /// Diesel-backed sleep log storage.
    DieselSleepRepository for Sleep {
        table: sleep_logs,
        row: SleepRow,
        order: date,
    }
}

diesel_record_repository! {
    /// Diesel-backed goal storage. Goals have no record date and sort by
    /// creation time.
    DieselGoalRepository for Goal {
        table: goals,
        row: GoalRow,
        order: created_at,
    }
}
