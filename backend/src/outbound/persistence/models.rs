//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements and to translate between columns and validated domain
//! values.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::ports::{RecordPersistenceError, StoredAccount, UserPersistenceError};
use crate::domain::records::{
    Activity, ClockTime, Goal, Label, Notes, Nutrition, OwnedRecord, Quantity, Record, RecordId,
    Sleep,
};
use crate::domain::{PasswordDigest, User, UserId};

use super::schema::{activities, goals, nutrition_entries, sleep_logs, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    pub(crate) fn into_user(self) -> Result<User, UserPersistenceError> {
        User::try_from_strings(self.id.to_string(), self.name, self.email, self.created_at)
            .map_err(|err| UserPersistenceError::query(format!("stored user is invalid: {err}")))
    }

    pub(crate) fn into_account(self) -> Result<StoredAccount, UserPersistenceError> {
        let password = PasswordDigest::new(self.password_hash.clone());
        Ok(StoredAccount {
            user: self.into_user()?,
            password,
        })
    }
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Changeset struct for profile updates. An absent hash keeps the stored one.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserUpdate<'a> {
    pub name: &'a str,
    pub password_hash: Option<&'a str>,
}

// ---------------------------------------------------------------------------
// Record rows
// ---------------------------------------------------------------------------

/// Conversion between a table row and a domain record.
pub(crate) trait RecordRow<R: OwnedRecord>: Sized {
    /// Flatten a record into a row for insert or update.
    fn from_record(record: &Record<R>) -> Self;

    /// Rebuild the record, re-validating stored values.
    fn into_record(self) -> Result<Record<R>, RecordPersistenceError>;
}

fn corrupt(field: &str, err: impl std::fmt::Display) -> RecordPersistenceError {
    RecordPersistenceError::query(format!("stored {field} is invalid: {err}"))
}

fn quantity(field: &'static str, value: Option<f64>) -> Result<Option<Quantity>, RecordPersistenceError> {
    value
        .map(|raw| Quantity::new(field, raw).map_err(|err| corrupt(field, err)))
        .transpose()
}

fn label(field: &'static str, value: Option<String>) -> Result<Option<Label>, RecordPersistenceError> {
    value
        .map(|raw| Label::new(field, &raw).map_err(|err| corrupt(field, err)))
        .transpose()
}

fn notes(value: Option<String>) -> Result<Option<Notes>, RecordPersistenceError> {
    match value {
        Some(raw) => Notes::parse("notes", &raw).map_err(|err| corrupt("notes", err)),
        None => Ok(None),
    }
}

fn clock(field: &'static str, value: Option<String>) -> Result<Option<ClockTime>, RecordPersistenceError> {
    value
        .map(|raw| ClockTime::parse(field, &raw).map_err(|err| corrupt(field, err)))
        .transpose()
}

fn text<T: AsRef<str>>(value: Option<&T>) -> Option<String> {
    value.map(|v| v.as_ref().to_owned())
}

/// Row struct for the activities table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = activities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ActivityRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub activity_type: String,
    pub duration_minutes: Option<f64>,
    pub distance: Option<f64>,
    pub calories: Option<f64>,
    pub notes: Option<String>,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RecordRow<Activity> for ActivityRow {
    fn from_record(record: &Record<Activity>) -> Self {
        let body = record.body();
        Self {
            id: *record.id().as_uuid(),
            user_id: *record.owner().as_uuid(),
            activity_type: body.activity_type.as_ref().to_owned(),
            duration_minutes: body.duration_minutes.map(Quantity::get),
            distance: body.distance.map(Quantity::get),
            calories: body.calories.map(Quantity::get),
            notes: text(body.notes.as_ref()),
            date: body.date,
            created_at: record.created_at(),
            updated_at: record.updated_at(),
        }
    }

    fn into_record(self) -> Result<Record<Activity>, RecordPersistenceError> {
        let body = Activity {
            activity_type: Label::new("activity_type", &self.activity_type)
                .map_err(|err| corrupt("activity_type", err))?,
            duration_minutes: quantity("duration_minutes", self.duration_minutes)?,
            distance: quantity("distance", self.distance)?,
            calories: quantity("calories", self.calories)?,
            notes: notes(self.notes)?,
            date: self.date,
        };
        Ok(Record::restore(
            RecordId::from_uuid(self.id),
            UserId::from_uuid(self.user_id),
            body,
            self.created_at,
            self.updated_at,
        ))
    }
}

/// Row struct for the nutrition_entries table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = nutrition_entries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct NutritionRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub meal_type: Option<String>,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fats: Option<f64>,
    pub notes: Option<String>,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RecordRow<Nutrition> for NutritionRow {
    fn from_record(record: &Record<Nutrition>) -> Self {
        let body = record.body();
        Self {
            id: *record.id().as_uuid(),
            user_id: *record.owner().as_uuid(),
            meal_type: text(body.meal_type.as_ref()),
            calories: body.calories.map(Quantity::get),
            protein: body.protein.map(Quantity::get),
            carbs: body.carbs.map(Quantity::get),
            fats: body.fats.map(Quantity::get),
            notes: text(body.notes.as_ref()),
            date: body.date,
            created_at: record.created_at(),
            updated_at: record.updated_at(),
        }
    }

    fn into_record(self) -> Result<Record<Nutrition>, RecordPersistenceError> {
        let body = Nutrition {
            meal_type: label("meal_type", self.meal_type)?,
            calories: quantity("calories", self.calories)?,
            protein: quantity("protein", self.protein)?,
            carbs: quantity("carbs", self.carbs)?,
            fats: quantity("fats", self.fats)?,
            notes: notes(self.notes)?,
            date: self.date,
        };
        Ok(Record::restore(
            RecordId::from_uuid(self.id),
            UserId::from_uuid(self.user_id),
            body,
            self.created_at,
            self.updated_at,
        ))
    }
}

/// Row struct for the sleep_logs table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = sleep_logs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct SleepRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub duration_hours: Option<f64>,
    pub bedtime: Option<String>,
    pub waketime: Option<String>,
    pub quality: Option<String>,
    pub notes: Option<String>,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RecordRow<Sleep> for SleepRow {
    fn from_record(record: &Record<Sleep>) -> Self {
        let body = record.body();
        Self {
            id: *record.id().as_uuid(),
            user_id: *record.owner().as_uuid(),
            duration_hours: body.duration_hours.map(Quantity::get),
            bedtime: body.bedtime.map(|t| t.to_string()),
            waketime: body.waketime.map(|t| t.to_string()),
            quality: text(body.quality.as_ref()),
            notes: text(body.notes.as_ref()),
            date: body.date,
            created_at: record.created_at(),
            updated_at: record.updated_at(),
        }
    }

    fn into_record(self) -> Result<Record<Sleep>, RecordPersistenceError> {
        let body = Sleep {
            duration_hours: quantity("duration_hours", self.duration_hours)?,
            bedtime: clock("bedtime", self.bedtime)?,
            waketime: clock("waketime", self.waketime)?,
            quality: label("quality", self.quality)?,
            notes: notes(self.notes)?,
            date: self.date,
        };
        Ok(Record::restore(
            RecordId::from_uuid(self.id),
            UserId::from_uuid(self.user_id),
            body,
            self.created_at,
            self.updated_at,
        ))
    }
}

/// Row struct for the goals table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = goals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct GoalRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub target: Option<f64>,
    pub progress: f64,
    pub unit: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RecordRow<Goal> for GoalRow {
    fn from_record(record: &Record<Goal>) -> Self {
        let body = record.body();
        Self {
            id: *record.id().as_uuid(),
            user_id: *record.owner().as_uuid(),
            title: body.title.as_ref().to_owned(),
            target: body.target.map(Quantity::get),
            progress: body.progress.get(),
            unit: text(body.unit.as_ref()),
            due_date: body.due_date,
            completed: body.completed,
            created_at: record.created_at(),
            updated_at: record.updated_at(),
        }
    }

    fn into_record(self) -> Result<Record<Goal>, RecordPersistenceError> {
        let body = Goal {
            title: Label::new("title", &self.title).map_err(|err| corrupt("title", err))?,
            target: quantity("target", self.target)?,
            progress: Quantity::new("progress", self.progress)
                .map_err(|err| corrupt("progress", err))?,
            unit: label("unit", self.unit)?,
            due_date: self.due_date,
            completed: self.completed,
        };
        Ok(Record::restore(
            RecordId::from_uuid(self.id),
            UserId::from_uuid(self.user_id),
            body,
            self.created_at,
            self.updated_at,
        ))
    }
}
