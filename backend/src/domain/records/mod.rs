//! Tracked records owned by a single user: activities, meals, sleep logs and
//! goals.
//!
//! Each record type implements [`OwnedRecord`]; [`Record`] wraps it with the
//! identifier, owner reference and timestamps shared by every type. The
//! owner is fixed at creation and no operation reassigns it.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::user::UserId;

mod activity;
mod goal;
mod nutrition;
mod sleep;
mod values;

pub use activity::{Activity, ActivityDraft, ActivityPatch};
pub use goal::{Goal, GoalDraft, GoalPatch};
pub use nutrition::{Nutrition, NutritionDraft, NutritionPatch, calories_from_macros};
pub use sleep::{Sleep, SleepDraft, SleepPatch, hours_between};
pub use values::{
    ClockTime, LABEL_MAX, Label, NOTES_MAX, Notes, Quantity, RecordValidationError,
    parse_record_date,
};

/// Identifier of a tracked record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Kind of tracked record, used for messages and log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Activity,
    Nutrition,
    Sleep,
    Goal,
}

impl RecordKind {
    /// Human readable singular noun.
    pub fn noun(self) -> &'static str {
        match self {
            Self::Activity => "activity",
            Self::Nutrition => "nutrition entry",
            Self::Sleep => "sleep log",
            Self::Goal => "goal",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

/// Behaviour shared by every record type a user can own.
pub trait OwnedRecord: Clone + fmt::Debug + Serialize + Send + Sync + 'static {
    /// Validated payload for creating a record.
    type Draft: fmt::Debug + Send + Sync;
    /// Validated partial update; absent fields are kept.
    type Patch: fmt::Debug + Send + Sync;

    /// Which kind of record this is.
    const KIND: RecordKind;

    /// Build the record body from a draft. `now` fills a missing date.
    fn from_draft(draft: Self::Draft, now: DateTime<Utc>) -> Self;

    /// Shallow-merge `patch` into the record body.
    fn apply_patch(&mut self, patch: Self::Patch);

    /// Date the record describes, when the type has one. Lists are ordered by
    /// this value, falling back to the creation time.
    fn date(&self) -> Option<DateTime<Utc>>;
}

/// A record body together with its identity, owner and timestamps.
///
/// Serialises as the body's fields alongside `id`, `user`, `createdAt` and
/// `updatedAt`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record<R> {
    id: RecordId,
    #[serde(rename = "user")]
    owner: UserId,
    #[serde(flatten)]
    body: R,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl<R: OwnedRecord> Record<R> {
    /// Create a new record for `owner` from a validated draft.
    pub fn create(id: RecordId, owner: UserId, draft: R::Draft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            owner,
            body: R::from_draft(draft, now),
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a record read back from storage.
    pub fn restore(
        id: RecordId,
        owner: UserId,
        body: R,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner,
            body,
            created_at,
            updated_at,
        }
    }

    /// Merge `patch` into the body and bump `updated_at`.
    pub fn apply(&mut self, patch: R::Patch, now: DateTime<Utc>) {
        self.body.apply_patch(patch);
        self.updated_at = now;
    }

    /// Record identifier.
    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Owning user.
    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    /// Whether `user` owns this record.
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.owner == user
    }

    /// Type-specific fields.
    pub fn body(&self) -> &R {
        &self.body
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last modification timestamp.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Key lists are sorted on, newest first.
    pub fn sort_key(&self) -> DateTime<Utc> {
        self.body.date().unwrap_or(self.created_at)
    }
}

/// Sort records newest first by [`Record::sort_key`].
pub fn sort_newest_first<R: OwnedRecord>(records: &mut [Record<R>]) {
    records.sort_by(|a, b| {
        b.sort_key()
            .cmp(&a.sort_key())
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}

#[cfg(test)]
mod tests;
