//! Workout sessions.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Label, Notes, OwnedRecord, Quantity, RecordKind};

/// A logged workout.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Kind of exercise, e.g. "run".
    #[serde(rename = "type")]
    pub activity_type: Label,
    pub duration_minutes: Option<Quantity>,
    /// Distance covered, in the client's chosen unit.
    pub distance: Option<Quantity>,
    /// Energy burned in kcal.
    pub calories: Option<Quantity>,
    pub notes: Option<Notes>,
    pub date: DateTime<Utc>,
}

/// Fields accepted when logging a workout.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityDraft {
    pub activity_type: Label,
    pub duration_minutes: Option<Quantity>,
    pub distance: Option<Quantity>,
    pub calories: Option<Quantity>,
    pub notes: Option<Notes>,
    pub date: Option<DateTime<Utc>>,
}

impl ActivityDraft {
    /// Minimal draft with only the required type.
    pub fn new(activity_type: Label) -> Self {
        Self {
            activity_type,
            duration_minutes: None,
            distance: None,
            calories: None,
            notes: None,
            date: None,
        }
    }
}

/// Partial workout update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityPatch {
    pub activity_type: Option<Label>,
    pub duration_minutes: Option<Quantity>,
    pub distance: Option<Quantity>,
    pub calories: Option<Quantity>,
    pub notes: Option<Notes>,
    pub date: Option<DateTime<Utc>>,
}

impl OwnedRecord for Activity {
    type Draft = ActivityDraft;
    type Patch = ActivityPatch;

    const KIND: RecordKind = RecordKind::Activity;

    fn from_draft(draft: ActivityDraft, now: DateTime<Utc>) -> Self {
        Self {
            activity_type: draft.activity_type,
            duration_minutes: draft.duration_minutes,
            distance: draft.distance,
            calories: draft.calories,
            notes: draft.notes,
            date: draft.date.unwrap_or(now),
        }
    }

    fn apply_patch(&mut self, patch: ActivityPatch) {
        if let Some(activity_type) = patch.activity_type {
            self.activity_type = activity_type;
        }
        if patch.duration_minutes.is_some() {
            self.duration_minutes = patch.duration_minutes;
        }
        if patch.distance.is_some() {
            self.distance = patch.distance;
        }
        if patch.calories.is_some() {
            self.calories = patch.calories;
        }
        if patch.notes.is_some() {
            self.notes = patch.notes;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
    }

    fn date(&self) -> Option<DateTime<Utc>> {
        Some(self.date)
    }
}
