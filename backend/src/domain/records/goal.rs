//! Personal targets with progress tracking.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Label, OwnedRecord, Quantity, RecordKind};

/// A fitness goal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub title: Label,
    pub target: Option<Quantity>,
    pub progress: Quantity,
    /// Unit `target` and `progress` are measured in, e.g. "km".
    pub unit: Option<Label>,
    pub due_date: Option<DateTime<Utc>>,
    pub completed: bool,
}

/// Fields accepted when setting a goal.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalDraft {
    pub title: Label,
    pub target: Option<Quantity>,
    pub progress: Option<Quantity>,
    pub unit: Option<Label>,
    pub due_date: Option<DateTime<Utc>>,
    pub completed: Option<bool>,
}

impl GoalDraft {
    /// Minimal draft with only the required title.
    pub fn new(title: Label) -> Self {
        Self {
            title,
            target: None,
            progress: None,
            unit: None,
            due_date: None,
            completed: None,
        }
    }
}

/// Partial goal update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoalPatch {
    pub title: Option<Label>,
    pub target: Option<Quantity>,
    pub progress: Option<Quantity>,
    pub unit: Option<Label>,
    pub due_date: Option<DateTime<Utc>>,
    pub completed: Option<bool>,
}

impl OwnedRecord for Goal {
    type Draft = GoalDraft;
    type Patch = GoalPatch;

    const KIND: RecordKind = RecordKind::Goal;

    fn from_draft(draft: GoalDraft, _now: DateTime<Utc>) -> Self {
        Self {
            title: draft.title,
            target: draft.target,
            progress: draft.progress.unwrap_or(Quantity::ZERO),
            unit: draft.unit,
            due_date: draft.due_date,
            completed: draft.completed.unwrap_or(false),
        }
    }

    fn apply_patch(&mut self, patch: GoalPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if patch.target.is_some() {
            self.target = patch.target;
        }
        if let Some(progress) = patch.progress {
            self.progress = progress;
        }
        if patch.unit.is_some() {
            self.unit = patch.unit;
        }
        if patch.due_date.is_some() {
            self.due_date = patch.due_date;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
    }

    fn date(&self) -> Option<DateTime<Utc>> {
        None
    }
}
