//! Nightly sleep logs.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{ClockTime, Label, Notes, OwnedRecord, Quantity, RecordKind};

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Hours slept between `bedtime` and `waketime`, wrapping past midnight and
/// rounded to one decimal place.
///
/// # Examples
/// ```
/// use fitlog::domain::records::{ClockTime, hours_between};
///
/// let bed = ClockTime::parse("bedtime", "23:00").unwrap();
/// let wake = ClockTime::parse("waketime", "06:30").unwrap();
/// assert_eq!(hours_between(bed, wake).get(), 7.5);
/// ```
pub fn hours_between(bedtime: ClockTime, waketime: ClockTime) -> Quantity {
    let bed = bedtime.minutes_since_midnight();
    let wake = waketime.minutes_since_midnight();
    let minutes = if wake >= bed {
        wake - bed
    } else {
        wake + MINUTES_PER_DAY - bed
    };
    let hours = (f64::from(minutes) / 60.0 * 10.0).round() / 10.0;
    Quantity::new("durationHours", hours).unwrap_or(Quantity::ZERO)
}

/// A logged night of sleep.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sleep {
    pub duration_hours: Option<Quantity>,
    pub bedtime: Option<ClockTime>,
    pub waketime: Option<ClockTime>,
    /// Subjective rating such as "good".
    pub quality: Option<Label>,
    pub notes: Option<Notes>,
    pub date: DateTime<Utc>,
}

/// Fields accepted when logging sleep.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SleepDraft {
    pub duration_hours: Option<Quantity>,
    pub bedtime: Option<ClockTime>,
    pub waketime: Option<ClockTime>,
    pub quality: Option<Label>,
    pub notes: Option<Notes>,
    pub date: Option<DateTime<Utc>>,
}

/// Partial sleep update.
pub type SleepPatch = SleepDraft;

impl Sleep {
    fn derive_duration(&mut self) {
        if let (Some(bed), Some(wake)) = (self.bedtime, self.waketime) {
            self.duration_hours = Some(hours_between(bed, wake));
        }
    }
}

impl OwnedRecord for Sleep {
    type Draft = SleepDraft;
    type Patch = SleepPatch;

    const KIND: RecordKind = RecordKind::Sleep;

    fn from_draft(draft: SleepDraft, now: DateTime<Utc>) -> Self {
        let mut night = Self {
            duration_hours: draft.duration_hours,
            bedtime: draft.bedtime,
            waketime: draft.waketime,
            quality: draft.quality,
            notes: draft.notes,
            date: draft.date.unwrap_or(now),
        };
        if night.duration_hours.is_none() {
            night.derive_duration();
        }
        night
    }

    fn apply_patch(&mut self, patch: SleepPatch) {
        let clock_changed = patch.bedtime.is_some() || patch.waketime.is_some();
        if patch.bedtime.is_some() {
            self.bedtime = patch.bedtime;
        }
        if patch.waketime.is_some() {
            self.waketime = patch.waketime;
        }
        if patch.quality.is_some() {
            self.quality = patch.quality;
        }
        if patch.notes.is_some() {
            self.notes = patch.notes;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        match patch.duration_hours {
            Some(hours) => self.duration_hours = Some(hours),
            None if clock_changed => self.derive_duration(),
            None => {}
        }
    }

    fn date(&self) -> Option<DateTime<Utc>> {
        Some(self.date)
    }
}
