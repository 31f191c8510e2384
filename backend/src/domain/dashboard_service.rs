//! Dashboard summary over the caller's activities, meals and sleep.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use mockable::Clock;
use pagination::PageRequest;

use crate::domain::ownership::map_record_persistence_error;
use crate::domain::ports::{DashboardQuery, DashboardSummary, RecordRepository, WeeklySummary};
use crate::domain::records::{Activity, Nutrition, OwnedRecord, Quantity, Record, Sleep};
use crate::domain::{Error, UserId};

/// Number of recent activities shown on the dashboard.
pub const RECENT_ACTIVITY_LIMIT: u32 = 10;
/// Length of the trailing aggregation window in days.
pub const WEEKLY_WINDOW_DAYS: i64 = 7;

fn sum<R: OwnedRecord>(records: &[Record<R>], field: impl Fn(&R) -> Option<Quantity>) -> f64 {
    records
        .iter()
        .filter_map(|record| field(record.body()))
        .map(Quantity::get)
        .fold(0.0, |total, value| total + value)
}

/// Dashboard service implementing [`DashboardQuery`].
#[derive(Clone)]
pub struct DashboardService {
    activities: Arc<dyn RecordRepository<Activity>>,
    nutrition: Arc<dyn RecordRepository<Nutrition>>,
    sleep: Arc<dyn RecordRepository<Sleep>>,
    clock: Arc<dyn Clock>,
}

impl DashboardService {
    /// Create a service over the record repositories it aggregates.
    pub fn new(
        activities: Arc<dyn RecordRepository<Activity>>,
        nutrition: Arc<dyn RecordRepository<Nutrition>>,
        sleep: Arc<dyn RecordRepository<Sleep>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            activities,
            nutrition,
            sleep,
            clock,
        }
    }
}

#[async_trait]
impl DashboardQuery for DashboardService {
    async fn summary(&self, caller: &UserId) -> Result<DashboardSummary, Error> {
        let to = self.clock.utc();
        let from = to - Duration::days(WEEKLY_WINDOW_DAYS);
        let recent_window = PageRequest::new(1, RECENT_ACTIVITY_LIMIT)
            .map_err(|err| Error::internal(format!("invalid dashboard window: {err}")))?;

        let recent = self
            .activities
            .list_for_owner(caller, Some(recent_window))
            .await
            .map_err(map_record_persistence_error)?;
        let total_activities = self
            .activities
            .count_for_owner(caller)
            .await
            .map_err(map_record_persistence_error)?;
        let week_activities = self
            .activities
            .list_between(caller, from, to)
            .await
            .map_err(map_record_persistence_error)?;
        let week_meals = self
            .nutrition
            .list_between(caller, from, to)
            .await
            .map_err(map_record_persistence_error)?;
        let week_sleep = self
            .sleep
            .list_between(caller, from, to)
            .await
            .map_err(map_record_persistence_error)?;

        let nights = week_sleep
            .iter()
            .filter(|night| night.body().duration_hours.is_some())
            .count();
        let average_sleep_hours = if nights == 0 {
            None
        } else {
            let nights = u32::try_from(nights)
                .map(f64::from)
                .map_err(|_| Error::internal("too many sleep logs in window"))?;
            Some(sum(&week_sleep, |s| s.duration_hours) / nights)
        };
        let activity_count = u64::try_from(week_activities.len())
            .map_err(|_| Error::internal("too many activities in window"))?;

        let weekly = WeeklySummary {
            from,
            to,
            activity_count,
            active_minutes: sum(&week_activities, |a| a.duration_minutes),
            calories_burned: sum(&week_activities, |a| a.calories),
            calories_consumed: sum(&week_meals, |m| m.calories),
            average_sleep_hours,
        };

        Ok(DashboardSummary {
            activities: recent,
            total_activities,
            weekly,
        })
    }
}

#[cfg(test)]
#[path = "dashboard_service_tests.rs"]
mod tests;
