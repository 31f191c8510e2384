//! Driving port for the dashboard summary.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::records::{Activity, Record};
use crate::domain::{Error, UserId};

/// Aggregates over a trailing window of days.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySummary {
    /// Inclusive window start.
    pub from: DateTime<Utc>,
    /// Inclusive window end (the time the summary was computed).
    pub to: DateTime<Utc>,
    pub activity_count: u64,
    /// Sum of activity durations in minutes.
    pub active_minutes: f64,
    /// Sum of activity calories.
    pub calories_burned: f64,
    /// Sum of meal calories.
    pub calories_consumed: f64,
    /// Mean logged sleep, `None` when no sleep duration was logged.
    pub average_sleep_hours: Option<f64>,
}

/// Dashboard payload for the caller.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Most recent activities, newest first.
    pub activities: Vec<Record<Activity>>,
    /// Count of all the caller's activities.
    pub total_activities: u64,
    pub weekly: WeeklySummary,
}

/// Domain use-case port for the dashboard.
#[async_trait]
pub trait DashboardQuery: Send + Sync {
    /// Summarise the caller's recent activity, nutrition and sleep.
    async fn summary(&self, caller: &UserId) -> Result<DashboardSummary, Error>;
}
