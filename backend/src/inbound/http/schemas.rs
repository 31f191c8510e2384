//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the serialised shape of their domain types but
//! live in the inbound adapter layer where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// A backing store is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for the error envelope built from [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Always `false` for errors.
    #[schema(example = false)]
    success: bool,
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "not authorized, no token")]
    message: String,
    /// Correlation identifier echoed in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Field-level validation details.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::User`].
///
/// Public account identity; credentials are never serialised.
#[derive(ToSchema)]
#[schema(as = crate::domain::User, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    #[schema(example = "Ada Lovelace")]
    name: String,
    #[schema(example = "ada@example.com")]
    email: String,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
}

/// OpenAPI schema for an activity record.
#[derive(ToSchema)]
#[schema(as = crate::domain::records::Activity, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ActivitySchema {
    #[schema(value_type = String)]
    id: String,
    /// Owner's user id.
    #[schema(value_type = String)]
    user: String,
    #[schema(rename = "type", example = "run")]
    activity_type: String,
    #[schema(example = 30.0)]
    duration_minutes: Option<f64>,
    distance: Option<f64>,
    calories: Option<f64>,
    notes: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    date: String,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
}

/// OpenAPI schema for a nutrition entry.
#[derive(ToSchema)]
#[schema(as = crate::domain::records::Nutrition, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct NutritionSchema {
    #[schema(value_type = String)]
    id: String,
    #[schema(value_type = String)]
    user: String,
    #[schema(example = "breakfast")]
    meal_type: Option<String>,
    /// Derived from macronutrients when any of them is present.
    calories: Option<f64>,
    protein: Option<f64>,
    carbs: Option<f64>,
    fats: Option<f64>,
    notes: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    date: String,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
}

/// OpenAPI schema for a sleep log.
#[derive(ToSchema)]
#[schema(as = crate::domain::records::Sleep, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct SleepSchema {
    #[schema(value_type = String)]
    id: String,
    #[schema(value_type = String)]
    user: String,
    /// Derived from bedtime and waketime when not supplied.
    #[schema(example = 7.5)]
    duration_hours: Option<f64>,
    #[schema(example = "23:00")]
    bedtime: Option<String>,
    #[schema(example = "06:30")]
    waketime: Option<String>,
    quality: Option<String>,
    notes: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    date: String,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
}

/// OpenAPI schema for a goal.
#[derive(ToSchema)]
#[schema(as = crate::domain::records::Goal, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct GoalSchema {
    #[schema(value_type = String)]
    id: String,
    #[schema(value_type = String)]
    user: String,
    #[schema(example = "Run 100 km")]
    title: String,
    target: Option<f64>,
    progress: f64,
    unit: Option<String>,
    #[schema(value_type = Option<String>, format = DateTime)]
    due_date: Option<String>,
    completed: bool,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
}

/// OpenAPI schema for the trailing seven-day aggregates.
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::WeeklySummary, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct WeeklySummarySchema {
    #[schema(value_type = String, format = DateTime)]
    from: String,
    #[schema(value_type = String, format = DateTime)]
    to: String,
    activity_count: u64,
    active_minutes: f64,
    calories_burned: f64,
    calories_consumed: f64,
    average_sleep_hours: Option<f64>,
}

/// OpenAPI schema for [`crate::domain::ports::DashboardSummary`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::DashboardSummary, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct DashboardSummarySchema {
    activities: Vec<ActivitySchema>,
    total_activities: u64,
    weekly: WeeklySummarySchema,
}
