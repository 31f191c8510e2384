//! Activity API handlers.
//!
//! ```text
//! GET /api/activities?page=1&limit=20
//! POST /api/activities {"type":"run","durationMinutes":30,"date":"2024-01-01"}
//! PUT /api/activities/{id} {"calories":320}
//! DELETE /api/activities/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use pagination::PageQuery;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::records::{
    Activity, ActivityDraft, ActivityPatch, Record, RecordValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::records::{self, RemovedResponse};
use crate::inbound::http::schemas::{ActivitySchema, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{date, label, notes, quantity, required};

/// Activity body for create and update.
///
/// `type` is required on create. On update absent or `null` fields keep
/// their stored value.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRequest {
    #[serde(rename = "type")]
    #[schema(example = "run")]
    pub activity_type: Option<String>,
    #[schema(example = 30.0)]
    pub duration_minutes: Option<f64>,
    pub distance: Option<f64>,
    pub calories: Option<f64>,
    pub notes: Option<String>,
    /// RFC 3339 timestamp or `YYYY-MM-DD`; defaults to now on create.
    #[schema(example = "2024-01-01")]
    pub date: Option<String>,
}

impl ActivityRequest {
    fn into_draft(self) -> Result<ActivityDraft, RecordValidationError> {
        Ok(ActivityDraft {
            activity_type: required("type", label("type", self.activity_type)?)?,
            duration_minutes: quantity("durationMinutes", self.duration_minutes)?,
            distance: quantity("distance", self.distance)?,
            calories: quantity("calories", self.calories)?,
            notes: notes("notes", self.notes)?,
            date: date("date", self.date)?,
        })
    }

    fn into_patch(self) -> Result<ActivityPatch, RecordValidationError> {
        Ok(ActivityPatch {
            activity_type: label("type", self.activity_type)?,
            duration_minutes: quantity("durationMinutes", self.duration_minutes)?,
            distance: quantity("distance", self.distance)?,
            calories: quantity("calories", self.calories)?,
            notes: notes("notes", self.notes)?,
            date: date("date", self.date)?,
        })
    }
}

/// Envelope around a single activity.
#[derive(Debug, Serialize, ToSchema)]
pub struct ActivityResponse {
    pub success: bool,
    #[schema(value_type = ActivitySchema)]
    pub activity: Record<Activity>,
}

/// Envelope around the caller's activities.
#[derive(Debug, Serialize, ToSchema)]
pub struct ActivityListResponse {
    pub success: bool,
    #[schema(value_type = Vec<ActivitySchema>)]
    pub activities: Vec<Record<Activity>>,
}

fn single(activity: Record<Activity>) -> ActivityResponse {
    ActivityResponse {
        success: true,
        activity,
    }
}

/// List the caller's activities, newest first.
#[utoipa::path(
    get,
    path = "/api/activities",
    params(
        ("page" = Option<u32>, Query, description = "1-based page number"),
        ("limit" = Option<u32>, Query, description = "Page size, 1 to 100; defaults to 20")
    ),
    responses(
        (status = 200, description = "Caller's activities", body = ActivityListResponse),
        (status = 400, description = "Invalid pagination", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["activities"],
    operation_id = "listActivities",
    security(("BearerAuth" = []))
)]
#[get("/activities")]
pub async fn list_activities(
    caller: AuthenticatedUser,
    state: web::Data<HttpState>,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<ActivityListResponse>> {
    let activities = records::list(&state.activities, &caller, query.into_inner()).await?;
    Ok(web::Json(ActivityListResponse {
        success: true,
        activities,
    }))
}

/// Log an activity for the caller.
#[utoipa::path(
    post,
    path = "/api/activities",
    request_body = ActivityRequest,
    responses(
        (status = 201, description = "Created activity", body = ActivityResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["activities"],
    operation_id = "createActivity",
    security(("BearerAuth" = []))
)]
#[post("/activities")]
pub async fn create_activity(
    caller: AuthenticatedUser,
    state: web::Data<HttpState>,
    payload: web::Json<ActivityRequest>,
) -> ApiResult<HttpResponse> {
    let draft = payload.into_inner().into_draft();
    let activity = records::create(&state.activities, &caller, draft).await?;
    Ok(HttpResponse::Created().json(single(activity)))
}

/// Update one of the caller's activities.
#[utoipa::path(
    put,
    path = "/api/activities/{id}",
    params(("id" = String, Path, description = "Activity identifier")),
    request_body = ActivityRequest,
    responses(
        (status = 200, description = "Updated activity", body = ActivityResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Owned by another user", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["activities"],
    operation_id = "updateActivity",
    security(("BearerAuth" = []))
)]
#[put("/activities/{id}")]
pub async fn update_activity(
    caller: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<ActivityRequest>,
) -> ApiResult<web::Json<ActivityResponse>> {
    let patch = payload.into_inner().into_patch();
    let activity = records::update(&state.activities, &caller, &path, patch).await?;
    Ok(web::Json(single(activity)))
}

/// Delete one of the caller's activities.
#[utoipa::path(
    delete,
    path = "/api/activities/{id}",
    params(("id" = String, Path, description = "Activity identifier")),
    responses(
        (status = 200, description = "Activity removed", body = RemovedResponse),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Owned by another user", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["activities"],
    operation_id = "deleteActivity",
    security(("BearerAuth" = []))
)]
#[delete("/activities/{id}")]
pub async fn delete_activity(
    caller: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    records::remove(&state.activities, &caller, &path).await
}

#[cfg(test)]
#[path = "activities_tests.rs"]
mod tests;
