//! Sleep log API handlers.
//!
//! ```text
//! GET /api/sleep
//! POST /api/sleep {"bedtime":"23:00","waketime":"06:30","quality":"good"}
//! ```

use actix_web::{HttpResponse, get, post, web};
use pagination::PageQuery;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::records::{Record, RecordValidationError, Sleep, SleepDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::records;
use crate::inbound::http::schemas::{ErrorSchema, SleepSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{clock_time, date, label, notes, quantity};

/// Sleep log body; every field is optional.
///
/// `durationHours` is derived from `bedtime` and `waketime` (`HH:MM`,
/// crossing midnight when needed) when it is not supplied.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SleepRequest {
    pub duration_hours: Option<f64>,
    #[schema(example = "23:00")]
    pub bedtime: Option<String>,
    #[schema(example = "06:30")]
    pub waketime: Option<String>,
    #[schema(example = "good")]
    pub quality: Option<String>,
    pub notes: Option<String>,
    pub date: Option<String>,
}

impl TryFrom<SleepRequest> for SleepDraft {
    type Error = RecordValidationError;

    fn try_from(value: SleepRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            duration_hours: quantity("durationHours", value.duration_hours)?,
            bedtime: clock_time("bedtime", value.bedtime)?,
            waketime: clock_time("waketime", value.waketime)?,
            quality: label("quality", value.quality)?,
            notes: notes("notes", value.notes)?,
            date: date("date", value.date)?,
        })
    }
}

/// Envelope around a single sleep log.
#[derive(Debug, Serialize, ToSchema)]
pub struct SleepResponse {
    pub success: bool,
    #[schema(value_type = SleepSchema)]
    pub sleep: Record<Sleep>,
}

/// Envelope around the caller's sleep logs.
#[derive(Debug, Serialize, ToSchema)]
pub struct SleepListResponse {
    pub success: bool,
    #[schema(value_type = Vec<SleepSchema>)]
    pub items: Vec<Record<Sleep>>,
}

/// List the caller's sleep logs, newest first.
#[utoipa::path(
    get,
    path = "/api/sleep",
    params(
        ("page" = Option<u32>, Query, description = "1-based page number"),
        ("limit" = Option<u32>, Query, description = "Page size, 1 to 100; defaults to 20")
    ),
    responses(
        (status = 200, description = "Caller's sleep logs", body = SleepListResponse),
        (status = 400, description = "Invalid pagination", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["sleep"],
    operation_id = "listSleep",
    security(("BearerAuth" = []))
)]
#[get("/sleep")]
pub async fn list_sleep(
    caller: AuthenticatedUser,
    state: web::Data<HttpState>,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<SleepListResponse>> {
    let items = records::list(&state.sleep, &caller, query.into_inner()).await?;
    Ok(web::Json(SleepListResponse {
        success: true,
        items,
    }))
}

/// Log a night's sleep for the caller.
#[utoipa::path(
    post,
    path = "/api/sleep",
    request_body = SleepRequest,
    responses(
        (status = 201, description = "Created sleep log", body = SleepResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["sleep"],
    operation_id = "createSleep",
    security(("BearerAuth" = []))
)]
#[post("/sleep")]
pub async fn create_sleep(
    caller: AuthenticatedUser,
    state: web::Data<HttpState>,
    payload: web::Json<SleepRequest>,
) -> ApiResult<HttpResponse> {
    let draft = SleepDraft::try_from(payload.into_inner());
    let sleep = records::create(&state.sleep, &caller, draft).await?;
    Ok(HttpResponse::Created().json(SleepResponse {
        success: true,
        sleep,
    }))
}
