//! Nutrition API handlers.
//!
//! ```text
//! GET /api/nutrition
//! POST /api/nutrition {"mealType":"lunch","protein":30,"carbs":60,"fats":15}
//! PUT /api/nutrition/{id} {"notes":"no dessert"}
//! DELETE /api/nutrition/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use pagination::PageQuery;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::records::{Nutrition, NutritionDraft, Record, RecordValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::records::{self, RemovedResponse};
use crate::inbound::http::schemas::{ErrorSchema, NutritionSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{date, label, notes, quantity};

/// Meal body for create and update; every field is optional.
///
/// When `calories` is absent and any macronutrient is present, calories are
/// derived at 4/4/9 kcal per gram of protein/carbs/fats.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NutritionRequest {
    #[schema(example = "lunch")]
    pub meal_type: Option<String>,
    pub calories: Option<f64>,
    #[schema(example = 30.0)]
    pub protein: Option<f64>,
    #[schema(example = 60.0)]
    pub carbs: Option<f64>,
    #[schema(example = 15.0)]
    pub fats: Option<f64>,
    pub notes: Option<String>,
    pub date: Option<String>,
}

impl TryFrom<NutritionRequest> for NutritionDraft {
    type Error = RecordValidationError;

    fn try_from(value: NutritionRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            meal_type: label("mealType", value.meal_type)?,
            calories: quantity("calories", value.calories)?,
            protein: quantity("protein", value.protein)?,
            carbs: quantity("carbs", value.carbs)?,
            fats: quantity("fats", value.fats)?,
            notes: notes("notes", value.notes)?,
            date: date("date", value.date)?,
        })
    }
}

/// Envelope around a single meal.
#[derive(Debug, Serialize, ToSchema)]
pub struct NutritionResponse {
    pub success: bool,
    #[schema(value_type = NutritionSchema)]
    pub nutrition: Record<Nutrition>,
}

/// Envelope around the caller's meals.
#[derive(Debug, Serialize, ToSchema)]
pub struct NutritionListResponse {
    pub success: bool,
    #[schema(value_type = Vec<NutritionSchema>)]
    pub items: Vec<Record<Nutrition>>,
}

/// List the caller's meals, newest first.
#[utoipa::path(
    get,
    path = "/api/nutrition",
    params(
        ("page" = Option<u32>, Query, description = "1-based page number"),
        ("limit" = Option<u32>, Query, description = "Page size, 1 to 100; defaults to 20")
    ),
    responses(
        (status = 200, description = "Caller's meals", body = NutritionListResponse),
        (status = 400, description = "Invalid pagination", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["nutrition"],
    operation_id = "listNutrition",
    security(("BearerAuth" = []))
)]
#[get("/nutrition")]
pub async fn list_nutrition(
    caller: AuthenticatedUser,
    state: web::Data<HttpState>,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<NutritionListResponse>> {
    let items = records::list(&state.nutrition, &caller, query.into_inner()).await?;
    Ok(web::Json(NutritionListResponse {
        success: true,
        items,
    }))
}

/// Log a meal for the caller.
#[utoipa::path(
    post,
    path = "/api/nutrition",
    request_body = NutritionRequest,
    responses(
        (status = 201, description = "Created meal", body = NutritionResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["nutrition"],
    operation_id = "createNutrition",
    security(("BearerAuth" = []))
)]
#[post("/nutrition")]
pub async fn create_nutrition(
    caller: AuthenticatedUser,
    state: web::Data<HttpState>,
    payload: web::Json<NutritionRequest>,
) -> ApiResult<HttpResponse> {
    let draft = NutritionDraft::try_from(payload.into_inner());
    let nutrition = records::create(&state.nutrition, &caller, draft).await?;
    Ok(HttpResponse::Created().json(NutritionResponse {
        success: true,
        nutrition,
    }))
}

/// Update one of the caller's meals.
#[utoipa::path(
    put,
    path = "/api/nutrition/{id}",
    params(("id" = String, Path, description = "Nutrition entry identifier")),
    request_body = NutritionRequest,
    responses(
        (status = 200, description = "Updated meal", body = NutritionResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Owned by another user", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["nutrition"],
    operation_id = "updateNutrition",
    security(("BearerAuth" = []))
)]
#[put("/nutrition/{id}")]
pub async fn update_nutrition(
    caller: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<NutritionRequest>,
) -> ApiResult<web::Json<NutritionResponse>> {
    let patch = NutritionDraft::try_from(payload.into_inner());
    let nutrition = records::update(&state.nutrition, &caller, &path, patch).await?;
    Ok(web::Json(NutritionResponse {
        success: true,
        nutrition,
    }))
}

/// Delete one of the caller's meals.
#[utoipa::path(
    delete,
    path = "/api/nutrition/{id}",
    params(("id" = String, Path, description = "Nutrition entry identifier")),
    responses(
        (status = 200, description = "Meal removed", body = RemovedResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Owned by another user", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["nutrition"],
    operation_id = "deleteNutrition",
    security(("BearerAuth" = []))
)]
#[delete("/nutrition/{id}")]
pub async fn delete_nutrition(
    caller: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    records::remove(&state.nutrition, &caller, &path).await
}
