//! Goal API handlers.
//!
//! ```text
//! GET /api/goals
//! POST /api/goals {"title":"Run 100 km","target":100,"unit":"km"}
//! ```

use actix_web::{HttpResponse, get, post, web};
use pagination::PageQuery;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::records::{Goal, GoalDraft, Record, RecordValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::records;
use crate::inbound::http::schemas::{ErrorSchema, GoalSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{date, label, quantity, required};

/// Goal body; `title` is required.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GoalRequest {
    #[schema(example = "Run 100 km")]
    pub title: Option<String>,
    #[schema(example = 100.0)]
    pub target: Option<f64>,
    pub progress: Option<f64>,
    #[schema(example = "km")]
    pub unit: Option<String>,
    pub due_date: Option<String>,
    pub completed: Option<bool>,
}

impl TryFrom<GoalRequest> for GoalDraft {
    type Error = RecordValidationError;

    fn try_from(value: GoalRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            title: required("title", label("title", value.title)?)?,
            target: quantity("target", value.target)?,
            progress: quantity("progress", value.progress)?,
            unit: label("unit", value.unit)?,
            due_date: date("dueDate", value.due_date)?,
            completed: value.completed,
        })
    }
}

/// Envelope around a single goal.
#[derive(Debug, Serialize, ToSchema)]
pub struct GoalResponse {
    pub success: bool,
    #[schema(value_type = GoalSchema)]
    pub goal: Record<Goal>,
}

/// Envelope around the caller's goals.
#[derive(Debug, Serialize, ToSchema)]
pub struct GoalListResponse {
    pub success: bool,
    #[schema(value_type = Vec<GoalSchema>)]
    pub goals: Vec<Record<Goal>>,
}

/// List the caller's goals, most recently created first.
#[utoipa::path(
    get,
    path = "/api/goals",
    params(
        ("page" = Option<u32>, Query, description = "1-based page number"),
        ("limit" = Option<u32>, Query, description = "Page size, 1 to 100; defaults to 20")
    ),
    responses(
        (status = 200, description = "Caller's goals", body = GoalListResponse),
        (status = 400, description = "Invalid pagination", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["goals"],
    operation_id = "listGoals",
    security(("BearerAuth" = []))
)]
#[get("/goals")]
pub async fn list_goals(
    caller: AuthenticatedUser,
    state: web::Data<HttpState>,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<GoalListResponse>> {
    let goals = records::list(&state.goals, &caller, query.into_inner()).await?;
    Ok(web::Json(GoalListResponse {
        success: true,
        goals,
    }))
}

/// Set a goal for the caller.
#[utoipa::path(
    post,
    path = "/api/goals",
    request_body = GoalRequest,
    responses(
        (status = 201, description = "Created goal", body = GoalResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["goals"],
    operation_id = "createGoal",
    security(("BearerAuth" = []))
)]
#[post("/goals")]
pub async fn create_goal(
    caller: AuthenticatedUser,
    state: web::Data<HttpState>,
    payload: web::Json<GoalRequest>,
) -> ApiResult<HttpResponse> {
    let draft = GoalDraft::try_from(payload.into_inner());
    let goal = records::create(&state.goals, &caller, draft).await?;
    Ok(HttpResponse::Created().json(GoalResponse {
        success: true,
        goal,
    }))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use serde_json::{Value, json};

    use super::*;
    use crate::inbound::http::test_utils::{
        StaticAuthenticator, bearer, state_with_authenticator, test_app,
    };

    #[actix_web::test]
    async fn create_defaults_progress_and_completion() {
        let app = actix_test::init_service(test_app(state_with_authenticator(
            StaticAuthenticator::new(),
        )))
        .await;
        let req = actix_test::TestRequest::post()
            .uri("/api/goals")
            .insert_header(bearer())
            .set_json(json!({"title": "Run 100 km", "target": 100, "unit": "km"}))
            .to_request();

        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["goal"]["progress"], json!(0.0));
        assert_eq!(body["goal"]["completed"], json!(false));
        assert_eq!(body["goal"]["dueDate"], Value::Null);
    }

    #[actix_web::test]
    async fn create_requires_title() {
        let app = actix_test::init_service(test_app(state_with_authenticator(
            StaticAuthenticator::new(),
        )))
        .await;
        let req = actix_test::TestRequest::post()
            .uri("/api/goals")
            .insert_header(bearer())
            .set_json(json!({"target": 10}))
            .to_request();

        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], json!("title"));
    }

    #[actix_web::test]
    async fn list_returns_goals_newest_first() {
        let state = state_with_authenticator(StaticAuthenticator::new());
        let app = actix_test::init_service(test_app(state)).await;
        for title in ["first", "second"] {
            let req = actix_test::TestRequest::post()
                .uri("/api/goals")
                .insert_header(bearer())
                .set_json(json!({"title": title}))
                .to_request();
            assert_eq!(
                actix_test::call_service(&app, req).await.status(),
                StatusCode::CREATED
            );
        }

        let req = actix_test::TestRequest::get()
            .uri("/api/goals")
            .insert_header(bearer())
            .to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, req).await;

        let goals = body["goals"].as_array().expect("goals array");
        assert_eq!(goals.len(), 2);
    }
}
