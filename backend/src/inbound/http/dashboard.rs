//! Dashboard API handler.

use actix_web::{get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::ports::DashboardSummary;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::schemas::{DashboardSummarySchema, ErrorSchema};
use crate::inbound::http::state::HttpState;

/// Envelope around the caller's dashboard.
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub success: bool,
    #[schema(value_type = DashboardSummarySchema)]
    pub data: DashboardSummary,
}

/// Recent activities plus trailing seven-day aggregates for the caller.
#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Dashboard summary", body = DashboardResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["dashboard"],
    operation_id = "dashboard",
    security(("BearerAuth" = []))
)]
#[get("/dashboard")]
pub async fn dashboard(
    caller: AuthenticatedUser,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<DashboardResponse>> {
    let data = state.dashboard.summary(caller.user_id()).await?;
    Ok(web::Json(DashboardResponse {
        success: true,
        data,
    }))
}

#[cfg(test)]
mod tests {
    use actix_web::test as actix_test;
    use serde_json::{Value, json};

    use super::*;
    use crate::inbound::http::test_utils::{
        StaticAuthenticator, bearer, state_with_authenticator, test_app,
    };

    #[actix_web::test]
    async fn summarises_records_logged_this_week() {
        let app = actix_test::init_service(test_app(state_with_authenticator(
            StaticAuthenticator::new(),
        )))
        .await;
        for (uri, payload) in [
            ("/api/activities", json!({"type": "run", "durationMinutes": 30, "calories": 300})),
            ("/api/activities", json!({"type": "ride", "durationMinutes": 60, "calories": 500})),
            ("/api/nutrition", json!({"calories": 650})),
            ("/api/sleep", json!({"durationHours": 8})),
        ] {
            let req = actix_test::TestRequest::post()
                .uri(uri)
                .insert_header(bearer())
                .set_json(payload)
                .to_request();
            actix_test::call_service(&app, req).await;
        }

        let req = actix_test::TestRequest::get()
            .uri("/api/dashboard")
            .insert_header(bearer())
            .to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, req).await;

        let data = &body["data"];
        assert_eq!(body["success"], json!(true));
        assert_eq!(data["totalActivities"], json!(2));
        assert_eq!(data["activities"].as_array().map(Vec::len), Some(2));
        assert_eq!(data["weekly"]["activityCount"], json!(2));
        assert_eq!(data["weekly"]["activeMinutes"], json!(90.0));
        assert_eq!(data["weekly"]["caloriesBurned"], json!(800.0));
        assert_eq!(data["weekly"]["caloriesConsumed"], json!(650.0));
        assert_eq!(data["weekly"]["averageSleepHours"], json!(8.0));
    }

    #[actix_web::test]
    async fn empty_dashboard_has_null_sleep_average() {
        let app = actix_test::init_service(test_app(state_with_authenticator(
            StaticAuthenticator::new(),
        )))
        .await;
        let req = actix_test::TestRequest::get()
            .uri("/api/dashboard")
            .insert_header(bearer())
            .to_request();

        let body: Value = actix_test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["data"]["totalActivities"], json!(0));
        assert_eq!(body["data"]["weekly"]["averageSleepHours"], Value::Null);
    }
}
