//! Profile API handlers for the authenticated caller.
//!
//! ```text
//! GET /api/users/me
//! PUT /api/users/me {"name":"Ada King","password":"new-secret"}
//! ```

use actix_web::{get, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ProfileUpdate;
use crate::inbound::http::ApiResult;
use crate::inbound::http::accounts::UserResponse;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::map_credentials_validation_error;

/// Profile change; absent fields are kept. A new password is re-hashed.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateProfileRequest {
    #[schema(example = "Ada King")]
    pub name: Option<String>,
    pub password: Option<String>,
}

/// Return the caller's profile.
#[utoipa::path(
    get,
    path = "/api/users/me",
    responses(
        (status = 200, description = "Caller profile", body = UserResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Account no longer exists", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getProfile",
    security(("BearerAuth" = []))
)]
#[get("/users/me")]
pub async fn get_profile(
    caller: AuthenticatedUser,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<UserResponse>> {
    let user = state.account_query.current_user(caller.user_id()).await?;
    Ok(web::Json(user.into()))
}

/// Update the caller's name and/or password.
#[utoipa::path(
    put,
    path = "/api/users/me",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Account no longer exists", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateProfile",
    security(("BearerAuth" = []))
)]
#[put("/users/me")]
pub async fn update_profile(
    caller: AuthenticatedUser,
    state: web::Data<HttpState>,
    payload: web::Json<UpdateProfileRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let body = payload.into_inner();
    let update = ProfileUpdate::try_from_parts(body.name.as_deref(), body.password.as_deref())
        .map_err(map_credentials_validation_error)?;
    let user = state
        .accounts
        .update_profile(caller.user_id(), update)
        .await?;
    Ok(web::Json(user.into()))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::http::header::AUTHORIZATION;
    use actix_web::test as actix_test;
    use serde_json::{Value, json};

    use super::*;
    use crate::inbound::http::test_utils::{
        StaticAuthenticator, bearer, memory_state, state_with_authenticator, test_app,
    };

    #[actix_web::test]
    async fn rename_and_new_password_take_effect() {
        let app = actix_test::init_service(test_app(memory_state())).await;
        let req = actix_test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({"name": "Ada", "email": "ada@example.com", "password": "secret"}))
            .to_request();
        let registered: Value = actix_test::call_and_read_body_json(&app, req).await;
        let token = registered["token"].as_str().expect("token").to_owned();

        let req = actix_test::TestRequest::put()
            .uri("/api/users/me")
            .insert_header((AUTHORIZATION, format!("Bearer {token}")))
            .set_json(json!({"name": "Ada King", "password": "new-secret"}))
            .to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["user"]["name"], json!("Ada King"));

        let req = actix_test::TestRequest::get()
            .uri("/api/users/me")
            .insert_header((AUTHORIZATION, format!("Bearer {token}")))
            .to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["user"]["name"], json!("Ada King"));

        let req = actix_test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({"email": "ada@example.com", "password": "new-secret"}))
            .to_request();
        assert_eq!(
            actix_test::call_service(&app, req).await.status(),
            StatusCode::OK
        );
    }

    #[actix_web::test]
    async fn unknown_caller_is_not_found() {
        let app = actix_test::init_service(test_app(state_with_authenticator(
            StaticAuthenticator::new(),
        )))
        .await;
        let req = actix_test::TestRequest::put()
            .uri("/api/users/me")
            .insert_header(bearer())
            .set_json(json!({"name": "Ghost"}))
            .to_request();

        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
