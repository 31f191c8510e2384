//! Account API handlers: registration, login and the caller's identity.
//!
//! ```text
//! POST /api/auth/register {"name":"Ada","email":"ada@example.com","password":"secret"}
//! POST /api/auth/login {"email":"ada@example.com","password":"secret"}
//! GET /api/auth/me
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AuthSession, LoginCredentials, Registration, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::map_credentials_validation_error;

/// Registration body for `POST /api/auth/register`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    #[schema(example = "correct horse battery staple")]
    pub password: Option<String>,
}

/// Login body for `POST /api/auth/login`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Account and bearer token returned by register and login.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub success: bool,
    #[schema(value_type = UserSchema)]
    pub user: User,
    /// HS256 JWT valid for seven days.
    pub token: String,
}

impl From<AuthSession> for AuthResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            success: true,
            user: session.user,
            token: session.token.into(),
        }
    }
}

/// Envelope around the caller's identity.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub success: bool,
    #[schema(value_type = UserSchema)]
    pub user: User,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            success: true,
            user,
        }
    }
}

fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}

/// Create an account and issue a token.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Missing field or email already registered", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let registration =
        Registration::try_from_parts(text(&body.name), text(&body.email), text(&body.password))
            .map_err(map_credentials_validation_error)?;
    let session = state.accounts.register(registration).await?;
    Ok(HttpResponse::Created().json(AuthResponse::from(session)))
}

/// Verify credentials and issue a token.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = AuthResponse),
        (status = 400, description = "Missing field", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<AuthResponse>> {
    let body = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(text(&body.email), text(&body.password))
        .map_err(map_credentials_validation_error)?;
    let session = state.accounts.login(credentials).await?;
    Ok(web::Json(session.into()))
}

/// Return the caller's identity without credentials.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Caller identity", body = UserResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Account no longer exists", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "me",
    security(("BearerAuth" = []))
)]
#[get("/auth/me")]
pub async fn me(
    caller: AuthenticatedUser,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<UserResponse>> {
    let user = state.account_query.current_user(caller.user_id()).await?;
    Ok(web::Json(user.into()))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::http::header::AUTHORIZATION;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;
    use crate::inbound::http::test_utils::{memory_state, test_app};

    fn ada() -> Value {
        json!({"name": "Ada", "email": "Ada@Example.com", "password": "secret"})
    }

    #[actix_web::test]
    async fn register_then_login_then_me() {
        let app = actix_test::init_service(test_app(memory_state())).await;

        let req = actix_test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(ada())
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let registered: Value = actix_test::read_body_json(res).await;
        assert_eq!(registered["user"]["email"], json!("ada@example.com"));
        assert!(registered["user"].get("password").is_none());

        let req = actix_test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({"email": "ada@example.com", "password": "secret"}))
            .to_request();
        let logged_in: Value = actix_test::call_and_read_body_json(&app, req).await;
        let token = logged_in["token"].as_str().expect("token");

        let req = actix_test::TestRequest::get()
            .uri("/api/auth/me")
            .insert_header((AUTHORIZATION, format!("Bearer {token}")))
            .to_request();
        let me_body: Value = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(me_body["success"], json!(true));
        assert_eq!(me_body["user"]["id"], registered["user"]["id"]);
    }

    #[actix_web::test]
    async fn duplicate_registration_is_rejected() {
        let app = actix_test::init_service(test_app(memory_state())).await;
        let first = actix_test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(ada())
            .to_request();
        assert_eq!(
            actix_test::call_service(&app, first).await.status(),
            StatusCode::CREATED
        );

        let second = actix_test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(ada())
            .to_request();
        let res = actix_test::call_service(&app, second).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["message"], json!("user already exists"));
    }

    #[rstest]
    #[case(json!({"email": "a@b.co", "password": "pw"}), "name")]
    #[case(json!({"name": "Ada", "password": "pw"}), "email")]
    #[case(json!({"name": "Ada", "email": "a@b.co"}), "password")]
    #[actix_web::test]
    async fn register_reports_missing_field(#[case] payload: Value, #[case] field: &str) {
        let app = actix_test::init_service(test_app(memory_state())).await;
        let req = actix_test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(payload)
            .to_request();

        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], json!(field));
    }

    #[actix_web::test]
    async fn register_rejects_email_wider_than_the_column() {
        let app = actix_test::init_service(test_app(memory_state())).await;
        let email = format!("{}@example.com", "a".repeat(400));
        let req = actix_test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({"name": "Ada", "email": email, "password": "secret"}))
            .to_request();

        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], json!("email"));
        assert_eq!(body["message"], json!("email must be at most 320 characters"));
    }

    #[actix_web::test]
    async fn wrong_password_is_unauthorized() {
        let app = actix_test::init_service(test_app(memory_state())).await;
        let req = actix_test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(ada())
            .to_request();
        actix_test::call_service(&app, req).await;

        let req = actix_test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({"email": "ada@example.com", "password": "nope"}))
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["message"], json!("invalid credentials"));
    }
}
