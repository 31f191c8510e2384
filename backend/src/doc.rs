//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the REST API. It registers:
//!
//! - **Paths**: every `/api` endpoint plus the health probes
//! - **Schemas**: domain type wrappers from
//!   [`crate::inbound::http::schemas`] and the request/response envelopes
//! - **Security**: HTTP bearer (JWT) authentication scheme
//!
//! The generated document is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::accounts::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};
use crate::inbound::http::activities::{ActivityListResponse, ActivityRequest, ActivityResponse};
use crate::inbound::http::dashboard::DashboardResponse;
use crate::inbound::http::goals::{GoalListResponse, GoalRequest, GoalResponse};
use crate::inbound::http::health::{HealthBody, Phase, ProbeBody};
use crate::inbound::http::nutrition::{NutritionListResponse, NutritionRequest, NutritionResponse};
use crate::inbound::http::records::RemovedResponse;
use crate::inbound::http::schemas::{
    ActivitySchema, DashboardSummarySchema, ErrorCodeSchema, ErrorSchema, GoalSchema,
    NutritionSchema, SleepSchema, UserSchema, WeeklySummarySchema,
};
use crate::inbound::http::sleep::{SleepListResponse, SleepRequest, SleepResponse};
use crate::inbound::http::users::UpdateProfileRequest;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the bearer security scheme referenced by protected paths.
pub const BEARER_SCHEME: &str = "BearerAuth";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some(
                        "Token issued by POST /api/auth/register or POST /api/auth/login.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "fitlog API",
        description = "Self-tracking of activities, meals, sleep and goals for bearer-authenticated users."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::me,
        crate::inbound::http::users::get_profile,
        crate::inbound::http::users::update_profile,
        crate::inbound::http::activities::list_activities,
        crate::inbound::http::activities::create_activity,
        crate::inbound::http::activities::update_activity,
        crate::inbound::http::activities::delete_activity,
        crate::inbound::http::nutrition::list_nutrition,
        crate::inbound::http::nutrition::create_nutrition,
        crate::inbound::http::nutrition::update_nutrition,
        crate::inbound::http::nutrition::delete_nutrition,
        crate::inbound::http::sleep::list_sleep,
        crate::inbound::http::sleep::create_sleep,
        crate::inbound::http::goals::list_goals,
        crate::inbound::http::goals::create_goal,
        crate::inbound::http::dashboard::dashboard,
        crate::inbound::http::health::health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        UserSchema,
        ActivitySchema,
        NutritionSchema,
        SleepSchema,
        GoalSchema,
        WeeklySummarySchema,
        DashboardSummarySchema,
        RegisterRequest,
        LoginRequest,
        AuthResponse,
        UserResponse,
        UpdateProfileRequest,
        ActivityRequest,
        ActivityResponse,
        ActivityListResponse,
        NutritionRequest,
        NutritionResponse,
        NutritionListResponse,
        SleepRequest,
        SleepResponse,
        SleepListResponse,
        GoalRequest,
        GoalResponse,
        GoalListResponse,
        DashboardResponse,
        RemovedResponse,
        HealthBody,
        ProbeBody,
        Phase,
    )),
    tags(
        (name = "auth", description = "Registration, login and token identity"),
        (name = "users", description = "The caller's profile"),
        (name = "activities", description = "Workout sessions"),
        (name = "nutrition", description = "Meals and macronutrients"),
        (name = "sleep", description = "Nightly sleep logs"),
        (name = "goals", description = "Personal targets"),
        (name = "dashboard", description = "Aggregated summary"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
