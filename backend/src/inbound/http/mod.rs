//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod accounts;
pub mod activities;
pub mod auth;
pub mod dashboard;
pub mod error;
pub mod goals;
pub mod health;
pub mod nutrition;
pub mod records;
pub mod schemas;
pub mod sleep;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

/// Register the `/api` scope and its extractor error handlers.
///
/// Callers provide [`state::HttpState`] as `web::Data` and wrap the app in
/// [`crate::Trace`] so errors carry a trace id.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use fitlog::inbound::http::configure_api;
///
/// let app = App::new().configure(configure_api);
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::PathConfig::default().error_handler(error::path_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .service(
            web::scope("/api")
                .service(accounts::register)
                .service(accounts::login)
                .service(accounts::me)
                .service(users::get_profile)
                .service(users::update_profile)
                .service(activities::list_activities)
                .service(activities::create_activity)
                .service(activities::update_activity)
                .service(activities::delete_activity)
                .service(nutrition::list_nutrition)
                .service(nutrition::create_nutrition)
                .service(nutrition::update_nutrition)
                .service(nutrition::delete_nutrition)
                .service(sleep::list_sleep)
                .service(sleep::create_sleep)
                .service(goals::list_goals)
                .service(goals::create_goal)
                .service(dashboard::dashboard),
        );
}
