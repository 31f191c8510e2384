//! Process health probes.
//!
//! ```text
//! GET /health        {"ok":true,"ts":1704067200000}
//! GET /health/ready  200 once the store answers, 503 before and while draining
//! GET /health/live   200 until shutdown begins
//! ```
//!
//! Probe responses are never cached.

use std::sync::atomic::{AtomicU8, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

/// Lifecycle phase reported by the probes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Phase {
    /// Listening, but the store has not answered yet.
    Starting = 0,
    /// Serving traffic.
    Ready = 1,
    /// Shutting down.
    Draining = 2,
}

impl Phase {
    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Starting,
            1 => Self::Ready,
            _ => Self::Draining,
        }
    }
}

/// Shared lifecycle state. Phases only move forward.
#[derive(Debug, Default)]
pub struct HealthState {
    phase: AtomicU8,
}

impl HealthState {
    /// State in [`Phase::Starting`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        Phase::from_u8(self.phase.load(Ordering::Acquire))
    }

    /// Move to [`Phase::Ready`] unless already draining.
    pub fn mark_ready(&self) {
        self.phase.fetch_max(Phase::Ready as u8, Ordering::AcqRel);
    }

    /// Move to [`Phase::Draining`]; both probes fail from here on.
    pub fn mark_unhealthy(&self) {
        self.phase.fetch_max(Phase::Draining as u8, Ordering::AcqRel);
    }

    /// Whether the readiness probe passes.
    pub fn is_ready(&self) -> bool {
        self.phase() == Phase::Ready
    }

    /// Whether the liveness probe passes.
    pub fn is_alive(&self) -> bool {
        self.phase() != Phase::Draining
    }
}

/// Body of the plain `/health` probe.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthBody {
    #[schema(example = true)]
    pub ok: bool,
    /// Server time in milliseconds since the Unix epoch.
    #[schema(example = 1_704_067_200_000_i64)]
    pub ts: i64,
}

/// Body of the readiness and liveness probes.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProbeBody {
    pub ok: bool,
    pub phase: Phase,
}

fn probe(passing: bool, phase: Phase) -> HttpResponse {
    let mut response = if passing {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    response
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(ProbeBody { ok: passing, phase })
}

/// Plain check reporting the server clock.
#[utoipa::path(
    get,
    path = "/health",
    tags = ["health"],
    security([]),
    responses((status = 200, description = "Server is up", body = HealthBody))
)]
#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(HealthBody {
            ok: true,
            ts: Utc::now().timestamp_millis(),
        })
}

/// Readiness probe.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Serving traffic", body = ProbeBody),
        (status = 503, description = "Store not reachable yet, or draining", body = ProbeBody)
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    probe(state.is_ready(), state.phase())
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Process is alive", body = ProbeBody),
        (status = 503, description = "Shutting down", body = ProbeBody)
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    probe(state.is_alive(), state.phase())
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::{fixture, rstest};
    use serde_json::{Value, json};

    use super::*;

    #[fixture]
    fn health_state() -> web::Data<HealthState> {
        web::Data::new(HealthState::new())
    }

    async fn get(state: web::Data<HealthState>, uri: &str) -> (StatusCode, Option<String>, Value) {
        let app = actix_test::init_service(
            App::new()
                .app_data(state)
                .service(ready)
                .service(live)
                .service(health),
        )
        .await;
        let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
            .await;
        let status = res.status();
        let cache = res
            .headers()
            .get(header::CACHE_CONTROL)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body: Value = actix_test::read_body_json(res).await;
        (status, cache, body)
    }

    #[rstest]
    fn phases_only_move_forward(health_state: web::Data<HealthState>) {
        assert_eq!(health_state.phase(), Phase::Starting);
        health_state.mark_ready();
        assert_eq!(health_state.phase(), Phase::Ready);
        health_state.mark_unhealthy();
        health_state.mark_ready();
        assert_eq!(health_state.phase(), Phase::Draining);
    }

    #[rstest]
    #[actix_web::test]
    async fn readiness_waits_for_the_store(health_state: web::Data<HealthState>) {
        let (status, cache, body) = get(health_state.clone(), "/health/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(cache.as_deref(), Some("no-store"));
        assert_eq!(body, json!({ "ok": false, "phase": "starting" }));

        health_state.mark_ready();
        let (status, _, body) = get(health_state, "/health/ready").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["phase"], json!("ready"));
    }

    #[rstest]
    #[actix_web::test]
    async fn draining_fails_both_probes(health_state: web::Data<HealthState>) {
        let (status, _, _) = get(health_state.clone(), "/health/live").await;
        assert_eq!(status, StatusCode::OK);

        health_state.mark_ready();
        health_state.mark_unhealthy();
        for uri in ["/health/live", "/health/ready"] {
            let (status, _, body) = get(health_state.clone(), uri).await;
            assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE, "{uri}");
            assert_eq!(body["phase"], json!("draining"), "{uri}");
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn plain_health_reports_ok_and_timestamp(health_state: web::Data<HealthState>) {
        let before = Utc::now().timestamp_millis();

        let (status, _, body) = get(health_state, "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], Value::Bool(true));
        assert!(body["ts"].as_i64().is_some_and(|ts| ts >= before));
    }
}
