//! Domain errors as HTTP responses.
//!
//! Every failure is answered with
//! `{success: false, code, message, details?, traceId?}` and, when the
//! request has one, a `trace-id` header. Internal errors are logged and
//! replaced by a generic message before they leave the process.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use serde_json::json;
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Result type returned by handlers.
pub type ApiResult<T> = Result<T, Error>;

#[derive(Serialize)]
struct FailureBody {
    success: bool,
    #[serde(flatten)]
    error: Error,
}

impl From<&Error> for FailureBody {
    fn from(err: &Error) -> Self {
        let error = if err.code() == ErrorCode::InternalError {
            error!(
                message = err.message(),
                trace_id = err.trace_id().map(|id| id.to_string()),
                "internal error"
            );
            err.redacted()
        } else {
            err.clone()
        };
        Self {
            success: false,
            error,
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self.code() {
            ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            response.insert_header((TRACE_ID_HEADER, id.to_string()));
        }
        response.json(FailureBody::from(self))
    }
}

fn rejected_input(message: &str, field: &str, code: &str, reason: String) -> actix_web::Error {
    Error::invalid_request(message)
        .with_details(json!({ "field": field, "code": code, "reason": reason }))
        .into()
}

/// Malformed or oversized JSON bodies.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let (message, code) = match &err {
        JsonPayloadError::ContentType => ("request body must be JSON", "invalid_content_type"),
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            ("request body is too large", "payload_too_large")
        }
        _ => ("request body is not valid JSON", "invalid_json"),
    };
    rejected_input(message, "body", code, err.to_string())
}

/// Path segments that fail to deserialise.
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    rejected_input("invalid path parameter", "path", "invalid_path", err.to_string())
}

/// Query strings that fail to deserialise, e.g. `?page=abc`.
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    rejected_input("invalid query string", "query", "invalid_query", err.to_string())
}
