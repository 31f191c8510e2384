//! Failures reported by the domain to inbound adapters.
//!
//! An [`Error`] is a category ([`ErrorCode`]), a client-safe message, optional
//! structured details and the trace identifier of the request that raised it.
//! Adapters decide how each category maps onto their transport.

use serde::Serialize;
use serde_json::Value;

use crate::domain::TraceId;

/// Failure category, serialised in `snake_case`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Malformed input or a failed validation rule.
    InvalidRequest,
    /// Missing or unverifiable credentials.
    Unauthorized,
    /// The caller does not own the resource.
    Forbidden,
    /// No such resource.
    NotFound,
    /// A backing store could not be reached.
    ServiceUnavailable,
    /// Anything else; never shown to clients verbatim.
    InternalError,
}

impl ErrorCode {
    /// Message used when a caller supplies a blank one.
    pub fn default_message(self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid request",
            Self::Unauthorized => "not authorized",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not found",
            Self::ServiceUnavailable => "service unavailable",
            Self::InternalError => "Internal server error",
        }
    }
}

/// Domain failure.
///
/// The message is never blank and the trace identifier defaults to the one
/// in scope when the error is built.
///
/// # Examples
/// ```
/// use fitlog::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("activity not found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(Error::forbidden("  ").message(), "forbidden");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    message: String,
    trace_id: Option<TraceId>,
    details: Option<Value>,
}

impl Error {
    /// Build an error of category `code`, capturing the ambient trace id.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            code.default_message().to_owned()
        } else {
            message
        };
        Self {
            code,
            message,
            trace_id: TraceId::current(),
            details: None,
        }
    }

    /// Failure category.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Client-facing message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Request the error belongs to, if known.
    pub fn trace_id(&self) -> Option<TraceId> {
        self.trace_id
    }

    /// Structured details, e.g. the offending field.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Replace the trace identifier.
    #[must_use]
    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    /// Attach structured details.
    ///
    /// ```
    /// use fitlog::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::invalid_request("bad").with_details(json!({ "field": "email" }));
    /// assert_eq!(err.details(), Some(&json!({ "field": "email" })));
    /// ```
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Same category and trace id with the default message and no details.
    #[must_use]
    pub fn redacted(&self) -> Self {
        Self {
            code: self.code,
            message: self.code.default_message().to_owned(),
            trace_id: self.trace_id,
            details: None,
        }
    }

    /// [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// [`ErrorCode::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireError<'a> {
    code: ErrorCode,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a Value>,
}

impl Serialize for Error {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        WireError {
            code: self.code,
            message: &self.message,
            trace_id: self.trace_id.map(|id| id.to_string()),
            details: self.details.as_ref(),
        }
        .serialize(serializer)
    }
}
