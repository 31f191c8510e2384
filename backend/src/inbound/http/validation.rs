//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request DTOs carry raw optional values; these helpers turn them into
//! validated domain values and turn validation failures into
//! `invalid_request` errors whose `details` name the offending field.

use chrono::{DateTime, Utc};
use pagination::{PageQuery, PageRequest, PageRequestError};
use serde_json::json;
use uuid::Uuid;

use crate::domain::records::{
    ClockTime, Label, Notes, Quantity, RecordId, RecordValidationError, parse_record_date,
};
use crate::domain::{CredentialsValidationError, Error};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUuid,
    InvalidPage,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidPage => "invalid_page",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

fn field_error(message: impl Into<String>, field: &str, code: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code,
    }))
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} must be a valid UUID")).with_details(json!({
        "field": field,
        "value": value,
        "code": ErrorCode::InvalidUuid.as_str(),
    }))
}

/// Parse a record id taken from the request path.
pub(crate) fn parse_record_id(value: &str) -> Result<RecordId, Error> {
    Uuid::parse_str(value)
        .map(RecordId::from_uuid)
        .map_err(|_| invalid_uuid_error(FieldName::new("id"), value))
}

/// Validate optional `?page=&limit=` parameters.
pub(crate) fn page_request(query: PageQuery) -> Result<Option<PageRequest>, Error> {
    query.into_request().map_err(|err| {
        let field = match err {
            PageRequestError::PageOutOfRange => "page",
            PageRequestError::LimitOutOfRange { .. } => "limit",
        };
        field_error(err.to_string(), field, ErrorCode::InvalidPage.as_str())
    })
}

/// Map a record field failure to `invalid_request`.
pub(crate) fn map_record_validation_error(err: RecordValidationError) -> Error {
    field_error(err.to_string(), err.field(), err.reason())
}

/// Map an account payload failure to `invalid_request`.
pub(crate) fn map_credentials_validation_error(err: CredentialsValidationError) -> Error {
    let code = match err {
        CredentialsValidationError::EmptyName
        | CredentialsValidationError::EmptyEmail
        | CredentialsValidationError::EmptyPassword => ErrorCode::MissingField.as_str(),
        CredentialsValidationError::Identity(_) => "invalid_value",
    };
    field_error(err.to_string(), err.field(), code)
}

pub(crate) fn required<T>(field: &'static str, value: Option<T>) -> Result<T, RecordValidationError> {
    value.ok_or(RecordValidationError::Missing { field })
}

pub(crate) fn label(
    field: &'static str,
    value: Option<String>,
) -> Result<Option<Label>, RecordValidationError> {
    value.map(|raw| Label::new(field, &raw)).transpose()
}

pub(crate) fn quantity(
    field: &'static str,
    value: Option<f64>,
) -> Result<Option<Quantity>, RecordValidationError> {
    value.map(|raw| Quantity::new(field, raw)).transpose()
}

pub(crate) fn notes(
    field: &'static str,
    value: Option<String>,
) -> Result<Option<Notes>, RecordValidationError> {
    match value {
        Some(raw) => Notes::parse(field, &raw),
        None => Ok(None),
    }
}

pub(crate) fn date(
    field: &'static str,
    value: Option<String>,
) -> Result<Option<DateTime<Utc>>, RecordValidationError> {
    value.map(|raw| parse_record_date(field, &raw)).transpose()
}

pub(crate) fn clock_time(
    field: &'static str,
    value: Option<String>,
) -> Result<Option<ClockTime>, RecordValidationError> {
    value.map(|raw| ClockTime::parse(field, &raw)).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode as DomainCode;
    use rstest::rstest;
    use serde_json::Value;

    fn detail<'a>(err: &'a Error, key: &str) -> Option<&'a str> {
        err.details().and_then(|d| d.get(key)).and_then(Value::as_str)
    }

    #[rstest]
    fn record_id_rejects_non_uuid() {
        let err = parse_record_id("42").expect_err("not a uuid");
        assert_eq!(err.code(), DomainCode::InvalidRequest);
        assert_eq!(detail(&err, "field"), Some("id"));
        assert_eq!(detail(&err, "code"), Some("invalid_uuid"));
    }

    #[rstest]
    #[case(PageQuery { page: Some(0), limit: None }, "page")]
    #[case(PageQuery { page: None, limit: Some(101) }, "limit")]
    fn page_errors_name_the_parameter(#[case] query: PageQuery, #[case] field: &str) {
        let err = page_request(query).expect_err("out of range");
        assert_eq!(detail(&err, "field"), Some(field));
    }

    #[rstest]
    fn absent_page_parameters_mean_no_paging() {
        assert_eq!(page_request(PageQuery::default()).expect("valid"), None);
    }

    #[rstest]
    fn record_errors_carry_field_and_reason() {
        let err = map_record_validation_error(
            quantity("durationMinutes", Some(-1.0)).expect_err("negative"),
        );
        assert_eq!(detail(&err, "field"), Some("durationMinutes"));
        assert_eq!(detail(&err, "code"), Some("invalid_number"));
    }

    #[rstest]
    fn missing_credentials_are_reported_as_missing_fields() {
        let err = map_credentials_validation_error(CredentialsValidationError::EmptyEmail);
        assert_eq!(err.message(), "email is required");
        assert_eq!(detail(&err, "code"), Some("missing_field"));
    }

    #[rstest]
    fn blank_notes_are_dropped() {
        assert_eq!(notes("notes", Some("   ".into())).expect("valid"), None);
    }
}
