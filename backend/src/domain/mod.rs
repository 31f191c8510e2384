//! Domain primitives, services and ports.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers, and the services that implement the driving ports.
//! Keep types free of transport concerns and document invariants and
//! serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - User (alias to `user::User`): account identity without credentials.
//! - records: activity, nutrition, sleep and goal records and their owner.
//! - AccountService, RecordService, DashboardService: driving port
//!   implementations.

pub mod account_service;
pub mod auth;
pub mod dashboard_service;
pub mod error;
pub mod ownership;
pub mod ports;
pub mod record_service;
pub mod records;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{
    AccessToken, AuthSession, CredentialsValidationError, LoginCredentials, PasswordDigest,
    ProfileUpdate, Registration, TOKEN_TTL,
};
pub use self::dashboard_service::DashboardService;
pub use self::error::{Error, ErrorCode};
pub use self::ownership::load_owned;
pub use self::record_service::RecordService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{EmailAddress, PersonName, User, UserId, UserValidationError};
