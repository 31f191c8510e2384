//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod account_query;
mod authenticator;
mod credential_hasher;
mod dashboard_query;
mod record_command;
mod record_query;
mod record_repository;
mod repositories;
mod token_service;
mod user_repository;

#[cfg(test)]
pub use account_command::MockAccountCommand;
pub use account_command::AccountCommand;
#[cfg(test)]
pub use account_query::MockAccountQuery;
pub use account_query::AccountQuery;
pub use authenticator::Authenticator;
#[cfg(test)]
pub use credential_hasher::MockCredentialHasher;
pub use credential_hasher::{CredentialHashError, CredentialHasher};
pub use dashboard_query::{DashboardQuery, DashboardSummary, WeeklySummary};
pub use record_command::RecordCommand;
pub use record_query::RecordQuery;
pub use record_repository::{RecordPersistenceError, RecordRepository};
pub use repositories::Repositories;
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{TokenError, TokenService};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{StoredAccount, UserPersistenceError, UserRepository};
