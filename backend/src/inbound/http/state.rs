//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    AccountCommand, AccountQuery, Authenticator, CredentialHasher, DashboardQuery, RecordCommand,
    RecordQuery, RecordRepository, Repositories, TokenService,
};
use crate::domain::records::{Activity, Goal, Nutrition, OwnedRecord, Sleep};
use crate::domain::{AccountService, DashboardService, RecordService};

/// Command and query ports for one record type.
pub struct RecordPorts<R: OwnedRecord> {
    pub command: Arc<dyn RecordCommand<R>>,
    pub query: Arc<dyn RecordQuery<R>>,
}

impl<R: OwnedRecord> Clone for RecordPorts<R> {
    fn clone(&self) -> Self {
        Self {
            command: Arc::clone(&self.command),
            query: Arc::clone(&self.query),
        }
    }
}

impl<R: OwnedRecord> RecordPorts<R> {
    /// Expose one service through both ports.
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: RecordCommand<R> + RecordQuery<R> + 'static,
    {
        Self {
            command: service.clone(),
            query: service,
        }
    }
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountCommand>,
    pub account_query: Arc<dyn AccountQuery>,
    pub authenticator: Arc<dyn Authenticator>,
    pub activities: RecordPorts<Activity>,
    pub nutrition: RecordPorts<Nutrition>,
    pub sleep: RecordPorts<Sleep>,
    pub goals: RecordPorts<Goal>,
    pub dashboard: Arc<dyn DashboardQuery>,
}

fn record_ports<R: OwnedRecord>(
    repo: Arc<dyn RecordRepository<R>>,
    clock: &Arc<dyn Clock>,
) -> RecordPorts<R> {
    RecordPorts::from_service(Arc::new(RecordService::new(repo, Arc::clone(clock))))
}

impl HttpState {
    /// Assemble the domain services over a set of repositories.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use fitlog::inbound::http::state::HttpState;
    /// use fitlog::outbound::memory::memory_repositories;
    /// use fitlog::outbound::security::{Argon2CredentialHasher, JwtTokenService};
    /// use mockable::DefaultClock;
    ///
    /// let state = HttpState::from_repositories(
    ///     memory_repositories(),
    ///     Arc::new(JwtTokenService::new(b"0123456789abcdef0123456789abcdef")),
    ///     Arc::new(Argon2CredentialHasher::new()),
    ///     Arc::new(DefaultClock),
    /// );
    /// let _accounts = state.accounts.clone();
    /// ```
    pub fn from_repositories(
        repos: Repositories,
        tokens: Arc<dyn TokenService>,
        hasher: Arc<dyn CredentialHasher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let Repositories {
            users,
            activities,
            nutrition,
            sleep,
            goals,
        } = repos;
        let accounts = Arc::new(AccountService::new(users, hasher, tokens, Arc::clone(&clock)));
        let dashboard = Arc::new(DashboardService::new(
            Arc::clone(&activities),
            Arc::clone(&nutrition),
            Arc::clone(&sleep),
            Arc::clone(&clock),
        ));

        Self {
            accounts: accounts.clone(),
            account_query: accounts.clone(),
            authenticator: accounts,
            activities: record_ports(activities, &clock),
            nutrition: record_ports(nutrition, &clock),
            sleep: record_ports(sleep, &clock),
            goals: record_ports(goals, &clock),
            dashboard,
        }
    }
}
