//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of the account and record
//! repository ports backed by PostgreSQL via Diesel with async support through
//! `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: Repository implementations only translate between
//!   Diesel rows and domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: All database errors are mapped to the port
//!   error types.
//!
//! # Example
//!
//! ```ignore
//! use fitlog::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/fitlog")).await?;
//! let users = DieselUserRepository::new(pool);
//! ```

mod diesel_record_repositories;
mod diesel_user_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

use std::sync::Arc;

use crate::domain::ports::Repositories;

pub use diesel_record_repositories::{
    DieselActivityRepository, DieselGoalRepository, DieselNutritionRepository,
    DieselSleepRepository,
};
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};

/// Diesel-backed stores for every port, sharing one pool.
pub fn diesel_repositories(pool: &DbPool) -> Repositories {
    Repositories {
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        activities: Arc::new(DieselActivityRepository::new(pool.clone())),
        nutrition: Arc::new(DieselNutritionRepository::new(pool.clone())),
        sleep: Arc::new(DieselSleepRepository::new(pool.clone())),
        goals: Arc::new(DieselGoalRepository::new(pool.clone())),
    }
}
