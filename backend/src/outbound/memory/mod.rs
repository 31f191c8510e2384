//! In-process adapters for running without PostgreSQL.
//!
//! State lives behind `RwLock`s and disappears with the process. A poisoned
//! lock surfaces as a query error rather than a panic.

mod record_repository;
mod user_repository;

use std::sync::Arc;

use crate::domain::ports::Repositories;

pub use record_repository::MemoryRecordRepository;
pub use user_repository::MemoryUserRepository;

/// Fresh, empty in-memory stores for every port.
pub fn memory_repositories() -> Repositories {
    Repositories {
        users: Arc::new(MemoryUserRepository::new()),
        activities: Arc::new(MemoryRecordRepository::new()),
        nutrition: Arc::new(MemoryRecordRepository::new()),
        sleep: Arc::new(MemoryRecordRepository::new()),
        goals: Arc::new(MemoryRecordRepository::new()),
    }
}
