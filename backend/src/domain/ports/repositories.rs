//! Bundle of the storage ports one deployment is wired against.

use std::sync::Arc;

use crate::domain::records::{Activity, Goal, Nutrition, Sleep};

use super::{RecordRepository, UserRepository};

/// Storage ports for accounts and every record type.
///
/// Adapters provide constructors for their own backing store; services are
/// assembled from whichever bundle the server selects.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub activities: Arc<dyn RecordRepository<Activity>>,
    pub nutrition: Arc<dyn RecordRepository<Nutrition>>,
    pub sleep: Arc<dyn RecordRepository<Sleep>>,
    pub goals: Arc<dyn RecordRepository<Goal>>,
}
