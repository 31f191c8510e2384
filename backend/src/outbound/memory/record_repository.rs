//! In-memory `RecordRepository` for any record type.

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::PageRequest;

use crate::domain::UserId;
use crate::domain::ports::{RecordPersistenceError, RecordRepository};
use crate::domain::records::{OwnedRecord, Record, RecordId, sort_newest_first};

fn poisoned() -> RecordPersistenceError {
    RecordPersistenceError::query("record store lock poisoned")
}

/// Record storage for one record type.
#[derive(Debug)]
pub struct MemoryRecordRepository<R: OwnedRecord> {
    records: RwLock<Vec<Record<R>>>,
}

impl<R: OwnedRecord> Default for MemoryRecordRepository<R> {
    fn default() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }
}

impl<R: OwnedRecord> MemoryRecordRepository<R> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn owned_by(
        &self,
        owner: &UserId,
        keep: impl Fn(&Record<R>) -> bool,
    ) -> Result<Vec<Record<R>>, RecordPersistenceError> {
        let records = self.records.read().map_err(|_| poisoned())?;
        let mut owned: Vec<_> = records
            .iter()
            .filter(|record| record.is_owned_by(owner) && keep(record))
            .cloned()
            .collect();
        sort_newest_first(&mut owned);
        Ok(owned)
    }
}

#[async_trait]
impl<R: OwnedRecord> RecordRepository<R> for MemoryRecordRepository<R> {
    async fn insert(&self, record: &Record<R>) -> Result<(), RecordPersistenceError> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        records.push(record.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: RecordId) -> Result<Option<Record<R>>, RecordPersistenceError> {
        let records = self.records.read().map_err(|_| poisoned())?;
        Ok(records.iter().find(|record| record.id() == id).cloned())
    }

    async fn list_for_owner(
        &self,
        owner: &UserId,
        page: Option<PageRequest>,
    ) -> Result<Vec<Record<R>>, RecordPersistenceError> {
        let owned = self.owned_by(owner, |_| true)?;
        Ok(match page {
            Some(page) => page.apply(owned),
            None => owned,
        })
    }

    async fn list_between(
        &self,
        owner: &UserId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Record<R>>, RecordPersistenceError> {
        self.owned_by(owner, |record| (from..=to).contains(&record.sort_key()))
    }

    async fn count_for_owner(&self, owner: &UserId) -> Result<u64, RecordPersistenceError> {
        let records = self.records.read().map_err(|_| poisoned())?;
        let count = records.iter().filter(|record| record.is_owned_by(owner)).count();
        u64::try_from(count).map_err(|_| RecordPersistenceError::query("record count overflow"))
    }

    async fn update(&self, record: &Record<R>) -> Result<bool, RecordPersistenceError> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        match records.iter_mut().find(|stored| stored.id() == record.id()) {
            Some(stored) => {
                *stored = record.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: RecordId) -> Result<bool, RecordPersistenceError> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        let before = records.len();
        records.retain(|record| record.id() != id);
        Ok(records.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::rstest;

    use super::*;
    use crate::domain::records::{Goal, GoalDraft, Label};

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn goal(owner: &UserId, day: u32) -> Record<Goal> {
        let draft = GoalDraft::new(Label::new("title", "run more").expect("label"));
        Record::create(RecordId::random(), owner.clone(), draft, at(day))
    }

    #[rstest]
    #[tokio::test]
    async fn lists_are_scoped_paged_and_newest_first() {
        let repo = MemoryRecordRepository::new();
        let me = UserId::random();
        let other = UserId::random();
        for day in 1..=5 {
            repo.insert(&goal(&me, day)).await.expect("insert");
        }
        repo.insert(&goal(&other, 9)).await.expect("insert");

        let all = repo.list_for_owner(&me, None).await.expect("list");
        let page = repo
            .list_for_owner(&me, Some(PageRequest::new(2, 2).expect("valid page")))
            .await
            .expect("page");

        assert_eq!(all.len(), 5);
        assert_eq!(all[0].created_at(), at(5));
        assert_eq!(
            page.iter().map(Record::created_at).collect::<Vec<_>>(),
            vec![at(3), at(2)]
        );
        assert_eq!(repo.count_for_owner(&other).await.expect("count"), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn window_includes_both_bounds_and_nothing_outside() {
        let repo = MemoryRecordRepository::new();
        let me = UserId::random();
        for day in 1..=9 {
            repo.insert(&goal(&me, day)).await.expect("insert");
        }

        let window = repo.list_between(&me, at(3), at(6)).await.expect("window");

        assert_eq!(
            window.iter().map(Record::created_at).collect::<Vec<_>>(),
            vec![at(6), at(5), at(4), at(3)]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn delete_reports_whether_anything_was_removed() {
        let repo = MemoryRecordRepository::new();
        let me = UserId::random();
        let record = goal(&me, 1);
        repo.insert(&record).await.expect("insert");

        assert!(repo.delete(record.id()).await.expect("delete"));
        assert!(!repo.delete(record.id()).await.expect("second delete"));
    }
}
