//! In-memory record store.
//!
//! Ephemeral storage with the same contract as the SQLite engine. Doubles
//! as the test fake: `poison` makes the next operation fail with a chosen
//! error, which is how the container's failure paths are exercised.

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::record::FinanceRecord;

use super::{RecordStore, StoreError};

#[derive(Default)]
pub struct InMemoryRecordStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    records: BTreeMap<i64, FinanceRecord>,
    next_id: i64,
    fail_next: Option<StoreError>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-seeded with `records`, assigning ids to any that
    /// lack one.
    pub fn with_records(records: Vec<FinanceRecord>) -> Self {
        let store = Self::new();
        {
            let mut inner = store.inner.lock();
            for mut record in records {
                let id = match record.id {
                    Some(id) => id,
                    None => {
                        inner.next_id += 1;
                        inner.next_id
                    }
                };
                inner.next_id = inner.next_id.max(id);
                record.id = Some(id);
                inner.records.insert(id, record);
            }
        }
        store
    }

    /// Make the next store operation fail with `err`, then recover.
    pub fn poison(&self, err: StoreError) {
        self.inner.lock().fail_next = Some(err);
    }

    pub fn len(&self) -> usize {
        self.inner.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().records.is_empty()
    }
}

impl Inner {
    fn take_failure(&mut self) -> Result<(), StoreError> {
        match self.fail_next.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn list_all(&self) -> Result<Vec<FinanceRecord>, StoreError> {
        let mut inner = self.inner.lock();
        inner.take_failure()?;
        Ok(inner.records.values().cloned().collect())
    }

    async fn add(&self, record: FinanceRecord) -> Result<FinanceRecord, StoreError> {
        let mut inner = self.inner.lock();
        inner.take_failure()?;
        inner.next_id += 1;
        let id = inner.next_id;
        let mut stored = record;
        stored.id = Some(id);
        inner.records.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: i64, record: FinanceRecord) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        inner.take_failure()?;
        if !inner.records.contains_key(&id) {
            return Err(StoreError::UnknownId(id));
        }
        let mut stored = record;
        stored.id = Some(id);
        inner.records.insert(id, stored);
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        inner.take_failure()?;
        if inner.records.remove(&id).is_none() {
            return Err(StoreError::UnknownId(id));
        }
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        inner.take_failure()?;
        inner.records.clear();
        Ok(())
    }
}
