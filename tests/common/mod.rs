//! Shared test utilities.

#![allow(dead_code, unused_imports)]

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tokio::sync::mpsc;

use tallybook::container::{ContainerState, LoadedView, RecordStateContainer};
use tallybook::record::FinanceRecord;
use tallybook::service::RecordService;
use tallybook::store::InMemoryRecordStore;

/// Unpersisted record with an amount given in cents.
pub fn record(title: &str, cents: i64, is_expense: bool) -> FinanceRecord {
    FinanceRecord::new(title, Decimal::new(cents, 2), is_expense)
}

/// Noon UTC on the given `YYYY-MM-DD` day.
pub fn on_day(day: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(&format!("{day}T12:00:00Z"))
        .expect("valid test timestamp")
        .with_timezone(&Utc)
}

/// A container over an in-memory store seeded with `records`. The store is
/// returned too so tests can poison it or inspect it directly.
pub fn seeded(records: Vec<FinanceRecord>) -> (Arc<InMemoryRecordStore>, RecordStateContainer) {
    let store = Arc::new(InMemoryRecordStore::with_records(records));
    let container = RecordStateContainer::new(RecordService::new(store.clone()));
    (store, container)
}

/// Collect every emission currently sitting in the stream.
pub fn drain(receiver: &mut mpsc::UnboundedReceiver<ContainerState>) -> Vec<ContainerState> {
    let mut emissions = Vec::new();
    while let Ok(state) = receiver.try_recv() {
        emissions.push(state);
    }
    emissions
}

/// The loaded view carried by a state, or a panic with context.
pub fn loaded_view(state: &ContainerState) -> &LoadedView {
    state
        .as_loaded()
        .unwrap_or_else(|| panic!("expected Loaded, got {state:?}"))
}
