//! Business rules and validation for finance records.
//!
//! [`RecordService`] is the only component that talks to the store, and the
//! only place raw [`StoreError`]s are translated into the typed
//! [`RecordError`] taxonomy. The calculation helpers at the bottom are pure
//! and never touch storage.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::error::RecordError;
use crate::record::{max_amount, BalanceIndicator, FinanceRecord, Summary, MAX_TITLE_LEN};
use crate::store::{RecordStore, StoreError};

// Service is the translation boundary: store failures become the typed
// storage/unknown error kinds and never escape raw.
impl From<StoreError> for RecordError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UnknownId(id) => {
                RecordError::storage(format!("No stored record with id {id}"), None)
            }
            StoreError::Corrupt(details) => {
                RecordError::storage("Stored data could not be read", Some(details))
            }
            StoreError::Engine(source) => {
                RecordError::storage("The record store failed", Some(source.to_string()))
            }
            StoreError::Io(source) => {
                RecordError::storage("The record store is unavailable", Some(source.to_string()))
            }
            StoreError::Unavailable(details) => {
                RecordError::storage("The record store is unavailable", Some(details))
            }
            StoreError::Other(details) => {
                RecordError::unknown("Something unexpected went wrong", Some(details))
            }
        }
    }
}

#[derive(Clone)]
pub struct RecordService {
    store: Arc<dyn RecordStore>,
}

impl RecordService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// All persisted records, in store iteration order.
    ///
    /// Individual records whose stored form violates the basic invariants
    /// (empty title, negative amount) are dropped defensively; store
    /// failures propagate as errors.
    pub async fn list_all(&self) -> Result<Vec<FinanceRecord>, RecordError> {
        let records = self.store.list_all().await?;
        let total = records.len();
        let records: Vec<FinanceRecord> = records
            .into_iter()
            .filter(|record| !record.title.trim().is_empty() && record.amount >= Decimal::ZERO)
            .collect();
        if records.len() < total {
            tracing::warn!(
                dropped = total - records.len(),
                "skipped malformed stored records"
            );
        }
        Ok(records)
    }

    /// Validate and persist a new record timestamped now.
    pub async fn add(
        &self,
        title: &str,
        amount: Decimal,
        is_expense: bool,
    ) -> Result<FinanceRecord, RecordError> {
        validated(field_problems(title, amount))?;
        let record = FinanceRecord::new(title.trim(), amount, is_expense);
        let stored = self.store.add(record).await?;
        tracing::info!(id = ?stored.id, "record added");
        Ok(stored)
    }

    /// Replace the stored record under `record.id` with the given values.
    pub async fn update(&self, record: FinanceRecord) -> Result<(), RecordError> {
        let id = record
            .id
            .ok_or_else(|| RecordError::validation("Record has never been saved"))?;
        validated(field_problems(&record.title, record.amount))?;
        let mut next = record;
        next.title = next.title.trim().to_string();
        self.store.update(id, next).await?;
        tracing::info!(id, "record updated");
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), RecordError> {
        if id < 0 {
            return Err(RecordError::validation("Record id must not be negative"));
        }
        self.store.delete(id).await?;
        tracing::info!(id, "record deleted");
        Ok(())
    }

    /// Delete every record. Irreversible.
    pub async fn clear_all(&self) -> Result<(), RecordError> {
        self.store.clear().await?;
        tracing::info!("all records cleared");
        Ok(())
    }
}

fn field_problems(title: &str, amount: Decimal) -> Vec<String> {
    let mut problems = Vec::new();
    let title = title.trim();
    if title.is_empty() {
        problems.push("Title must not be empty".to_string());
    } else if title.chars().count() > MAX_TITLE_LEN {
        problems.push(format!("Title must be at most {MAX_TITLE_LEN} characters"));
    }
    if amount <= Decimal::ZERO {
        problems.push("Amount must be greater than zero".to_string());
    } else if amount > max_amount() {
        problems.push(format!("Amount must not exceed {}", max_amount()));
    }
    problems
}

// Violations are reported together, not fail-fast, so a caller can surface
// every problem in one pass.
fn validated(problems: Vec<String>) -> Result<(), RecordError> {
    if problems.is_empty() {
        Ok(())
    } else {
        Err(RecordError::validation(problems.join("; ")))
    }
}

/// Net balance: inflows minus outflows. Empty input yields zero.
pub fn calculate_balance(records: &[FinanceRecord]) -> Decimal {
    records.iter().fold(Decimal::ZERO, |acc, record| {
        if record.is_expense {
            acc - record.amount
        } else {
            acc + record.amount
        }
    })
}

/// Aggregate income, expenses and balance over `records`.
///
/// Records with negative amounts are skipped; stored data is not trusted
/// even though validation should have excluded them.
pub fn summarize(records: &[FinanceRecord]) -> Summary {
    let mut summary = Summary::default();
    for record in records {
        if record.amount < Decimal::ZERO {
            continue;
        }
        if record.is_expense {
            summary.expenses += record.amount;
        } else {
            summary.income += record.amount;
        }
    }
    summary.balance = summary.income - summary.expenses;
    summary
}

/// The subset of `records` matching the given direction.
pub fn filter_by_type(records: &[FinanceRecord], is_expense: bool) -> Vec<FinanceRecord> {
    records
        .iter()
        .filter(|record| record.is_expense == is_expense)
        .cloned()
        .collect()
}

/// Records whose timestamp falls within the last `days` days.
pub fn recent_within_days(
    records: &[FinanceRecord],
    days: i64,
) -> Result<Vec<FinanceRecord>, RecordError> {
    if days <= 0 {
        return Err(RecordError::validation(
            "Day count must be greater than zero",
        ));
    }
    let cutoff = chrono::Utc::now() - chrono::Duration::days(days);
    Ok(records
        .iter()
        .filter(|record| record.occurred_at >= cutoff)
        .cloned()
        .collect())
}

/// Classify a balance: strictly positive, exactly zero, or negative.
pub fn balance_indicator(balance: Decimal) -> BalanceIndicator {
    if balance > Decimal::ZERO {
        BalanceIndicator::Positive
    } else if balance < Decimal::ZERO {
        BalanceIndicator::Negative
    } else {
        BalanceIndicator::Neutral
    }
}
