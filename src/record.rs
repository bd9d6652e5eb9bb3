//! Core domain types for income/expense records.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Maximum title length, in characters, after trimming.
pub const MAX_TITLE_LEN: usize = 100;

/// Largest amount a single record may carry: 999,999,999.99.
pub fn max_amount() -> Decimal {
    Decimal::new(99_999_999_999, 2)
}

/// One income or expense entry.
///
/// A record with `id == None` has never been persisted; the store assigns
/// the id on first insert and it stays stable for the record's lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceRecord {
    pub id: Option<i64>,
    pub title: String,
    pub amount: Decimal,
    pub occurred_at: DateTime<Utc>,
    /// `true` = outflow (subtracted from balance), `false` = inflow.
    pub is_expense: bool,
}

impl FinanceRecord {
    /// Create an unpersisted record timestamped now.
    pub fn new(title: impl Into<String>, amount: Decimal, is_expense: bool) -> Self {
        Self {
            id: None,
            title: title.into(),
            amount,
            occurred_at: Utc::now(),
            is_expense,
        }
    }

    /// Replace the timestamp, e.g. when backfilling older entries.
    pub fn with_occurred_at(mut self, occurred_at: DateTime<Utc>) -> Self {
        self.occurred_at = occurred_at;
        self
    }

    /// The calendar day this record falls on, for day-granularity filters.
    pub fn occurred_on(&self) -> NaiveDate {
        self.occurred_at.date_naive()
    }
}

/// Aggregated totals over a set of records.
///
/// `balance` always equals `income - expenses`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Summary {
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
}

/// Classification of a balance for display purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceIndicator {
    Positive,
    Neutral,
    Negative,
}
