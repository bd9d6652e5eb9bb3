//! Intents dispatched into the record state container.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::record::FinanceRecord;

/// An immutable description of a requested state change.
///
/// `Load` and `Refresh` are accepted in any state. Every other event is a
/// silent no-op unless the container is currently in the loaded steady
/// state.
#[derive(Debug, Clone)]
pub enum RecordEvent {
    /// Load records from scratch; resets active filters.
    Load,

    /// Re-read the record list, keeping filters. Skips the loading state
    /// when data is already on screen.
    Refresh,

    Add {
        title: String,
        amount: Decimal,
        is_expense: bool,
    },

    /// Replace the persisted record carrying `record.id` with new values.
    Update { record: FinanceRecord },

    Delete { id: i64 },

    /// Remove every record. Irreversible.
    ClearAll,

    /// Case-insensitive substring filter on titles. An empty or
    /// whitespace-only query clears the filter.
    Search { query: String },

    /// Inclusive day-granularity range filter.
    FilterByDateRange { start: NaiveDate, end: NaiveDate },

    /// `Some(true)` = expenses only, `Some(false)` = income only, `None`
    /// removes the type filter.
    FilterByType { is_expense: Option<bool> },

    /// Reset search, date range and type filter at once.
    ClearFilters,
}
