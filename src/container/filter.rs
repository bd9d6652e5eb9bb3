//! Filter criteria and their composition.

use chrono::NaiveDate;

use crate::record::FinanceRecord;

/// Active filter criteria over the record list.
///
/// The three criteria combine with logical AND; a record is kept only when
/// it passes every active one. Matching is a single pass per record, so
/// the result does not depend on any application order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterCriteria {
    /// Case-insensitive substring match on titles.
    pub query: Option<String>,
    /// Inclusive day-granularity bounds; a record on a boundary day is
    /// included.
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    /// `Some(true)` keeps expenses, `Some(false)` keeps income.
    pub is_expense: Option<bool>,
}

impl FilterCriteria {
    pub fn is_active(&self) -> bool {
        self.query.is_some() || self.date_range.is_some() || self.is_expense.is_some()
    }

    /// The subset of `records` matching every active criterion.
    pub fn apply(&self, records: &[FinanceRecord]) -> Vec<FinanceRecord> {
        records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect()
    }

    fn matches(&self, record: &FinanceRecord) -> bool {
        if let Some(query) = &self.query {
            if !record
                .title
                .to_lowercase()
                .contains(&query.to_lowercase())
            {
                return false;
            }
        }
        if let Some((start, end)) = self.date_range {
            let day = record.occurred_on();
            if day < start || day > end {
                return false;
            }
        }
        if let Some(is_expense) = self.is_expense {
            if record.is_expense != is_expense {
                return false;
            }
        }
        true
    }
}
