//! The closed set of states a container can be in.

use crate::error::RecordError;
use crate::record::FinanceRecord;

use super::filter::FilterCriteria;

/// Which mutating operations are currently outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InFlight {
    pub adding: bool,
    pub updating: bool,
    pub deleting: bool,
}

impl InFlight {
    pub fn any(&self) -> bool {
        self.adding || self.updating || self.deleting
    }
}

/// The mutation a success marker refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Add,
    Update,
    Delete,
    Clear,
}

impl OperationKind {
    /// Human-readable confirmation shown after the operation lands.
    pub fn success_message(&self) -> &'static str {
        match self {
            OperationKind::Add => "Record added successfully",
            OperationKind::Update => "Record updated successfully",
            OperationKind::Delete => "Record deleted successfully",
            OperationKind::Clear => "All records cleared successfully",
        }
    }

    /// The in-flight flag set while this operation is outstanding. Clear
    /// has no flag of its own.
    pub(super) fn in_flight(&self) -> InFlight {
        match self {
            OperationKind::Add => InFlight {
                adding: true,
                ..Default::default()
            },
            OperationKind::Update => InFlight {
                updating: true,
                ..Default::default()
            },
            OperationKind::Delete => InFlight {
                deleting: true,
                ..Default::default()
            },
            OperationKind::Clear => InFlight::default(),
        }
    }
}

/// Payload of the loaded steady state.
///
/// `filtered_records` is always derived from `records` and the active
/// `filters`; it is recomputed synchronously whenever either changes and is
/// left empty while no filter is active.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoadedView {
    pub records: Vec<FinanceRecord>,
    pub filtered_records: Vec<FinanceRecord>,
    pub in_flight: InFlight,
    pub filters: FilterCriteria,
}

impl LoadedView {
    /// A fresh view over `records` with no filters and nothing in flight.
    pub fn new(records: Vec<FinanceRecord>) -> Self {
        Self {
            records,
            ..Default::default()
        }
    }

    /// Recompute `filtered_records` from the current records and filters.
    pub fn refilter(&mut self) {
        self.filtered_records = if self.filters.is_active() {
            self.filters.apply(&self.records)
        } else {
            Vec::new()
        };
    }

    /// The records a consumer should render: the filtered subset while any
    /// filter is active, the full list otherwise.
    pub fn visible_records(&self) -> &[FinanceRecord] {
        if self.filters.is_active() {
            &self.filtered_records
        } else {
            &self.records
        }
    }
}

/// One snapshot of everything a consumer needs to render.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ContainerState {
    /// Before any load has been attempted. Never re-entered once a load
    /// begins.
    #[default]
    Initial,

    /// A full load is outstanding and no record data is available yet.
    Loading,

    /// Steady state.
    Loaded(LoadedView),

    /// Transient marker after a successful mutation; always immediately
    /// followed by a `Loaded` emission carrying the same record list.
    OperationSucceeded {
        operation: OperationKind,
        message: String,
        records: Vec<FinanceRecord>,
    },

    /// A failure, together with the last-known-good record list when one
    /// exists so consumers are not forced to blank out.
    Failed {
        error: RecordError,
        records: Option<Vec<FinanceRecord>>,
    },
}

impl ContainerState {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    pub fn as_loaded(&self) -> Option<&LoadedView> {
        match self {
            Self::Loaded(view) => Some(view),
            _ => None,
        }
    }
}
