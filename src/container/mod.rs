//! Event-driven state container for finance records.
//!
//! One intent in, one or more ordered state snapshots out. Consumers never
//! get a return value from a dispatch; results are only observable through
//! the emission stream.
//!
//! # Architecture
//!
//! ```text
//! RecordEvent ──→ RecordStateContainer ──→ ContainerState ──→ consumer
//!      ↑               (calls RecordService)       │
//!      └───────────────────────────────────────────┘
//! ```
//!
//! - `event.rs` - intents dispatched by consumers
//! - `state.rs` - the closed set of state variants
//! - `filter.rs` - search/date/type criteria and their AND-composition
//! - `reducer.rs` - the single-writer reducer
//! - `handle.rs` - fire-and-forget command channel front end

mod event;
mod filter;
mod handle;
mod reducer;
mod state;

pub use event::RecordEvent;
pub use filter::FilterCriteria;
pub use handle::ContainerHandle;
pub use reducer::RecordStateContainer;
pub use state::{ContainerState, InFlight, LoadedView, OperationKind};
