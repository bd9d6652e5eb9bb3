//! Reactive state core for a personal finance tracker.
//!
//! Consumers dispatch [`container::RecordEvent`]s into a
//! [`container::RecordStateContainer`] and render the ordered
//! [`container::ContainerState`] snapshots it emits. Business rules and
//! validation live in [`service::RecordService`]; persistence sits behind
//! the [`store::RecordStore`] trait with an embedded SQLite engine and an
//! in-memory fake.

pub mod container;
pub mod error;
pub mod record;
pub mod service;
pub mod store;
