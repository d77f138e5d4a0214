//! Read-only ledger boundary for asset lineage tracking.
//!
//! This crate provides:
//! - The [`LedgerQuery`] async trait that every ledger client implements
//! - [`DerivativeInfo`], the typed per-asset derivative record
//! - [`RawDerivativeRecord`], the loosely-typed contract return shape and
//!   its one-time conversion into typed records
//! - [`InMemoryLedger`] for tests, demos, and embedding
//! - [`LedgerSnapshot`] JSON loading into an in-memory ledger

pub mod error;
pub mod memory;
pub mod record;
pub mod snapshot;
pub mod traits;

pub use error::{LedgerError, LedgerResult};
pub use memory::InMemoryLedger;
pub use record::{DerivativeInfo, RawDerivativeRecord};
pub use snapshot::{LedgerSnapshot, SnapshotEntry};
pub use traits::LedgerQuery;
