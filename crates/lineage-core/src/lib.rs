//! Asset lineage tracking over a read-only ledger.
//!
//! Reconstructs the derivation graph around an asset: which assets it was
//! remixed or derived from, which assets derive from it, and an aggregate
//! provenance report for presentation. Every call is computed fresh from
//! [`LedgerQuery`] reads; nothing is cached across calls.
//!
//! Traversals proceed level by level. Each level's unvisited assets are
//! fetched concurrently (bounded by [`LineageConfig::max_concurrency`]) and
//! the visited set is consulted once per asset before any fetch is issued.
//! Hard failures (`NotFound` for the requested asset, `LedgerUnavailable`,
//! `Cancelled`) abort the whole call; data inconsistencies are reported as
//! [`InconsistentData`] warnings alongside the result.
//!
//! [`LedgerQuery`]: lineage_ledger::LedgerQuery

mod ancestry;
pub mod builder;
pub mod cancel;
pub mod config;
mod descendants;
pub mod error;
pub mod format;
mod report;
pub mod service;
mod session;
pub mod warning;

pub use builder::build_node;
pub use cancel::{CancelHandle, CancelSignal};
pub use config::LineageConfig;
pub use error::{ConfigError, LineageError, LineageResult};
pub use format::{format_generation, relationship_label};
pub use service::LineageService;
pub use warning::{InconsistentData, Traced};
