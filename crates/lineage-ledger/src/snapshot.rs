//! JSON ledger snapshots.
//!
//! A snapshot is a flat list of raw derivative records keyed by asset. It is
//! decoded through [`RawDerivativeRecord::decode`] and loaded into an
//! [`InMemoryLedger`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use lineage_types::AssetRef;

use crate::error::{LedgerError, LedgerResult};
use crate::memory::InMemoryLedger;
use crate::record::RawDerivativeRecord;

/// One record in a snapshot file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub collection: String,
    pub asset_id: u64,
    #[serde(flatten)]
    pub record: RawDerivativeRecord,
}

/// A serialized set of ledger records.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub records: Vec<SnapshotEntry>,
}

impl LedgerSnapshot {
    pub fn from_json(json: &str) -> LedgerResult<Self> {
        serde_json::from_str(json).map_err(|e| LedgerError::Snapshot(e.to_string()))
    }

    pub fn from_path(path: impl AsRef<Path>) -> LedgerResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| LedgerError::Snapshot(format!("{}: {e}", path.display())))?;
        Self::from_json(&json)
    }

    /// Decode every record and load them into a fresh in-memory ledger.
    ///
    /// Fails on the first malformed record; a partially decoded snapshot is
    /// never returned.
    pub fn into_ledger(self) -> LedgerResult<InMemoryLedger> {
        let ledger = InMemoryLedger::new();
        for entry in self.records {
            let asset = AssetRef::new(entry.collection, entry.asset_id);
            let info = entry.record.decode(&asset)?;
            ledger.insert(asset, info)?;
        }
        tracing::info!(records = ledger.len(), "loaded ledger snapshot");
        Ok(ledger)
    }
}
