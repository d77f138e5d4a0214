use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use tracing::debug;

use lineage_types::AssetRef;

use crate::error::{LedgerError, LedgerResult};
use crate::record::DerivativeInfo;
use crate::traits::LedgerQuery;

/// In-memory ledger for tests, local demos, and embedding.
///
/// Children are derived from parent links as records are inserted, the way
/// the contract maintains its forward index on mint. Extra child edges and
/// per-asset outages can be injected to model inconsistent or flaky ledgers.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    inner: RwLock<LedgerState>,
    queries: AtomicUsize,
}

#[derive(Debug, Default)]
struct LedgerState {
    records: HashMap<AssetRef, DerivativeInfo>,
    children: HashMap<AssetRef, Vec<AssetRef>>,
    unavailable: HashSet<AssetRef>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) the record for `asset` and index it as a child of
    /// each declared parent.
    pub fn insert(&self, asset: AssetRef, info: DerivativeInfo) -> LedgerResult<()> {
        let mut state = self.write_state()?;
        for link in &info.parents {
            let children = state.children.entry(link.parent.clone()).or_default();
            if !children.contains(&asset) {
                children.push(asset.clone());
            }
        }
        debug!(asset = %asset, generation = info.generation, "inserted ledger record");
        state.records.insert(asset, info);
        Ok(())
    }

    /// Add a child edge without a matching parent link on the child.
    pub fn link_child(&self, parent: &AssetRef, child: AssetRef) -> LedgerResult<()> {
        let mut state = self.write_state()?;
        let children = state.children.entry(parent.clone()).or_default();
        if !children.contains(&child) {
            children.push(child);
        }
        Ok(())
    }

    /// Make every query touching `asset` fail with `Unavailable`.
    pub fn set_unavailable(&self, asset: AssetRef) -> LedgerResult<()> {
        self.write_state()?.unavailable.insert(asset);
        Ok(())
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.inner.read().map(|s| s.records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total number of queries served (including failed ones).
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::Relaxed)
    }

    fn write_state(&self) -> LedgerResult<std::sync::RwLockWriteGuard<'_, LedgerState>> {
        self.inner
            .write()
            .map_err(|_| LedgerError::Unavailable("ledger write lock poisoned".into()))
    }

    fn read_state(&self, asset: &AssetRef) -> LedgerResult<std::sync::RwLockReadGuard<'_, LedgerState>> {
        self.queries.fetch_add(1, Ordering::Relaxed);
        let state = self
            .inner
            .read()
            .map_err(|_| LedgerError::Unavailable("ledger read lock poisoned".into()))?;
        if state.unavailable.contains(asset) {
            return Err(LedgerError::Unavailable(format!("query for {asset} timed out")));
        }
        Ok(state)
    }
}

#[async_trait]
impl LedgerQuery for InMemoryLedger {
    async fn derivative_info(&self, asset: &AssetRef) -> LedgerResult<DerivativeInfo> {
        let state = self.read_state(asset)?;
        state
            .records
            .get(asset)
            .cloned()
            .ok_or_else(|| LedgerError::NotFound(asset.clone()))
    }

    async fn children(&self, asset: &AssetRef) -> LedgerResult<Vec<AssetRef>> {
        let state = self.read_state(asset)?;
        if !state.records.contains_key(asset) {
            return Err(LedgerError::NotFound(asset.clone()));
        }
        Ok(state.children.get(asset).cloned().unwrap_or_default())
    }
}
