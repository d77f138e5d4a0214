#![allow(dead_code)]

use std::time::Duration;

use async_trait::async_trait;
use lineage_ledger::{DerivativeInfo, InMemoryLedger, LedgerQuery, LedgerResult};
use lineage_types::{Address, AssetRef, ParentLink, Timestamp};

pub fn x(id: u64) -> AssetRef {
    AssetRef::new("x", id)
}

pub fn y(id: u64) -> AssetRef {
    AssetRef::new("y", id)
}

pub fn creator() -> Address {
    Address::from_bytes([0xc0; 20])
}

pub fn original() -> DerivativeInfo {
    DerivativeInfo::original(creator(), Timestamp::from_unix_secs(1_700_000_000))
}

pub fn derived(parents: Vec<ParentLink>, generation: u64) -> DerivativeInfo {
    DerivativeInfo::derivative(
        parents,
        creator(),
        generation,
        Timestamp::from_unix_secs(1_700_000_000 + generation * 60),
    )
}

pub fn remix(parent: AssetRef, generation: u64) -> DerivativeInfo {
    derived(vec![ParentLink::remix(parent)], generation)
}

/// A (x-1) <- B (x-2) <- C (x-3)
pub fn chain() -> InMemoryLedger {
    let ledger = InMemoryLedger::new();
    ledger.insert(x(1), original()).unwrap();
    ledger.insert(x(2), remix(x(1), 1)).unwrap();
    ledger.insert(x(3), remix(x(2), 2)).unwrap();
    ledger
}

/// Wraps a ledger and delays every query.
pub struct SlowLedger {
    pub inner: InMemoryLedger,
    pub delay: Duration,
}

#[async_trait]
impl LedgerQuery for SlowLedger {
    async fn derivative_info(&self, asset: &AssetRef) -> LedgerResult<DerivativeInfo> {
        tokio::time::sleep(self.delay).await;
        self.inner.derivative_info(asset).await
    }

    async fn children(&self, asset: &AssetRef) -> LedgerResult<Vec<AssetRef>> {
        tokio::time::sleep(self.delay).await;
        self.inner.children(asset).await
    }
}

pub fn assets(nodes: &[lineage_types::LineageNode]) -> Vec<AssetRef> {
    nodes.iter().map(|n| n.asset.clone()).collect()
}
