//! Lineage node snapshots.
//!
//! A [`LineageNode`] is assembled from ledger queries for a single asset and
//! is never mutated afterwards. Nodes are request-scoped: every top-level
//! lineage call builds fresh ones.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::identity::{Address, AssetRef};
use crate::relation::ParentLink;
use crate::temporal::Timestamp;

/// A materialized snapshot of one asset's position in the lineage graph.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineageNode {
    /// The asset this snapshot describes.
    pub asset: AssetRef,
    /// Account that minted the asset.
    pub creator: Address,
    /// Derivation depth as reported by the ledger (0 for originals).
    pub generation: u64,
    /// Ledger creation time.
    pub created_at: Timestamp,
    /// Declared parents, in ledger order. Cross-collection parents are kept.
    pub parents: Vec<ParentLink>,
    /// Direct children, in ledger order.
    pub children: Vec<AssetRef>,
}

impl LineageNode {
    /// Returns `true` if the asset declares no parents.
    pub fn is_original(&self) -> bool {
        self.parents.is_empty()
    }

    /// Parent links that stay inside this asset's collection.
    pub fn same_collection_parents(&self) -> impl Iterator<Item = &ParentLink> {
        self.parents
            .iter()
            .filter(|link| link.parent.same_collection(&self.asset))
    }

    /// Parent links that point into another collection.
    pub fn cross_collection_parents(&self) -> impl Iterator<Item = &ParentLink> {
        self.parents
            .iter()
            .filter(|link| !link.parent.same_collection(&self.asset))
    }

    /// Total order used for traversal results: ascending generation, then
    /// asset reference.
    pub fn lineage_cmp(&self, other: &Self) -> Ordering {
        self.generation
            .cmp(&other.generation)
            .then_with(|| self.asset.cmp(&other.asset))
    }
}

/// Sort nodes into lineage order (see [`LineageNode::lineage_cmp`]).
pub fn sort_lineage(nodes: &mut [LineageNode]) {
    nodes.sort_by(LineageNode::lineage_cmp);
}
