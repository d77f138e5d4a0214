//! Aggregate provenance reports handed to presentation layers.

use serde::{Deserialize, Serialize};

use crate::identity::{Address, AssetRef};
use crate::node::LineageNode;
use crate::relation::{ParentLink, RelationshipKind};
use crate::temporal::Timestamp;

/// Aggregate lineage report for one asset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvenanceMetadata {
    pub asset: AssetRef,
    pub generation: u64,
    pub creator: Address,
    pub created_at: Timestamp,
    pub parents: Vec<ParentLink>,
    pub children: Vec<AssetRef>,
    /// Holds iff `parents` is empty.
    pub is_original: bool,
    /// Size of the full descendant set, not just direct children.
    pub descendant_count: usize,
    /// Display-ready view of `parents`, in the same order.
    pub parent_summaries: Vec<ParentSummary>,
}

impl ProvenanceMetadata {
    /// Assemble a report from the asset's node and its descendant count.
    pub fn from_node(node: LineageNode, descendant_count: usize) -> Self {
        let parent_summaries = node
            .parents
            .iter()
            .map(|link| ParentSummary::describe(&node.asset, link))
            .collect();
        Self {
            is_original: node.is_original(),
            asset: node.asset,
            generation: node.generation,
            creator: node.creator,
            created_at: node.created_at,
            parents: node.parents,
            children: node.children,
            descendant_count,
            parent_summaries,
        }
    }
}

/// One parent as the presentation layer shows it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentSummary {
    pub parent: AssetRef,
    pub relationship: RelationshipKind,
    pub label: String,
    /// The parent lives in another collection, so lineage expansion stops here.
    pub cross_collection: bool,
}

impl ParentSummary {
    fn describe(child: &AssetRef, link: &ParentLink) -> Self {
        Self {
            parent: link.parent.clone(),
            relationship: link.relationship,
            label: link.relationship.label().to_owned(),
            cross_collection: !link.parent.same_collection(child),
        }
    }
}
