//! Lineage node assembly.

use tracing::debug;

use lineage_ledger::LedgerQuery;
use lineage_types::{AssetRef, LineageNode};

use crate::error::LineageResult;

/// Assemble a [`LineageNode`] for `asset` from its derivative record and its
/// children list.
///
/// Both ledger queries are issued concurrently. Either one failing fails the
/// build; nothing is retried.
pub async fn build_node<L>(ledger: &L, asset: &AssetRef) -> LineageResult<LineageNode>
where
    L: LedgerQuery + ?Sized,
{
    let (info, children) =
        tokio::try_join!(ledger.derivative_info(asset), ledger.children(asset))?;

    debug!(
        asset = %asset,
        generation = info.generation,
        parents = info.parents.len(),
        children = children.len(),
        "built lineage node"
    );

    Ok(LineageNode {
        asset: asset.clone(),
        creator: info.creator,
        generation: info.generation,
        created_at: info.created_at,
        parents: info.parents,
        children,
    })
}
