//! Downward traversal over child links.

use std::collections::{HashMap, HashSet};

use tracing::info;

use lineage_ledger::LedgerQuery;
use lineage_types::{sort_lineage, AssetRef, LineageNode};

use crate::error::LineageResult;
use crate::session::Session;
use crate::warning::InconsistentData;

/// Collect every asset reachable from `asset` over child links, excluding
/// `asset` itself, sorted ascending by generation then asset.
///
/// The visited set is seeded with `asset`, so a cycle leading back to it
/// ends there. Children are followed across collections. The requested
/// asset is always expanded; a descendant that declares parents but reports
/// generation 0 is kept as a leaf.
pub(crate) async fn collect<L>(
    session: &mut Session<'_, L>,
    asset: &AssetRef,
) -> LineageResult<Vec<LineageNode>>
where
    L: LedgerQuery + ?Sized,
{
    let root = session.fetch(asset).await?;
    session.inspect(&root);

    let mut visited = HashSet::from([asset.clone()]);
    let mut referrers: HashMap<AssetRef, AssetRef> = HashMap::new();
    let mut frontier = Vec::new();
    queue_children(&root, &mut visited, &mut referrers, &mut frontier);

    let mut result = Vec::new();
    while !frontier.is_empty() {
        let level = session.fetch_level(std::mem::take(&mut frontier)).await?;
        for (child, node) in level {
            let Some(node) = node else {
                if let Some(parent) = referrers.remove(&child) {
                    session.warn(InconsistentData::MissingChild {
                        asset: parent,
                        child,
                    });
                }
                continue;
            };
            if session.inspect(&node) {
                queue_children(&node, &mut visited, &mut referrers, &mut frontier);
            }
            result.push(node);
        }
    }

    sort_lineage(&mut result);
    info!(
        asset = %asset,
        descendants = result.len(),
        warnings = session.warning_count(),
        "descendant traversal complete"
    );
    Ok(result)
}

fn queue_children(
    node: &LineageNode,
    visited: &mut HashSet<AssetRef>,
    referrers: &mut HashMap<AssetRef, AssetRef>,
    frontier: &mut Vec<AssetRef>,
) {
    for child in &node.children {
        if visited.insert(child.clone()) {
            referrers.insert(child.clone(), node.asset.clone());
            frontier.push(child.clone());
        }
    }
}
