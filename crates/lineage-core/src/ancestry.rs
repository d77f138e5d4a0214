//! Upward traversal over parent links.
//!
//! Expansion is restricted to the requested asset's collection: a parent in
//! another collection stays visible in its child's `parents` list but is
//! never fetched, because resolving it would need a client for that other
//! collection's contract.

use std::collections::{HashMap, HashSet};

use tracing::info;

use lineage_ledger::LedgerQuery;
use lineage_types::{sort_lineage, AssetRef, LineageNode};

use crate::error::LineageResult;
use crate::session::Session;
use crate::warning::InconsistentData;

/// Collect `asset` and every same-collection ancestor reachable from it,
/// sorted ascending by generation then asset.
///
/// The requested asset is always expanded. An ancestor that declares parents
/// but reports generation 0 is kept as a leaf.
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
    queue_parents(&root, &mut visited, &mut referrers, &mut frontier);

    let mut result = vec![root];
    let mut depth = 0usize;
    while !frontier.is_empty() {
        depth += 1;
        let level = session.fetch_level(std::mem::take(&mut frontier)).await?;
        for (parent, node) in level {
            let Some(node) = node else {
                if let Some(child) = referrers.remove(&parent) {
                    session.warn(InconsistentData::MissingParent {
                        asset: child,
                        parent,
                    });
                }
                continue;
            };
            if session.inspect(&node) {
                queue_parents(&node, &mut visited, &mut referrers, &mut frontier);
            }
            result.push(node);
        }
    }

    sort_lineage(&mut result);
    if session.config().check_generations {
        check_generations(session, &result);
    }

    info!(
        asset = %asset,
        ancestors = result.len() - 1,
        levels = depth,
        warnings = session.warning_count(),
        "ancestry traversal complete"
    );
    Ok(result)
}

// Every expanded node shares the requested asset's collection, so its own
// same-collection parents are exactly the ones to follow.
fn queue_parents(
    node: &LineageNode,
    visited: &mut HashSet<AssetRef>,
    referrers: &mut HashMap<AssetRef, AssetRef>,
    frontier: &mut Vec<AssetRef>,
) {
    for link in node.same_collection_parents() {
        if visited.insert(link.parent.clone()) {
            referrers.insert(link.parent.clone(), node.asset.clone());
            frontier.push(link.parent.clone());
        }
    }
}

/// Flag nodes whose reported generation is not one more than their deepest
/// parent. Only nodes whose parents were all resolved inside the collection
/// are judged; the reported value is kept either way. A link from a node to
/// itself carries no depth information and is left out.
fn check_generations<L>(session: &mut Session<'_, L>, nodes: &[LineageNode])
where
    L: LedgerQuery + ?Sized,
{
    let generations: HashMap<&AssetRef, u64> =
        nodes.iter().map(|n| (&n.asset, n.generation)).collect();

    for node in nodes {
        if node.is_original() || node.generation == 0 {
            continue;
        }
        if node.cross_collection_parents().next().is_some() {
            continue;
        }
        let parent_generations: Option<Vec<u64>> = node
            .parents
            .iter()
            .filter(|link| link.parent != node.asset)
            .map(|link| generations.get(&link.parent).copied())
            .collect();
        let Some(deepest) = parent_generations.and_then(|g| g.into_iter().max()) else {
            continue;
        };
        let expected = deepest.saturating_add(1);
        if expected != node.generation {
            session.warn(InconsistentData::GenerationMismatch {
                asset: node.asset.clone(),
                reported: node.generation,
                expected,
            });
        }
    }
}
