use lineage_ledger::LedgerQuery;
use lineage_types::{AssetRef, ProvenanceMetadata};

use crate::descendants;
use crate::error::LineageResult;
use crate::session::Session;

/// Build the aggregate provenance report for `asset`.
///
/// The node fetched here is memoized in the session, so the descendant walk
/// starts without re-reading it.
pub(crate) async fn provenance<L>(
    session: &mut Session<'_, L>,
    asset: &AssetRef,
) -> LineageResult<ProvenanceMetadata>
where
    L: LedgerQuery + ?Sized,
{
    let node = session.fetch(asset).await?;
    let descendants = descendants::collect(session, asset).await?;
    Ok(ProvenanceMetadata::from_node(node, descendants.len()))
}
