//! The lineage facade handed to presentation layers.

use std::future::Future;

use tracing::warn;

use lineage_ledger::LedgerQuery;
use lineage_types::{AssetRef, LineageNode, ProvenanceMetadata};

use crate::cancel::CancelSignal;
use crate::config::LineageConfig;
use crate::error::{ConfigError, LineageError, LineageResult};
use crate::session::Session;
use crate::warning::Traced;
use crate::{ancestry, descendants, report};

/// Read-only lineage queries over a ledger client.
///
/// Holds no state between calls. Every method builds fresh nodes from the
/// ledger; within one call each asset is fetched at most once.
///
/// Each query has a `*_with` variant taking a [`CancelSignal`]. A fired
/// signal or an expired [`LineageConfig::query_timeout_ms`] fails the call
/// with [`LineageError::Cancelled`].
pub struct LineageService<L> {
    ledger: L,
    config: LineageConfig,
}

impl<L: LedgerQuery> LineageService<L> {
    pub fn new(ledger: L) -> Self {
        Self {
            ledger,
            config: LineageConfig::default(),
        }
    }

    pub fn with_config(ledger: L, config: LineageConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { ledger, config })
    }

    pub fn config(&self) -> &LineageConfig {
        &self.config
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Snapshot of a single asset: identity, parents, children, generation,
    /// creator and creation time.
    pub async fn build_lineage_tree(&self, asset: &AssetRef) -> LineageResult<Traced<LineageNode>> {
        self.build_lineage_tree_with(asset, &CancelSignal::never()).await
    }

    pub async fn build_lineage_tree_with(
        &self,
        asset: &AssetRef,
        cancel: &CancelSignal,
    ) -> LineageResult<Traced<LineageNode>> {
        let mut session = self.session(cancel);
        self.with_deadline(async move {
            let node = session.fetch(asset).await?;
            session.inspect(&node);
            Ok(session.finish(node))
        })
        .await
    }

    /// `asset` and all of its same-collection ancestors, ascending by
    /// generation.
    pub async fn get_ancestry(&self, asset: &AssetRef) -> LineageResult<Traced<Vec<LineageNode>>> {
        self.get_ancestry_with(asset, &CancelSignal::never()).await
    }

    pub async fn get_ancestry_with(
        &self,
        asset: &AssetRef,
        cancel: &CancelSignal,
    ) -> LineageResult<Traced<Vec<LineageNode>>> {
        let mut session = self.session(cancel);
        self.with_deadline(async move {
            let nodes = ancestry::collect(&mut session, asset).await?;
            Ok(session.finish(nodes))
        })
        .await
    }

    /// All descendants of `asset` (excluding it), ascending by generation.
    pub async fn get_descendants(
        &self,
        asset: &AssetRef,
    ) -> LineageResult<Traced<Vec<LineageNode>>> {
        self.get_descendants_with(asset, &CancelSignal::never()).await
    }

    pub async fn get_descendants_with(
        &self,
        asset: &AssetRef,
        cancel: &CancelSignal,
    ) -> LineageResult<Traced<Vec<LineageNode>>> {
        let mut session = self.session(cancel);
        self.with_deadline(async move {
            let nodes = descendants::collect(&mut session, asset).await?;
            Ok(session.finish(nodes))
        })
        .await
    }

    /// Aggregate report: originality, descendant count, parent and child
    /// summaries.
    pub async fn get_provenance_metadata(
        &self,
        asset: &AssetRef,
    ) -> LineageResult<Traced<ProvenanceMetadata>> {
        self.get_provenance_metadata_with(asset, &CancelSignal::never())
            .await
    }

    pub async fn get_provenance_metadata_with(
        &self,
        asset: &AssetRef,
        cancel: &CancelSignal,
    ) -> LineageResult<Traced<ProvenanceMetadata>> {
        let mut session = self.session(cancel);
        self.with_deadline(async move {
            let metadata = report::provenance(&mut session, asset).await?;
            Ok(session.finish(metadata))
        })
        .await
    }

    /// Returns `true` if `candidate` is a declared direct parent of `asset`.
    pub async fn is_derivative_of(
        &self,
        asset: &AssetRef,
        candidate: &AssetRef,
    ) -> LineageResult<bool> {
        self.is_derivative_of_with(asset, candidate, &CancelSignal::never())
            .await
    }

    pub async fn is_derivative_of_with(
        &self,
        asset: &AssetRef,
        candidate: &AssetRef,
        cancel: &CancelSignal,
    ) -> LineageResult<bool> {
        if cancel.is_cancelled() {
            return Err(LineageError::Cancelled);
        }
        self.with_deadline(async {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => Err(LineageError::Cancelled),
                result = self.ledger.is_derivative_of(asset, candidate) => Ok(result?),
            }
        })
        .await
    }

    fn session(&self, cancel: &CancelSignal) -> Session<'_, L> {
        Session::new(&self.ledger, &self.config, cancel.clone())
    }

    async fn with_deadline<T, F>(&self, call: F) -> LineageResult<T>
    where
        F: Future<Output = LineageResult<T>>,
    {
        match self.config.query_timeout() {
            Some(limit) => tokio::time::timeout(limit, call).await.map_err(|_| {
                warn!(timeout_ms = limit.as_millis() as u64, "lineage call exceeded deadline");
                LineageError::Cancelled
            })?,
            None => call.await,
        }
    }
}
