//! Per-call traversal state.
//!
//! A [`Session`] lives for exactly one top-level lineage call. It owns the
//! node memo, the warnings collected so far, and the cancellation signal.
//! Only the coordinating task touches it; concurrent fetches hand their
//! results back before anything is recorded.

use std::collections::{HashMap, HashSet};

use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::warn;

use lineage_ledger::LedgerQuery;
use lineage_types::{AssetRef, LineageNode};

use crate::builder::build_node;
use crate::cancel::CancelSignal;
use crate::config::LineageConfig;
use crate::error::{LineageError, LineageResult};
use crate::warning::{InconsistentData, Traced};

pub(crate) struct Session<'a, L: ?Sized> {
    ledger: &'a L,
    config: &'a LineageConfig,
    cancel: CancelSignal,
    memo: HashMap<AssetRef, LineageNode>,
    inspected: HashSet<AssetRef>,
    warnings: Vec<InconsistentData>,
}

impl<'a, L> Session<'a, L>
where
    L: LedgerQuery + ?Sized,
{
    pub(crate) fn new(ledger: &'a L, config: &'a LineageConfig, cancel: CancelSignal) -> Self {
        Self {
            ledger,
            config,
            cancel,
            memo: HashMap::new(),
            inspected: HashSet::new(),
            warnings: Vec::new(),
        }
    }

    pub(crate) fn config(&self) -> &LineageConfig {
        self.config
    }

    /// Fetch a single node. A missing record is an error here.
    pub(crate) async fn fetch(&mut self, asset: &AssetRef) -> LineageResult<LineageNode> {
        self.fetch_level(vec![asset.clone()])
            .await?
            .pop()
            .and_then(|(_, node)| node)
            .ok_or_else(|| LineageError::NotFound(asset.clone()))
    }

    /// Fetch every asset of one traversal level, at most
    /// `max_concurrency` at a time.
    ///
    /// Missing records come back as `None` so the caller can decide whether
    /// that is fatal. Any other failure, or cancellation, abandons the
    /// in-flight fetches and fails the level. Results are sorted by asset.
    pub(crate) async fn fetch_level(
        &mut self,
        assets: Vec<AssetRef>,
    ) -> LineageResult<Vec<(AssetRef, Option<LineageNode>)>> {
        if self.cancel.is_cancelled() {
            return Err(LineageError::Cancelled);
        }

        let mut level = Vec::with_capacity(assets.len());
        let mut misses = Vec::new();
        for asset in assets {
            match self.memo.get(&asset) {
                Some(node) => level.push((asset, Some(node.clone()))),
                None => misses.push(asset),
            }
        }

        let ledger = self.ledger;
        let fetches = stream::iter(misses)
            .map(move |asset| async move {
                match build_node(ledger, &asset).await {
                    Ok(node) => Ok((asset, Some(node))),
                    Err(LineageError::NotFound(_)) => Ok((asset, None)),
                    Err(err) => Err(err),
                }
            })
            .buffer_unordered(self.config.max_concurrency.max(1))
            .try_collect::<Vec<_>>();

        let fetched = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return Err(LineageError::Cancelled),
            fetched = fetches => fetched?,
        };

        for (asset, node) in fetched {
            if let Some(node) = &node {
                self.memo.insert(asset.clone(), node.clone());
            }
            level.push((asset, node));
        }
        level.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(level)
    }

    /// Check a node's generation against its parent list, recording any
    /// inconsistency once per asset. Returns `false` if the node must not be
    /// expanded further.
    pub(crate) fn inspect(&mut self, node: &LineageNode) -> bool {
        let expandable = !(node.generation == 0 && !node.is_original());
        if !self.inspected.insert(node.asset.clone()) {
            return expandable;
        }
        if !expandable {
            self.warn(InconsistentData::DerivativeAtGenerationZero {
                asset: node.asset.clone(),
            });
        } else if node.is_original() && node.generation != 0 {
            self.warn(InconsistentData::OriginalWithGeneration {
                asset: node.asset.clone(),
                generation: node.generation,
            });
        }
        expandable
    }

    pub(crate) fn warn(&mut self, warning: InconsistentData) {
        warn!(warning = %warning, "inconsistent ledger data");
        self.warnings.push(warning);
    }

    pub(crate) fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    pub(crate) fn finish<T>(self, value: T) -> Traced<T> {
        Traced {
            value,
            warnings: self.warnings,
        }
    }
}
