use std::sync::Arc;

use async_trait::async_trait;
use lineage_types::{AssetRef, ParentLink};

use crate::error::LedgerResult;
use crate::record::DerivativeInfo;

/// Read-only query boundary to the ledger holding derivative records.
///
/// All operations are idempotent. Implementations report a missing record
/// as [`LedgerError::NotFound`] and any transport failure as
/// [`LedgerError::Unavailable`]; they must not retry internally.
///
/// [`LedgerError::NotFound`]: crate::LedgerError::NotFound
/// [`LedgerError::Unavailable`]: crate::LedgerError::Unavailable
#[async_trait]
pub trait LedgerQuery: Send + Sync {
    /// Creator, generation, creation time and declared parents of `asset`.
    async fn derivative_info(&self, asset: &AssetRef) -> LedgerResult<DerivativeInfo>;

    /// Direct children of `asset`.
    async fn children(&self, asset: &AssetRef) -> LedgerResult<Vec<AssetRef>>;

    async fn parents(&self, asset: &AssetRef) -> LedgerResult<Vec<ParentLink>> {
        Ok(self.derivative_info(asset).await?.parents)
    }

    async fn generation(&self, asset: &AssetRef) -> LedgerResult<u64> {
        Ok(self.derivative_info(asset).await?.generation)
    }

    /// Returns `true` if `candidate` is a declared direct parent of `asset`.
    async fn is_derivative_of(&self, asset: &AssetRef, candidate: &AssetRef) -> LedgerResult<bool> {
        Ok(self
            .parents(asset)
            .await?
            .iter()
            .any(|link| &link.parent == candidate))
    }
}

#[async_trait]
impl<T: LedgerQuery + ?Sized> LedgerQuery for Arc<T> {
    async fn derivative_info(&self, asset: &AssetRef) -> LedgerResult<DerivativeInfo> {
        (**self).derivative_info(asset).await
    }

    async fn children(&self, asset: &AssetRef) -> LedgerResult<Vec<AssetRef>> {
        (**self).children(asset).await
    }

    async fn parents(&self, asset: &AssetRef) -> LedgerResult<Vec<ParentLink>> {
        (**self).parents(asset).await
    }

    async fn generation(&self, asset: &AssetRef) -> LedgerResult<u64> {
        (**self).generation(asset).await
    }

    async fn is_derivative_of(&self, asset: &AssetRef, candidate: &AssetRef) -> LedgerResult<bool> {
        (**self).is_derivative_of(asset, candidate).await
    }
}
