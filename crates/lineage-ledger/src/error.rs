use lineage_types::AssetRef;

/// Errors produced by ledger queries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("no ledger record for asset {0}")]
    NotFound(AssetRef),

    #[error("ledger unavailable: {0}")]
    Unavailable(String),

    #[error("malformed ledger record for {asset}: {reason}")]
    Malformed { asset: AssetRef, reason: String },

    #[error("snapshot error: {0}")]
    Snapshot(String),
}

impl LedgerError {
    pub(crate) fn malformed(asset: &AssetRef, err: impl std::fmt::Display) -> Self {
        Self::Malformed {
            asset: asset.clone(),
            reason: err.to_string(),
        }
    }
}

/// Convenience alias for ledger results.
pub type LedgerResult<T> = Result<T, LedgerError>;
