//! Error types for lineage traversal.

use lineage_ledger::LedgerError;
use lineage_types::AssetRef;

/// Errors that abort a lineage call.
///
/// No variant carries a partial result: a traversal either completes or
/// fails as a whole.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LineageError {
    /// The requested asset has no ledger record.
    #[error("asset does not exist: {0}")]
    NotFound(AssetRef),

    /// A ledger query could not complete. The whole call may be retried.
    #[error("ledger temporarily unavailable: {0}")]
    LedgerUnavailable(String),

    /// The caller aborted the call or its deadline expired.
    #[error("lineage query cancelled")]
    Cancelled,
}

impl LineageError {
    /// Returns `true` if retrying the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::LedgerUnavailable(_))
    }
}

impl From<LedgerError> for LineageError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::NotFound(asset) => Self::NotFound(asset),
            LedgerError::Unavailable(reason) => Self::LedgerUnavailable(reason),
            err @ (LedgerError::Malformed { .. } | LedgerError::Snapshot(_)) => {
                Self::LedgerUnavailable(err.to_string())
            }
        }
    }
}

/// Convenience alias for lineage results.
pub type LineageResult<T> = Result<T, LineageError>;

/// Errors loading or validating a [`LineageConfig`](crate::LineageConfig).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(String),

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("invalid config: {0}")]
    Invalid(String),
}
