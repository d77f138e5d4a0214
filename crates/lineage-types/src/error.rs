use thiserror::Error;

/// Errors produced by type parsing and conversion.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    #[error("invalid byte length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("invalid asset reference: {0}")]
    InvalidAssetRef(String),

    #[error("unknown relationship kind index: {0}")]
    UnknownRelationship(u8),
}
