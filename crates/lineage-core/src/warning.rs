//! Non-fatal data inconsistency reports.
//!
//! The ledger is authoritative but may disagree with itself. Such cases are
//! collected per call and returned next to the result instead of failing it.

use std::fmt;

use serde::{Deserialize, Serialize};

use lineage_types::AssetRef;

/// A non-fatal inconsistency observed in ledger data during a call.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InconsistentData {
    /// Declares parents but reports generation 0. Treated as a leaf when
    /// reached during a walk; a requested asset is still expanded.
    DerivativeAtGenerationZero { asset: AssetRef },
    /// Declares no parents but reports a non-zero generation.
    OriginalWithGeneration { asset: AssetRef, generation: u64 },
    /// A same-collection parent link whose target has no record.
    MissingParent { asset: AssetRef, parent: AssetRef },
    /// A child reference whose target has no record.
    MissingChild { asset: AssetRef, child: AssetRef },
    /// Reported generation differs from one more than the deepest parent.
    GenerationMismatch {
        asset: AssetRef,
        reported: u64,
        expected: u64,
    },
}

impl InconsistentData {
    /// The asset the inconsistency was observed on.
    pub fn asset(&self) -> &AssetRef {
        match self {
            Self::DerivativeAtGenerationZero { asset }
            | Self::OriginalWithGeneration { asset, .. }
            | Self::MissingParent { asset, .. }
            | Self::MissingChild { asset, .. }
            | Self::GenerationMismatch { asset, .. } => asset,
        }
    }
}

impl fmt::Display for InconsistentData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DerivativeAtGenerationZero { asset } => {
                write!(f, "{asset} declares parents but reports generation 0")
            }
            Self::OriginalWithGeneration { asset, generation } => {
                write!(f, "{asset} has no parents but reports generation {generation}")
            }
            Self::MissingParent { asset, parent } => {
                write!(f, "{asset} references missing parent {parent}")
            }
            Self::MissingChild { asset, child } => {
                write!(f, "{asset} references missing child {child}")
            }
            Self::GenerationMismatch {
                asset,
                reported,
                expected,
            } => write!(
                f,
                "{asset} reports generation {reported} but its parents imply {expected}"
            ),
        }
    }
}

/// A call result together with the inconsistencies seen while computing it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Traced<T> {
    pub value: T,
    pub warnings: Vec<InconsistentData>,
}

impl<T> Traced<T> {
    /// Returns `true` if no inconsistencies were observed.
    pub fn is_consistent(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Traced<U> {
        Traced {
            value: f(self.value),
            warnings: self.warnings,
        }
    }
}
