//! Derivation edges between assets.
//!
//! A [`ParentLink`] is one declared parent of an asset together with the
//! [`RelationshipKind`] the creator chose when minting the derivative. An
//! asset with no links is an original.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::identity::AssetRef;

/// The kind of derivation an asset declares towards one of its parents.
///
/// The ledger encodes this as a small integer; the declaration order here
/// matches that encoding and must not be changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RelationshipKind {
    Remix,
    Derivative,
    InspiredBy,
    Composite,
    Adaptation,
    Collaboration,
}

impl RelationshipKind {
    /// All kinds in ledger encoding order.
    pub const ALL: [RelationshipKind; 6] = [
        Self::Remix,
        Self::Derivative,
        Self::InspiredBy,
        Self::Composite,
        Self::Adaptation,
        Self::Collaboration,
    ];

    /// Decode the ledger's integer encoding.
    pub fn from_index(index: u8) -> Result<Self, TypeError> {
        Self::ALL
            .get(usize::from(index))
            .copied()
            .ok_or(TypeError::UnknownRelationship(index))
    }

    /// The ledger's integer encoding.
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Human-readable label for presentation.
    pub fn label(self) -> &'static str {
        match self {
            Self::Remix => "Remix",
            Self::Derivative => "Derivative",
            Self::InspiredBy => "Inspired By",
            Self::Composite => "Composite",
            Self::Adaptation => "Adaptation",
            Self::Collaboration => "Collaboration",
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One declared parent of an asset.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParentLink {
    pub parent: AssetRef,
    pub relationship: RelationshipKind,
}

impl ParentLink {
    pub fn new(parent: AssetRef, relationship: RelationshipKind) -> Self {
        Self {
            parent,
            relationship,
        }
    }

    /// Convenience constructor for a remix parent.
    pub fn remix(parent: AssetRef) -> Self {
        Self::new(parent, RelationshipKind::Remix)
    }
}
