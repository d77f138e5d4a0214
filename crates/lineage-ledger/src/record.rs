//! Derivative records and the decoding boundary.
//!
//! Contract reads come back as parallel arrays of loosely-typed values. They
//! are validated and converted into [`DerivativeInfo`] exactly once, here;
//! nothing past this module handles raw shapes.

use serde::{Deserialize, Serialize};

use lineage_types::{Address, AssetRef, CollectionId, ParentLink, RelationshipKind, Timestamp};

use crate::error::{LedgerError, LedgerResult};

/// Typed derivative record for one asset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivativeInfo {
    pub parents: Vec<ParentLink>,
    pub creator: Address,
    pub generation: u64,
    pub created_at: Timestamp,
}

impl DerivativeInfo {
    /// Record for an original (parentless, generation 0) asset.
    pub fn original(creator: Address, created_at: Timestamp) -> Self {
        Self {
            parents: Vec::new(),
            creator,
            generation: 0,
            created_at,
        }
    }

    /// Record for a derivative asset.
    pub fn derivative(
        parents: Vec<ParentLink>,
        creator: Address,
        generation: u64,
        created_at: Timestamp,
    ) -> Self {
        Self {
            parents,
            creator,
            generation,
            created_at,
        }
    }
}

/// The derivative record as the contract returns it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDerivativeRecord {
    #[serde(default)]
    pub parent_collections: Vec<String>,
    #[serde(default)]
    pub parent_asset_ids: Vec<u64>,
    #[serde(default)]
    pub relationship_kinds: Vec<u8>,
    pub creator: String,
    pub generation: u64,
    pub created_at: u64,
}

impl RawDerivativeRecord {
    /// Validate and convert into a typed record for `asset`.
    pub fn decode(self, asset: &AssetRef) -> LedgerResult<DerivativeInfo> {
        let n = self.parent_collections.len();
        if self.parent_asset_ids.len() != n || self.relationship_kinds.len() != n {
            return Err(LedgerError::malformed(
                asset,
                format!(
                    "parent arrays differ in length: {} collections, {} ids, {} kinds",
                    n,
                    self.parent_asset_ids.len(),
                    self.relationship_kinds.len()
                ),
            ));
        }

        let mut parents = Vec::with_capacity(n);
        for ((collection, asset_id), kind) in self
            .parent_collections
            .into_iter()
            .zip(self.parent_asset_ids)
            .zip(self.relationship_kinds)
        {
            if collection.is_empty() {
                return Err(LedgerError::malformed(asset, "empty parent collection"));
            }
            let relationship =
                RelationshipKind::from_index(kind).map_err(|e| LedgerError::malformed(asset, e))?;
            parents.push(ParentLink::new(
                AssetRef::new(CollectionId::new(collection), asset_id),
                relationship,
            ));
        }

        let creator = Address::from_hex(&self.creator).map_err(|e| LedgerError::malformed(asset, e))?;

        Ok(DerivativeInfo {
            parents,
            creator,
            generation: self.generation,
            created_at: Timestamp::from_unix_secs(self.created_at),
        })
    }
}

impl From<&DerivativeInfo> for RawDerivativeRecord {
    fn from(info: &DerivativeInfo) -> Self {
        Self {
            parent_collections: info
                .parents
                .iter()
                .map(|l| l.parent.collection.to_string())
                .collect(),
            parent_asset_ids: info.parents.iter().map(|l| l.parent.asset_id).collect(),
            relationship_kinds: info.parents.iter().map(|l| l.relationship.index()).collect(),
            creator: info.creator.to_hex(),
            generation: info.generation,
            created_at: info.created_at.unix_secs(),
        }
    }
}
