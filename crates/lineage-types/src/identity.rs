use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Identifier of a collection (the contract instance an asset lives in).
///
/// Collections are compared by their exact string form; callers are
/// expected to normalize (e.g. lowercase contract addresses) before
/// constructing one.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionId(String);

impl CollectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CollectionId({})", self.0)
    }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CollectionId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for CollectionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Identity of one asset: the collection it belongs to plus its numeric id
/// within that collection.
///
/// Ordering is by collection first, then asset id. This is the tie-break
/// order used when traversal results share a generation.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetRef {
    pub collection: CollectionId,
    pub asset_id: u64,
}

impl AssetRef {
    pub fn new(collection: impl Into<CollectionId>, asset_id: u64) -> Self {
        Self {
            collection: collection.into(),
            asset_id,
        }
    }

    /// Returns `true` if both references live in the same collection.
    pub fn same_collection(&self, other: &AssetRef) -> bool {
        self.collection == other.collection
    }

    /// The string key form, `"{collection}-{asset_id}"`.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Debug for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AssetRef({}-{})", self.collection, self.asset_id)
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.collection, self.asset_id)
    }
}

impl FromStr for AssetRef {
    type Err = TypeError;

    /// Parses the key form. The asset id is everything after the last `-`,
    /// so collection names may themselves contain dashes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (collection, id) = s
            .rsplit_once('-')
            .ok_or_else(|| TypeError::InvalidAssetRef(s.to_owned()))?;
        if collection.is_empty() {
            return Err(TypeError::InvalidAssetRef(s.to_owned()));
        }
        let asset_id = id
            .parse::<u64>()
            .map_err(|_| TypeError::InvalidAssetRef(s.to_owned()))?;
        Ok(Self::new(collection, asset_id))
    }
}

/// A 20-byte account address identifying an asset's creator.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address([u8; 20]);

impl Address {
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Full `0x`-prefixed lowercase hex form.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Abbreviated form for display, e.g. `0x1234…cdef`.
    pub fn short(&self) -> String {
        format!(
            "0x{}…{}",
            hex::encode(&self.0[..2]),
            hex::encode(&self.0[18..])
        )
    }

    /// Parse from a hex string, with or without the `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let s = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.len() != 20 {
            return Err(TypeError::InvalidLength {
                expected: 20,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 20];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.short())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for Address {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_hex(&s)
    }
}

impl From<Address> for String {
    fn from(addr: Address) -> Self {
        addr.to_hex()
    }
}
