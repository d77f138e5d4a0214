//! Foundation types for asset lineage tracking.
//!
//! This crate provides the identity, temporal, and derivation types shared by
//! the ledger client, the traversal core, and presentation layers.
//!
//! # Key Types
//!
//! - [`AssetRef`] — `(collection, asset id)` identity of a derivative-trackable asset
//! - [`Address`] — 20-byte creator account address
//! - [`Timestamp`] — ledger creation time in unix seconds
//! - [`ParentLink`] / [`RelationshipKind`] — one declared derivation edge
//! - [`LineageNode`] — snapshot of one asset's position in the lineage graph
//! - [`ProvenanceMetadata`] — aggregate lineage report for one asset

pub mod error;
pub mod identity;
pub mod node;
pub mod provenance;
pub mod relation;
pub mod temporal;

pub use error::TypeError;
pub use identity::{Address, AssetRef, CollectionId};
pub use node::{sort_lineage, LineageNode};
pub use provenance::{ParentSummary, ProvenanceMetadata};
pub use relation::{ParentLink, RelationshipKind};
pub use temporal::Timestamp;
