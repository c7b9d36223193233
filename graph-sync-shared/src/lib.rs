//! # Graph Sync Shared
//!
//! Shared types for the graph index sync bridge: the graph entity model handed
//! over by the transactional store, the per-transaction [`ChangeSet`], and the
//! document actions synthesized from it.

pub mod change_set;
pub mod document;
pub mod entity;
pub mod errors;

pub use change_set::{ChangeSet, LabelEntry, PropertyEntry};
pub use document::{
    document_id, node_type_name, relationship_type_name, ActionKey, DocumentAction,
    DocumentBody, DocumentKind, EntityFields, SyncBatch,
};
pub use entity::{Entity, EntityId, Node, PropertyMap, PropertyValue, Relationship};
pub use errors::DocumentError;
