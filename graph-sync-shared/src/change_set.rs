//! Per-transaction change set.
//!
//! A [`ChangeSet`] is the full set of graph mutations visible within one
//! committing transaction. The graph store fills it in before commit; the sync
//! pipeline only reads it.

use std::collections::HashSet;

use crate::entity::{Entity, EntityId, Node, PropertyValue, Relationship};

/// A label assigned to or removed from a node.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelEntry {
    /// The node as it looks at commit time.
    pub node: Node,
    /// The label that changed.
    pub label: String,
}

/// A property assigned on or removed from an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyEntry<E> {
    /// The entity as it looks at commit time.
    pub entity: E,
    /// The property key that changed.
    pub key: String,
    /// Value before the transaction, if any.
    pub previous_value: Option<PropertyValue>,
    /// Value after the transaction; `None` for removals.
    pub value: Option<PropertyValue>,
}

impl<E> PropertyEntry<E> {
    /// An assignment of `value` to `key`.
    pub fn assigned(
        entity: E,
        key: impl Into<String>,
        previous_value: Option<PropertyValue>,
        value: PropertyValue,
    ) -> Self {
        Self {
            entity,
            key: key.into(),
            previous_value,
            value: Some(value),
        }
    }

    /// A removal of `key`.
    pub fn removed(entity: E, key: impl Into<String>, previous_value: Option<PropertyValue>) -> Self {
        Self {
            entity,
            key: key.into(),
            previous_value,
            value: None,
        }
    }
}

/// All entities affected by one transaction, partitioned by change category.
#[derive(Debug, Clone, Default)]
pub struct ChangeSet {
    created_nodes: Vec<Node>,
    deleted_nodes: Vec<Node>,
    created_relationships: Vec<Relationship>,
    deleted_relationships: Vec<Relationship>,
    assigned_labels: Vec<LabelEntry>,
    removed_labels: Vec<LabelEntry>,
    assigned_node_properties: Vec<PropertyEntry<Node>>,
    removed_node_properties: Vec<PropertyEntry<Node>>,
    assigned_relationship_properties: Vec<PropertyEntry<Relationship>>,
    removed_relationship_properties: Vec<PropertyEntry<Relationship>>,
    deleted_node_ids: HashSet<EntityId>,
    deleted_relationship_ids: HashSet<EntityId>,
}

impl ChangeSet {
    /// Create an empty change set.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_created_node(mut self, node: Node) -> Self {
        self.created_nodes.push(node);
        self
    }

    pub fn with_deleted_node(mut self, node: Node) -> Self {
        self.deleted_node_ids.insert(node.id);
        self.deleted_nodes.push(node);
        self
    }

    pub fn with_created_relationship(mut self, relationship: Relationship) -> Self {
        self.created_relationships.push(relationship);
        self
    }

    pub fn with_deleted_relationship(mut self, relationship: Relationship) -> Self {
        self.deleted_relationship_ids.insert(relationship.id);
        self.deleted_relationships.push(relationship);
        self
    }

    pub fn with_assigned_label(mut self, node: Node, label: impl Into<String>) -> Self {
        self.assigned_labels.push(LabelEntry {
            node,
            label: label.into(),
        });
        self
    }

    pub fn with_removed_label(mut self, node: Node, label: impl Into<String>) -> Self {
        self.removed_labels.push(LabelEntry {
            node,
            label: label.into(),
        });
        self
    }

    pub fn with_assigned_node_property(mut self, entry: PropertyEntry<Node>) -> Self {
        self.assigned_node_properties.push(entry);
        self
    }

    pub fn with_removed_node_property(mut self, entry: PropertyEntry<Node>) -> Self {
        self.removed_node_properties.push(entry);
        self
    }

    pub fn with_assigned_relationship_property(mut self, entry: PropertyEntry<Relationship>) -> Self {
        self.assigned_relationship_properties.push(entry);
        self
    }

    pub fn with_removed_relationship_property(mut self, entry: PropertyEntry<Relationship>) -> Self {
        self.removed_relationship_properties.push(entry);
        self
    }

    pub fn created_nodes(&self) -> &[Node] {
        &self.created_nodes
    }

    pub fn deleted_nodes(&self) -> &[Node] {
        &self.deleted_nodes
    }

    pub fn created_relationships(&self) -> &[Relationship] {
        &self.created_relationships
    }

    pub fn deleted_relationships(&self) -> &[Relationship] {
        &self.deleted_relationships
    }

    pub fn assigned_labels(&self) -> &[LabelEntry] {
        &self.assigned_labels
    }

    pub fn removed_labels(&self) -> &[LabelEntry] {
        &self.removed_labels
    }

    pub fn assigned_node_properties(&self) -> &[PropertyEntry<Node>] {
        &self.assigned_node_properties
    }

    pub fn removed_node_properties(&self) -> &[PropertyEntry<Node>] {
        &self.removed_node_properties
    }

    pub fn assigned_relationship_properties(&self) -> &[PropertyEntry<Relationship>] {
        &self.assigned_relationship_properties
    }

    pub fn removed_relationship_properties(&self) -> &[PropertyEntry<Relationship>] {
        &self.removed_relationship_properties
    }

    /// Whether the node is deleted by this transaction.
    pub fn is_node_deleted(&self, id: EntityId) -> bool {
        self.deleted_node_ids.contains(&id)
    }

    /// Whether the relationship is deleted by this transaction.
    pub fn is_relationship_deleted(&self, id: EntityId) -> bool {
        self.deleted_relationship_ids.contains(&id)
    }

    /// Whether the entity is in this transaction's deletion set.
    pub fn is_deleted(&self, entity: Entity<'_>) -> bool {
        match entity {
            Entity::Node(node) => self.is_node_deleted(node.id),
            Entity::Relationship(rel) => self.is_relationship_deleted(rel.id),
        }
    }

    /// True when the transaction touched no node or relationship.
    pub fn is_empty(&self) -> bool {
        self.created_nodes.is_empty()
            && self.deleted_nodes.is_empty()
            && self.created_relationships.is_empty()
            && self.deleted_relationships.is_empty()
            && self.assigned_labels.is_empty()
            && self.removed_labels.is_empty()
            && self.assigned_node_properties.is_empty()
            && self.removed_node_properties.is_empty()
            && self.assigned_relationship_properties.is_empty()
            && self.removed_relationship_properties.is_empty()
    }
}
