//! Graph entity model.
//!
//! Snapshots of nodes and relationships as the transactional graph store
//! exposes them at commit time. Only the data needed to build index documents
//! is carried: ids, current labels or relationship type, endpoints and the
//! current property snapshot.

use indexmap::IndexMap;
use serde_json::{Number, Value};
use std::mem::discriminant;

use crate::errors::DocumentError;

/// Identifier of a node or relationship inside the graph store.
pub type EntityId = u64;

/// Property key/value mapping in the order the graph store reports it.
pub type PropertyMap = IndexMap<String, PropertyValue>;

/// A property value as stored on a node or relationship.
///
/// The store only accepts scalars and homogeneous arrays of scalars.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Array(Vec<PropertyValue>),
}

impl PropertyValue {
    /// Convert the value into its JSON document form.
    ///
    /// Fails for values JSON cannot carry (non-finite floats) and for arrays
    /// that are nested or mix element types.
    pub fn to_json(&self, key: &str) -> Result<Value, DocumentError> {
        match self {
            PropertyValue::String(s) => Ok(Value::String(s.clone())),
            PropertyValue::Integer(i) => Ok(Value::Number((*i).into())),
            PropertyValue::Float(f) => Number::from_f64(*f).map(Value::Number).ok_or_else(|| {
                DocumentError::unreadable_property(key, format!("non-finite float {}", f))
            }),
            PropertyValue::Boolean(b) => Ok(Value::Bool(*b)),
            PropertyValue::Array(items) => {
                if let Some(first) = items.first() {
                    for item in items {
                        if matches!(item, PropertyValue::Array(_)) {
                            return Err(DocumentError::unreadable_property(
                                key,
                                "nested arrays are not supported",
                            ));
                        }
                        if discriminant(item) != discriminant(first) {
                            return Err(DocumentError::unreadable_property(
                                key,
                                "array elements must share one type",
                            ));
                        }
                    }
                }
                items
                    .iter()
                    .map(|item| item.to_json(key))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Value::Array)
            }
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::String(value)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        PropertyValue::Integer(value.into())
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Integer(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Float(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Boolean(value)
    }
}

/// A node with its current labels and properties.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Node {
    pub id: EntityId,
    pub labels: Vec<String>,
    pub properties: PropertyMap,
}

impl Node {
    /// Create a node without labels or properties.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    /// Add a label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    /// Set a property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// A relationship with its type, endpoints and current properties.
#[derive(Debug, Clone, PartialEq)]
pub struct Relationship {
    pub id: EntityId,
    pub rel_type: String,
    pub start_node_id: EntityId,
    pub end_node_id: EntityId,
    pub properties: PropertyMap,
}

impl Relationship {
    /// Create a relationship without properties.
    pub fn new(
        id: EntityId,
        rel_type: impl Into<String>,
        start_node_id: EntityId,
        end_node_id: EntityId,
    ) -> Self {
        Self {
            id,
            rel_type: rel_type.into(),
            start_node_id,
            end_node_id,
            properties: PropertyMap::new(),
        }
    }

    /// Set a property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// Borrowed view over either kind of graph entity.
#[derive(Debug, Clone, Copy)]
pub enum Entity<'a> {
    Node(&'a Node),
    Relationship(&'a Relationship),
}

impl<'a> Entity<'a> {
    /// The entity id.
    pub fn id(&self) -> EntityId {
        match self {
            Entity::Node(node) => node.id,
            Entity::Relationship(rel) => rel.id,
        }
    }

    /// The current property snapshot.
    pub fn properties(&self) -> &'a PropertyMap {
        match self {
            Entity::Node(node) => &node.properties,
            Entity::Relationship(rel) => &rel.properties,
        }
    }
}

impl<'a> From<&'a Node> for Entity<'a> {
    fn from(node: &'a Node) -> Self {
        Entity::Node(node)
    }
}

impl<'a> From<&'a Relationship> for Entity<'a> {
    fn from(rel: &'a Relationship) -> Self {
        Entity::Relationship(rel)
    }
}
