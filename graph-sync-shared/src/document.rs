//! Index documents and the actions that write them.
//!
//! Every graph entity maps to one document in the target index. The document
//! type namespaces node-derived and relationship-derived documents per index,
//! so several logical indices can share one store endpoint.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::entity::{Entity, EntityId};
use crate::errors::DocumentError;

const NODE_TYPE_PREFIX: &str = "type_node_";
const RELATIONSHIP_TYPE_PREFIX: &str = "type_relationship_";

/// Document type holding the nodes of `index`.
pub fn node_type_name(index: &str) -> String {
    format!("{}{}", NODE_TYPE_PREFIX, index)
}

/// Document type holding the relationships of `index`.
pub fn relationship_type_name(index: &str) -> String {
    format!("{}{}", RELATIONSHIP_TYPE_PREFIX, index)
}

/// The kind of graph entity a document was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Node,
    Relationship,
}

impl DocumentKind {
    /// The namespaced document type for this kind within `index`.
    pub fn type_name(&self, index: &str) -> String {
        match self {
            DocumentKind::Node => node_type_name(index),
            DocumentKind::Relationship => relationship_type_name(index),
        }
    }
}

impl From<Entity<'_>> for DocumentKind {
    fn from(entity: Entity<'_>) -> Self {
        match entity {
            Entity::Node(_) => DocumentKind::Node,
            Entity::Relationship(_) => DocumentKind::Relationship,
        }
    }
}

/// Identifies one target document: (index, document type, document id).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionKey {
    pub index: String,
    pub doc_type: String,
    pub id: String,
}

impl ActionKey {
    /// Key of the document derived from `entity` in `index`.
    pub fn for_entity(index: &str, entity: Entity<'_>) -> Self {
        Self {
            index: index.to_string(),
            doc_type: DocumentKind::from(entity).type_name(index),
            id: document_id(entity.id()),
        }
    }
}

/// Document ids are entity ids rendered as strings.
pub fn document_id(id: EntityId) -> String {
    id.to_string()
}

/// Kind-specific fields of a document body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EntityFields {
    Node {
        labels: Vec<String>,
    },
    Relationship {
        #[serde(rename = "type")]
        rel_type: String,
        #[serde(rename = "startNodeId")]
        start_node_id: String,
        #[serde(rename = "endNodeId")]
        end_node_id: String,
    },
}

/// The JSON document stored for an entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentBody {
    pub id: String,
    pub properties: Map<String, Value>,
    #[serde(flatten)]
    pub fields: EntityFields,
}

impl DocumentBody {
    /// Build the document for `entity` from its current snapshot.
    pub fn from_entity(entity: Entity<'_>) -> Result<Self, DocumentError> {
        let mut properties = Map::new();
        for (key, value) in entity.properties() {
            properties.insert(key.clone(), value.to_json(key)?);
        }

        let fields = match entity {
            Entity::Node(node) => EntityFields::Node {
                labels: node.labels.clone(),
            },
            Entity::Relationship(rel) => EntityFields::Relationship {
                rel_type: rel.rel_type.clone(),
                start_node_id: document_id(rel.start_node_id),
                end_node_id: document_id(rel.end_node_id),
            },
        };

        Ok(Self {
            id: document_id(entity.id()),
            properties,
            fields,
        })
    }

    /// The body as a JSON value.
    pub fn to_value(&self) -> Value {
        // Serializing string-keyed maps and plain strings cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// A write against the index: either (re)index a full document or delete it.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentAction {
    Index {
        index: String,
        doc_type: String,
        id: String,
        body: DocumentBody,
    },
    Delete {
        index: String,
        doc_type: String,
        id: String,
    },
}

impl DocumentAction {
    /// Index the full current snapshot of `entity`.
    pub fn index(index: &str, entity: Entity<'_>) -> Result<Self, DocumentError> {
        let key = ActionKey::for_entity(index, entity);
        Ok(DocumentAction::Index {
            index: key.index,
            doc_type: key.doc_type,
            id: key.id,
            body: DocumentBody::from_entity(entity)?,
        })
    }

    /// Delete the document of `entity`.
    pub fn delete(index: &str, entity: Entity<'_>) -> Self {
        let key = ActionKey::for_entity(index, entity);
        DocumentAction::Delete {
            index: key.index,
            doc_type: key.doc_type,
            id: key.id,
        }
    }

    pub fn key(&self) -> ActionKey {
        match self {
            DocumentAction::Index {
                index, doc_type, id, ..
            }
            | DocumentAction::Delete {
                index, doc_type, id,
            } => ActionKey {
                index: index.clone(),
                doc_type: doc_type.clone(),
                id: id.clone(),
            },
        }
    }

    pub fn is_index(&self) -> bool {
        matches!(self, DocumentAction::Index { .. })
    }

    pub fn is_delete(&self) -> bool {
        matches!(self, DocumentAction::Delete { .. })
    }
}

/// The deduplicated actions of one transaction.
///
/// Holds at most one action per [`ActionKey`]. Staging an action for a key
/// that is already present replaces the action but keeps the key at its
/// first-insertion position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncBatch {
    actions: IndexMap<ActionKey, DocumentAction>,
}

impl SyncBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage `action`, overwriting any earlier action for the same key.
    pub fn stage(&mut self, action: DocumentAction) {
        self.actions.insert(action.key(), action);
    }

    pub fn get(&self, key: &ActionKey) -> Option<&DocumentAction> {
        self.actions.get(key)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Actions in batch order.
    pub fn iter(&self) -> impl Iterator<Item = &DocumentAction> {
        self.actions.values()
    }

    pub fn into_actions(self) -> Vec<DocumentAction> {
        self.actions.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Node, Relationship};
    use serde_json::json;

    #[test]
    fn test_type_names() {
        assert_eq!(node_type_name("foo"), "type_node_foo");
        assert_eq!(relationship_type_name("foo"), "type_relationship_foo");
        assert_eq!(DocumentKind::Relationship.type_name("bar"), "type_relationship_bar");
    }

    #[test]
    fn test_node_body() {
        let node = Node::new(1).with_label("Person").with_property("name", "Alice");
        let body = DocumentBody::from_entity(Entity::from(&node)).unwrap();

        assert_eq!(
            body.to_value(),
            json!({"id": "1", "properties": {"name": "Alice"}, "labels": ["Person"]})
        );
    }

    #[test]
    fn test_relationship_body() {
        let rel = Relationship::new(5, "KNOWS", 1, 2).with_property("since", 2020);
        let body = DocumentBody::from_entity(Entity::from(&rel)).unwrap();

        assert_eq!(
            body.to_value(),
            json!({
                "id": "5",
                "properties": {"since": 2020},
                "type": "KNOWS",
                "startNodeId": "1",
                "endNodeId": "2"
            })
        );
    }

    #[test]
    fn test_body_keeps_property_order() {
        let node = Node::new(1)
            .with_property("z", 1)
            .with_property("a", 2)
            .with_property("m", 3);
        let body = DocumentBody::from_entity(Entity::from(&node)).unwrap();

        let keys: Vec<&String> = body.properties.keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_unreadable_property_fails_index_action() {
        let node = Node::new(1).with_property("score", f64::INFINITY);
        assert!(DocumentAction::index("idx", Entity::from(&node)).is_err());
        assert!(DocumentAction::delete("idx", Entity::from(&node)).is_delete());
    }

    #[test]
    fn test_batch_overwrites_in_place() {
        let a = Node::new(1);
        let b = Node::new(2);
        let mut batch = SyncBatch::new();

        batch.stage(DocumentAction::index("idx", Entity::from(&a)).unwrap());
        batch.stage(DocumentAction::index("idx", Entity::from(&b)).unwrap());
        batch.stage(DocumentAction::delete("idx", Entity::from(&a)));

        assert_eq!(batch.len(), 2);
        let actions = batch.into_actions();
        assert!(actions[0].is_delete());
        assert_eq!(actions[0].key().id, "1");
        assert!(actions[1].is_index());
    }

    #[test]
    fn test_node_and_relationship_with_same_id_do_not_collide() {
        let node = Node::new(1);
        let rel = Relationship::new(1, "KNOWS", 1, 1);
        let mut batch = SyncBatch::new();

        batch.stage(DocumentAction::delete("idx", Entity::from(&node)));
        batch.stage(DocumentAction::delete("idx", Entity::from(&rel)));

        assert_eq!(batch.len(), 2);
    }
}
