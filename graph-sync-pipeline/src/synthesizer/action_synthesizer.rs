//! Action synthesizer implementation.
//!
//! Transforms one transaction's [`ChangeSet`] into a [`SyncBatch`] holding at
//! most one action per target document.
//!
//! Categories are staged in a fixed order and every staged action overwrites
//! the earlier one for the same key:
//!
//! | order | nodes               | relationships       |
//! |-------|---------------------|---------------------|
//! | 1     | created             | created             |
//! | 2     | deleted             | deleted             |
//! | 3     | labels assigned     |                     |
//! | 4     | labels removed      |                     |
//! | 5     | properties assigned | properties assigned |
//! | 6     | properties removed  | properties removed  |
//!
//! Label assignment and property removal re-check the transaction's deletion
//! set, so an entity deleted in the same transaction always ends as a delete.
//! A removed label always deletes the node document, even when the node
//! survives the transaction.

use tracing::{debug, instrument};

use crate::config::SyncConfig;
use crate::errors::PipelineError;
use graph_sync_shared::{ChangeSet, DocumentAction, Entity, SyncBatch};

/// Synthesizer that turns change sets into deduplicated document actions.
///
/// Pure: it performs no I/O and keeps no state between transactions.
#[derive(Debug, Clone)]
pub struct ActionSynthesizer {
    index_name: String,
    sync_nodes: bool,
    sync_relationships: bool,
}

impl ActionSynthesizer {
    /// Create a synthesizer for the configured index and entity kinds.
    pub fn new(config: &SyncConfig) -> Self {
        Self {
            index_name: config.index_name.clone(),
            sync_nodes: config.sync_nodes,
            sync_relationships: config.sync_relationships,
        }
    }

    /// Synthesize the actions for one transaction.
    ///
    /// # Arguments
    ///
    /// * `changes` - The transaction's change set
    ///
    /// # Returns
    ///
    /// * `Ok(SyncBatch)` - The actions in staging order; empty when nothing tracked changed
    /// * `Err(PipelineError)` - If an entity holds a property that cannot be indexed
    #[instrument(skip(self, changes), fields(index = %self.index_name))]
    pub fn synthesize(&self, changes: &ChangeSet) -> Result<SyncBatch, PipelineError> {
        let mut batch = SyncBatch::new();

        if self.sync_nodes {
            self.collect_changed_nodes(&mut batch, changes)?;
        }

        if self.sync_relationships {
            self.collect_changed_relationships(&mut batch, changes)?;
        }

        debug!(actions = batch.len(), "Synthesized document actions");
        Ok(batch)
    }

    fn collect_changed_nodes(
        &self,
        batch: &mut SyncBatch,
        changes: &ChangeSet,
    ) -> Result<(), PipelineError> {
        for node in changes.created_nodes() {
            batch.stage(self.index(Entity::from(node))?);
        }

        for node in changes.deleted_nodes() {
            batch.stage(self.delete(Entity::from(node)));
        }

        for entry in changes.assigned_labels() {
            let node = Entity::from(&entry.node);
            batch.stage(self.delete_or_index(node, changes.is_deleted(node))?);
        }

        for entry in changes.removed_labels() {
            batch.stage(self.delete(Entity::from(&entry.node)));
        }

        for entry in changes.assigned_node_properties() {
            batch.stage(self.index(Entity::from(&entry.entity))?);
        }

        for entry in changes.removed_node_properties() {
            let node = Entity::from(&entry.entity);
            batch.stage(self.delete_or_index(node, changes.is_deleted(node))?);
        }

        Ok(())
    }

    fn collect_changed_relationships(
        &self,
        batch: &mut SyncBatch,
        changes: &ChangeSet,
    ) -> Result<(), PipelineError> {
        for relationship in changes.created_relationships() {
            batch.stage(self.index(Entity::from(relationship))?);
        }

        for relationship in changes.deleted_relationships() {
            batch.stage(self.delete(Entity::from(relationship)));
        }

        for entry in changes.assigned_relationship_properties() {
            batch.stage(self.index(Entity::from(&entry.entity))?);
        }

        for entry in changes.removed_relationship_properties() {
            let relationship = Entity::from(&entry.entity);
            batch.stage(self.delete_or_index(relationship, changes.is_deleted(relationship))?);
        }

        Ok(())
    }

    fn index(&self, entity: Entity<'_>) -> Result<DocumentAction, PipelineError> {
        Ok(DocumentAction::index(&self.index_name, entity)?)
    }

    fn delete(&self, entity: Entity<'_>) -> DocumentAction {
        DocumentAction::delete(&self.index_name, entity)
    }

    fn delete_or_index(
        &self,
        entity: Entity<'_>,
        deleted: bool,
    ) -> Result<DocumentAction, PipelineError> {
        if deleted {
            Ok(self.delete(entity))
        } else {
            self.index(entity)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graph_sync_shared::{
        node_type_name, relationship_type_name, ActionKey, Node, PropertyEntry, Relationship,
    };
    use serde_json::json;

    fn synthesizer(sync_nodes: bool, sync_relationships: bool) -> ActionSynthesizer {
        ActionSynthesizer::new(&SyncConfig::new("idx", sync_nodes, sync_relationships, false))
    }

    fn node_key(id: &str) -> ActionKey {
        ActionKey {
            index: "idx".to_string(),
            doc_type: node_type_name("idx"),
            id: id.to_string(),
        }
    }

    fn relationship_key(id: &str) -> ActionKey {
        ActionKey {
            index: "idx".to_string(),
            doc_type: relationship_type_name("idx"),
            id: id.to_string(),
        }
    }

    fn index_body(action: &DocumentAction) -> serde_json::Value {
        match action {
            DocumentAction::Index { body, .. } => body.to_value(),
            DocumentAction::Delete { .. } => panic!("expected an index action"),
        }
    }

    #[test]
    fn test_created_node_is_indexed() {
        let alice = Node::new(1).with_label("Person").with_property("name", "Alice");
        let changes = ChangeSet::new().with_created_node(alice);

        let batch = synthesizer(true, false).synthesize(&changes).unwrap();

        assert_eq!(batch.len(), 1);
        let action = batch.get(&node_key("1")).unwrap();
        assert!(action.is_index());
        assert_eq!(
            index_body(action),
            json!({"id": "1", "properties": {"name": "Alice"}, "labels": ["Person"]})
        );
    }

    #[test]
    fn test_created_then_deleted_node_is_deleted() {
        let node = Node::new(2);
        let changes = ChangeSet::new()
            .with_created_node(node.clone())
            .with_deleted_node(node);

        let batch = synthesizer(true, false).synthesize(&changes).unwrap();

        assert_eq!(batch.len(), 1);
        assert_eq!(
            batch.get(&node_key("2")),
            Some(&DocumentAction::Delete {
                index: "idx".to_string(),
                doc_type: "type_node_idx".to_string(),
                id: "2".to_string(),
            })
        );
    }

    #[test]
    fn test_created_relationship_is_indexed() {
        let knows = Relationship::new(5, "KNOWS", 1, 2).with_property("since", 2020);
        let changes = ChangeSet::new().with_created_relationship(knows);

        let batch = synthesizer(false, true).synthesize(&changes).unwrap();

        assert_eq!(batch.len(), 1);
        let action = batch.get(&relationship_key("5")).unwrap();
        assert_eq!(
            index_body(action),
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
    fn test_removed_property_reindexes_live_node() {
        // Snapshot after the removal: only "name" is left.
        let node = Node::new(3).with_label("Person").with_property("name", "Carol");
        let changes = ChangeSet::new().with_removed_node_property(PropertyEntry::removed(
            node,
            "age",
            Some(41.into()),
        ));

        let batch = synthesizer(true, false).synthesize(&changes).unwrap();

        let action = batch.get(&node_key("3")).unwrap();
        assert_eq!(
            index_body(action),
            json!({"id": "3", "properties": {"name": "Carol"}, "labels": ["Person"]})
        );
    }

    #[test]
    fn test_removed_property_on_deleted_node_is_delete() {
        let node = Node::new(4).with_property("name", "Dave");
        let changes = ChangeSet::new()
            .with_deleted_node(node.clone())
            .with_removed_node_property(PropertyEntry::removed(node, "name", Some("Dave".into())));

        let batch = synthesizer(true, false).synthesize(&changes).unwrap();

        assert_eq!(batch.len(), 1);
        assert!(batch.get(&node_key("4")).unwrap().is_delete());
    }

    #[test]
    fn test_removed_property_on_deleted_relationship_is_delete() {
        let rel = Relationship::new(8, "OWNS", 1, 2).with_property("since", 2001);
        let changes = ChangeSet::new()
            .with_deleted_relationship(rel.clone())
            .with_removed_relationship_property(PropertyEntry::removed(rel, "since", None));

        let batch = synthesizer(false, true).synthesize(&changes).unwrap();

        assert!(batch.get(&relationship_key("8")).unwrap().is_delete());
    }

    #[test]
    fn test_removed_label_deletes_live_node() {
        let node = Node::new(6).with_label("Employee");
        let changes = ChangeSet::new()
            .with_assigned_label(node.clone(), "Employee")
            .with_removed_label(node, "Contractor");

        let batch = synthesizer(true, false).synthesize(&changes).unwrap();

        assert_eq!(batch.len(), 1);
        assert!(batch.get(&node_key("6")).unwrap().is_delete());
    }

    #[test]
    fn test_assigned_label_on_deleted_node_is_delete() {
        let node = Node::new(7).with_label("Person");
        let changes = ChangeSet::new()
            .with_assigned_label(node.clone(), "Person")
            .with_deleted_node(node);

        let batch = synthesizer(true, false).synthesize(&changes).unwrap();

        assert!(batch.get(&node_key("7")).unwrap().is_delete());
    }

    #[test]
    fn test_assigned_label_on_live_node_is_index() {
        let node = Node::new(7).with_label("Person");
        let changes = ChangeSet::new().with_assigned_label(node, "Person");

        let batch = synthesizer(true, false).synthesize(&changes).unwrap();

        assert!(batch.get(&node_key("7")).unwrap().is_index());
    }

    #[test]
    fn test_one_action_per_entity_across_categories() {
        let node = Node::new(9).with_label("Person").with_property("name", "Eve");
        let changes = ChangeSet::new()
            .with_created_node(node.clone())
            .with_assigned_label(node.clone(), "Person")
            .with_assigned_node_property(PropertyEntry::assigned(
                node.clone(),
                "name",
                None,
                "Eve".into(),
            ))
            .with_removed_node_property(PropertyEntry::removed(node, "nickname", None));

        let batch = synthesizer(true, false).synthesize(&changes).unwrap();

        assert_eq!(batch.len(), 1);
        assert!(batch.get(&node_key("9")).unwrap().is_index());
    }

    #[test]
    fn test_first_appearance_order_is_kept() {
        let a = Node::new(1);
        let b = Node::new(2);
        let c = Node::new(3);
        let changes = ChangeSet::new()
            .with_created_node(a.clone())
            .with_created_node(b)
            .with_deleted_node(c)
            .with_removed_label(a, "Person");

        let ids: Vec<String> = synthesizer(true, false)
            .synthesize(&changes)
            .unwrap()
            .into_actions()
            .into_iter()
            .map(|action| action.key().id)
            .collect();

        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_type_namespacing() {
        let changes = ChangeSet::new()
            .with_created_node(Node::new(1))
            .with_deleted_node(Node::new(2))
            .with_created_relationship(Relationship::new(1, "KNOWS", 1, 2))
            .with_deleted_relationship(Relationship::new(2, "KNOWS", 2, 1));

        let synthesizer =
            ActionSynthesizer::new(&SyncConfig::new("foo", true, true, false));
        let batch = synthesizer.synthesize(&changes).unwrap();

        assert_eq!(batch.len(), 4);
        let types: Vec<String> = batch.iter().map(|action| action.key().doc_type).collect();
        assert_eq!(
            types,
            vec![
                "type_node_foo",
                "type_node_foo",
                "type_relationship_foo",
                "type_relationship_foo"
            ]
        );
    }

    #[test]
    fn test_untracked_kinds_yield_empty_batch() {
        let changes = ChangeSet::new()
            .with_created_node(Node::new(1))
            .with_created_relationship(Relationship::new(2, "KNOWS", 1, 1));

        assert!(synthesizer(false, false).synthesize(&changes).unwrap().is_empty());
        assert!(synthesizer(true, true).synthesize(&ChangeSet::new()).unwrap().is_empty());

        let only_nodes = synthesizer(true, false).synthesize(&changes).unwrap();
        assert_eq!(only_nodes.len(), 1);
        assert!(only_nodes.get(&node_key("1")).is_some());
    }

    #[test]
    fn test_unreadable_property_fails_synthesis() {
        let node = Node::new(1).with_property("score", f64::NAN);
        let changes = ChangeSet::new().with_created_node(node);

        let result = synthesizer(true, false).synthesize(&changes);

        assert!(matches!(result, Err(PipelineError::SynthesisError(_))));
    }

    #[test]
    fn test_deleted_node_with_unreadable_property_still_deletes() {
        let node = Node::new(1).with_property("score", f64::NAN);
        let changes = ChangeSet::new()
            .with_deleted_node(node.clone())
            .with_removed_node_property(PropertyEntry::removed(node, "score", None));

        let batch = synthesizer(true, false).synthesize(&changes).unwrap();

        assert!(batch.get(&node_key("1")).unwrap().is_delete());
    }
}
