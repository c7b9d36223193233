//! Bulk request and response types.
//!
//! A bulk request is a sequence of directives, each one metadata line
//! optionally followed by a document line:
//!
//! ```text
//! {"index":{"_index":"idx","_type":"type_node_idx","_id":"1"}}
//! {"id":"1","properties":{...},"labels":[...]}
//! {"delete":{"_index":"idx","_type":"type_node_idx","_id":"2"}}
//! ```

use serde_json::{json, Value};

use crate::errors::SearchIndexError;
use graph_sync_shared::{DocumentAction, SyncBatch};

/// How many failed items `BulkResponse::error_message` spells out.
const MAX_REPORTED_ITEM_ERRORS: usize = 3;

/// A single directive of a bulk request.
#[derive(Debug, Clone, PartialEq)]
pub enum BulkOperation {
    Index {
        index: String,
        doc_type: String,
        id: String,
        document: Value,
    },
    Delete {
        index: String,
        doc_type: String,
        id: String,
    },
}

impl BulkOperation {
    /// The wire lines of this directive.
    pub fn lines(&self) -> Vec<Value> {
        match self {
            BulkOperation::Index {
                index,
                doc_type,
                id,
                document,
            } => vec![
                json!({"index": {"_index": index, "_type": doc_type, "_id": id}}),
                document.clone(),
            ],
            BulkOperation::Delete {
                index,
                doc_type,
                id,
            } => vec![json!({"delete": {"_index": index, "_type": doc_type, "_id": id}})],
        }
    }
}

impl From<DocumentAction> for BulkOperation {
    fn from(action: DocumentAction) -> Self {
        match action {
            DocumentAction::Index {
                index,
                doc_type,
                id,
                body,
            } => BulkOperation::Index {
                index,
                doc_type,
                id,
                document: body.to_value(),
            },
            DocumentAction::Delete {
                index,
                doc_type,
                id,
            } => BulkOperation::Delete {
                index,
                doc_type,
                id,
            },
        }
    }
}

/// An ordered set of directives sent in one round trip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkRequest {
    pub operations: Vec<BulkOperation>,
}

impl BulkRequest {
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// All wire lines in directive order.
    pub fn body_lines(&self) -> Vec<Value> {
        self.operations.iter().flat_map(BulkOperation::lines).collect()
    }
}

impl From<SyncBatch> for BulkRequest {
    fn from(batch: SyncBatch) -> Self {
        Self {
            operations: batch.into_actions().into_iter().map(Into::into).collect(),
        }
    }
}

/// Outcome of a single directive.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkItemResult {
    /// The directive name (`index` or `delete`).
    pub operation: String,
    pub index: Option<String>,
    pub id: Option<String>,
    pub status: u16,
    /// Store-reported error, if the item failed.
    pub error: Option<String>,
}

impl BulkItemResult {
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }

    fn parse(item: &Value) -> Result<Self, SearchIndexError> {
        let (operation, detail) = item
            .as_object()
            .and_then(|obj| obj.iter().next())
            .ok_or_else(|| SearchIndexError::parse(format!("Malformed bulk item: {}", item)))?;

        let error = detail.get("error").map(describe_error);

        Ok(Self {
            operation: operation.clone(),
            index: detail.get("_index").and_then(Value::as_str).map(str::to_string),
            id: detail.get("_id").and_then(Value::as_str).map(str::to_string),
            status: detail
                .get("status")
                .and_then(Value::as_u64)
                .and_then(|s| u16::try_from(s).ok())
                .unwrap_or(0),
            error,
        })
    }
}

/// Render a store error value as `type: reason`, or verbatim if it is a string.
fn describe_error(error: &Value) -> String {
    match error {
        Value::String(s) => s.clone(),
        other => {
            let kind = other.get("type").and_then(Value::as_str).unwrap_or("error");
            let reason = other.get("reason").and_then(Value::as_str).unwrap_or("");
            format!("{}: {}", kind, reason)
        }
    }
}

/// The store's answer to a bulk request.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkResponse {
    /// HTTP status of the bulk call.
    pub status: u16,
    /// Milliseconds the store spent on the request.
    pub took: u64,
    /// The store's own "some item failed" flag.
    pub errors: bool,
    pub items: Vec<BulkItemResult>,
    /// Request-level error reported by the store, if any.
    pub message: Option<String>,
}

impl BulkResponse {
    /// Parse the JSON body returned by the `_bulk` endpoint.
    pub fn from_json(status: u16, body: &Value) -> Result<Self, SearchIndexError> {
        if !body.is_object() {
            return Err(SearchIndexError::parse(format!(
                "Bulk response is not an object: {}",
                body
            )));
        }

        let items = match body.get("items") {
            None => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(BulkItemResult::parse)
                .collect::<Result<Vec<_>, _>>()?,
            Some(other) => {
                return Err(SearchIndexError::parse(format!(
                    "Bulk response items is not an array: {}",
                    other
                )))
            }
        };

        Ok(Self {
            status,
            took: body.get("took").and_then(Value::as_u64).unwrap_or(0),
            errors: body.get("errors").and_then(Value::as_bool).unwrap_or(false),
            items,
            message: body.get("error").map(describe_error),
        })
    }

    /// Build the response for a reply with a non-success status.
    ///
    /// The body is parsed when it is a JSON object; otherwise the raw text is
    /// kept as the message.
    pub fn from_error_body(status: u16, raw: &str) -> Self {
        serde_json::from_str::<Value>(raw)
            .ok()
            .filter(Value::is_object)
            .and_then(|body| Self::from_json(status, &body).ok())
            .unwrap_or_else(|| Self {
                status,
                took: 0,
                errors: false,
                items: Vec::new(),
                message: Some(raw.trim().to_string()).filter(|m| !m.is_empty()),
            })
    }

    pub fn failed_items(&self) -> impl Iterator<Item = &BulkItemResult> {
        self.items.iter().filter(|item| item.is_failed())
    }

    /// True when the call succeeded and no item failed.
    pub fn is_succeeded(&self) -> bool {
        (200..300).contains(&self.status) && !self.errors && self.failed_items().next().is_none()
    }

    /// Describe what went wrong, or `None` for a clean response.
    pub fn error_message(&self) -> Option<String> {
        if !(200..300).contains(&self.status) {
            return Some(match &self.message {
                Some(message) => {
                    format!("Bulk request returned status {}: {}", self.status, message)
                }
                None => format!("Bulk request returned status {}", self.status),
            });
        }

        let failed: Vec<&BulkItemResult> = self.failed_items().collect();
        if failed.is_empty() {
            return self
                .errors
                .then(|| "Store reported bulk errors without item details".to_string());
        }

        let mut parts: Vec<String> = failed
            .iter()
            .take(MAX_REPORTED_ITEM_ERRORS)
            .map(|item| {
                format!(
                    "{} {}: {}",
                    item.operation,
                    item.id.as_deref().unwrap_or("?"),
                    item.error.as_deref().unwrap_or_default()
                )
            })
            .collect();
        if failed.len() > MAX_REPORTED_ITEM_ERRORS {
            parts.push(format!("and {} more", failed.len() - MAX_REPORTED_ITEM_ERRORS));
        }

        Some(format!(
            "{} of {} bulk items failed: {}",
            failed.len(),
            self.items.len(),
            parts.join("; ")
        ))
    }
}
