//! Record types submitted to the store
//!
//! Field names serialize in `snake_case` to match the JSON contract of the
//! store's `upsert_*` procedures. Generators build plain records without ids;
//! the batch writer wraps them as [`Persisted`] once the store has assigned
//! identifiers. Ids are never invented locally.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Store-assigned identifier.
pub type Id = i64;

/// The top-level container scoping every generated entity in a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaceRecord {
    pub url: String,
    pub name: String,
    pub platform: String,
}

impl Default for SpaceRecord {
    fn default() -> Self {
        Self {
            url: "test".to_string(),
            name: "test".to_string(),
            platform: "Roam".to_string(),
        }
    }
}

/// A platform account; author of all other generated entities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountRecord {
    pub account_local_id: String,
    pub name: String,
}

/// Inline document payload carried by a content row so the store can create
/// the backing document in the same call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentInline {
    pub source_local_id: String,
    pub created: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    pub author_id: Id,
}

/// Authored text payload backing a concept's human-readable representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentRecord {
    pub text: String,
    pub source_local_id: String,
    pub created: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    pub space_id: Id,
    pub author_id: Id,
    pub document_inline: DocumentInline,
}

/// Role list carried by a schema concept's literal content.
///
/// Node-type schemas serialize this as `{}`; relation-type schemas list their
/// declared role names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LiteralContent {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,
}

/// Generic graph entity: a schema (type definition), a node instance, or a
/// relation instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConceptRecord {
    pub name: String,
    pub created: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    pub space_id: Id,
    pub author_id: Id,
    /// Content row representing this concept, when one was generated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub represented_by_id: Option<Id>,
    /// Schema concept this instance conforms to; absent on schemas themselves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_id: Option<Id>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_schema: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub literal_content: Option<LiteralContent>,
    /// Role name -> node id bindings; present only on relation instances.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_content: Option<BTreeMap<String, Id>>,
}

impl ConceptRecord {
    /// Whether this concept is a relation instance.
    pub fn is_relation_instance(&self) -> bool {
        self.reference_content.is_some()
    }
}

/// A record plus the identifier the store assigned to it.
#[derive(Debug, Clone)]
pub struct Persisted<T> {
    pub id: Id,
    pub record: T,
}

impl<T> Persisted<T> {
    pub fn new(id: Id, record: T) -> Self {
        Self { id, record }
    }
}
