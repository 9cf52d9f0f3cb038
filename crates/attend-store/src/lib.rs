//! Storage layer for the attendance tracker.
//!
//! The [`RecordStore`] trait is the minimum document-store contract the
//! rest of the system needs: find by filter, insert, and merge-update
//! by identifier, over named collections with insertion order as store
//! order. The shipped backend is [`DocumentStore`], which keeps JSON
//! documents in a single `rusqlite` table; [`MemoryStore`] is a
//! `Vec`-backed fake with the same semantics for tests.
//!
//! # Concurrency
//!
//! The typed operations in [`ops`] use check-then-act read/update
//! logic with no store-level conditional upsert. This is safe only
//! under the documented single-session assumption: a second concurrent
//! client could violate the one-record-per-day invariant. A
//! multi-client extension would need an atomic conditional insert
//! keyed on (`name`, `date`).

mod memory;
mod ops;
mod sqlite;

use serde_json::{Map, Value};
use thiserror::Error;

pub use memory::MemoryStore;
pub use ops::{
    ATTENDANCE, AttendanceError, DirectoryError, EMPLOYEES, MarkOutcome, add_employee,
    list_attendance, list_employees, mark_attendance,
};
pub use sqlite::DocumentStore;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// A stored document failed to parse.
    #[error("invalid document {id}: {source}")]
    InvalidDocument {
        id: String,
        #[source]
        source: serde_json::Error,
    },
    /// An update targeted an identifier with no document behind it.
    #[error("no document {id} in collection {collection}")]
    MissingDocument { collection: String, id: String },
    /// Document bodies and update fields must be JSON objects.
    #[error("document body must be a JSON object")]
    NotAnObject,
}

/// A store-generated document identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for DocumentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stored document together with its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: DocumentId,
    pub body: Value,
}

/// A field-equality filter over document bodies.
///
/// Every named field must be present and equal for a document to
/// match; an empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    fields: Map<String, Value>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field-equality condition.
    #[must_use]
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Whether the given document body satisfies every condition.
    pub fn matches(&self, body: &Value) -> bool {
        self.fields
            .iter()
            .all(|(field, expected)| body.get(field) == Some(expected))
    }
}

/// The document-store contract.
///
/// Store order is insertion order; identifiers are store-generated.
pub trait RecordStore {
    /// Returns the first document in `collection` matching `filter`.
    fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<Document>, StoreError>;

    /// Returns all documents in `collection` matching `filter`
    /// (all documents when `filter` is `None`), in store order.
    fn find_all(
        &self,
        collection: &str,
        filter: Option<&Filter>,
    ) -> Result<Vec<Document>, StoreError>;

    /// Inserts a document body and returns its generated identifier.
    fn insert_one(&mut self, collection: &str, body: Value) -> Result<DocumentId, StoreError>;

    /// Merges `fields` into the document with the given identifier.
    fn update_one(
        &mut self,
        collection: &str,
        id: &DocumentId,
        fields: Value,
    ) -> Result<(), StoreError>;
}
