//! SQLite-backed document store.
//!
//! Documents live in one `documents` table: an autoincrement sequence
//! preserves insertion order, the `id` column holds the generated
//! UUID, and the body is JSON in a TEXT column. Filters are applied in
//! Rust after reading a collection, which is more than enough at this
//! system's scale (one document per employee per day).

use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};
use serde_json::Value;
use uuid::Uuid;

use crate::{Document, DocumentId, Filter, RecordStore, StoreError};

/// Document store over a `rusqlite` connection.
///
/// `Connection` is `Send` but not `Sync`; this type is meant for the
/// single-session use the system assumes.
pub struct DocumentStore {
    conn: Connection,
}

impl DocumentStore {
    /// Opens a store at the given path, creating it if necessary.
    ///
    /// The schema is initialized on first open.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init()?;
        Ok(store)
    }

    /// Opens an in-memory store.
    ///
    /// Useful for testing. The store is destroyed when the connection
    /// closes.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init()?;
        Ok(store)
    }

    /// Initializes the schema. Idempotent.
    fn init(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS documents (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                collection TEXT NOT NULL,
                body TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_documents_collection ON documents(collection);
            ",
        )?;
        Ok(())
    }

    fn load_collection(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT id, body
            FROM documents
            WHERE collection = ?
            ORDER BY seq ASC
            ",
        )?;
        let rows = stmt.query_map([collection], |row| {
            let id: String = row.get(0)?;
            let body: String = row.get(1)?;
            Ok((id, body))
        })?;

        let mut documents = Vec::new();
        for row in rows {
            let (id, body) = row?;
            let body: Value =
                serde_json::from_str(&body).map_err(|source| StoreError::InvalidDocument {
                    id: id.clone(),
                    source,
                })?;
            documents.push(Document {
                id: DocumentId::from(id),
                body,
            });
        }
        Ok(documents)
    }
}

impl RecordStore for DocumentStore {
    fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<Document>, StoreError> {
        let documents = self.load_collection(collection)?;
        Ok(documents.into_iter().find(|doc| filter.matches(&doc.body)))
    }

    fn find_all(
        &self,
        collection: &str,
        filter: Option<&Filter>,
    ) -> Result<Vec<Document>, StoreError> {
        let documents = self.load_collection(collection)?;
        Ok(match filter {
            None => documents,
            Some(filter) => documents
                .into_iter()
                .filter(|doc| filter.matches(&doc.body))
                .collect(),
        })
    }

    fn insert_one(&mut self, collection: &str, body: Value) -> Result<DocumentId, StoreError> {
        if !body.is_object() {
            return Err(StoreError::NotAnObject);
        }
        let id = Uuid::new_v4().to_string();
        self.conn.execute(
            "INSERT INTO documents (id, collection, body) VALUES (?, ?, ?)",
            params![id, collection, body.to_string()],
        )?;
        tracing::debug!(collection, %id, "inserted document");
        Ok(DocumentId::from(id))
    }

    fn update_one(
        &mut self,
        collection: &str,
        id: &DocumentId,
        fields: Value,
    ) -> Result<(), StoreError> {
        let Value::Object(fields) = fields else {
            return Err(StoreError::NotAnObject);
        };

        let existing: Option<String> = self
            .conn
            .query_row(
                "SELECT body FROM documents WHERE collection = ? AND id = ?",
                params![collection, id.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        let Some(body) = existing else {
            return Err(StoreError::MissingDocument {
                collection: collection.to_string(),
                id: id.as_str().to_string(),
            });
        };

        let mut body: Value =
            serde_json::from_str(&body).map_err(|source| StoreError::InvalidDocument {
                id: id.as_str().to_string(),
                source,
            })?;
        let Some(object) = body.as_object_mut() else {
            return Err(StoreError::NotAnObject);
        };
        for (field, value) in fields {
            object.insert(field, value);
        }

        self.conn.execute(
            "UPDATE documents SET body = ? WHERE collection = ? AND id = ?",
            params![body.to_string(), collection, id.as_str()],
        )?;
        tracing::debug!(collection, id = %id, "updated document");
        Ok(())
    }
}
