//! In-memory fake store.

use std::collections::HashMap;

use serde_json::Value;
use uuid::Uuid;

use crate::{Document, DocumentId, Filter, RecordStore, StoreError};

/// A `Vec`-backed [`RecordStore`] with the same semantics as the
/// SQLite backend. Intended for tests that drive the typed operations
/// or the session loop without touching disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: HashMap<String, Vec<Document>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<Document>, StoreError> {
        Ok(self
            .collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| filter.matches(&doc.body)))
            .cloned())
    }

    fn find_all(
        &self,
        collection: &str,
        filter: Option<&Filter>,
    ) -> Result<Vec<Document>, StoreError> {
        let docs = self.collections.get(collection).cloned().unwrap_or_default();
        Ok(match filter {
            None => docs,
            Some(filter) => docs
                .into_iter()
                .filter(|doc| filter.matches(&doc.body))
                .collect(),
        })
    }

    fn insert_one(&mut self, collection: &str, body: Value) -> Result<DocumentId, StoreError> {
        if !body.is_object() {
            return Err(StoreError::NotAnObject);
        }
        let id = DocumentId::from(Uuid::new_v4().to_string());
        self.collections
            .entry(collection.to_string())
            .or_default()
            .push(Document {
                id: id.clone(),
                body,
            });
        Ok(id)
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
        let doc = self
            .collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|doc| &doc.id == id))
            .ok_or_else(|| StoreError::MissingDocument {
                collection: collection.to_string(),
                id: id.as_str().to_string(),
            })?;
        let Some(object) = doc.body.as_object_mut() else {
            return Err(StoreError::NotAnObject);
        };
        for (field, value) in fields {
            object.insert(field, value);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn behaves_like_the_sqlite_backend() {
        let mut store = MemoryStore::new();
        for name in ["Asha", "Omar"] {
            store
                .insert_one("employees", json!({ "name": name }))
                .unwrap();
        }

        let all = store.find_all("employees", None).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].body["name"], "Asha");

        let filter = Filter::new().eq("name", "Omar");
        let found = store.find_one("employees", &filter).unwrap().unwrap();
        assert_eq!(found.body["name"], "Omar");

        store
            .update_one("employees", &found.id, json!({"name": "Omar", "desk": 4}))
            .unwrap();
        let found = store.find_one("employees", &filter).unwrap().unwrap();
        assert_eq!(found.body["desk"], 4);
    }

    #[test]
    fn update_one_rejects_unknown_id() {
        let mut store = MemoryStore::new();
        let id = DocumentId::from("missing".to_string());
        let result = store.update_one("employees", &id, json!({"name": "Asha"}));
        assert!(matches!(result, Err(StoreError::MissingDocument { .. })));
    }
}
