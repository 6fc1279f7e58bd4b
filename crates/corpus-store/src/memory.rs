//! In-memory document store for tests and embedders.

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;

use crate::{Category, DocumentStore, Error, Result};

/// Document store holding decoded trees directly in memory.
///
/// Ids within a category are listed in lexicographic order, matching the
/// stable-order contract of [`DocumentStore::list_ids`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: HashMap<Category, BTreeMap<String, Value>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a document.
    pub fn insert(&mut self, category: Category, id: impl Into<String>, document: Value) {
        self.documents
            .entry(category)
            .or_default()
            .insert(id.into(), document);
    }

    /// Builder-style [`MemoryStore::insert`].
    pub fn with(mut self, category: Category, id: impl Into<String>, document: Value) -> Self {
        self.insert(category, id, document);
        self
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self, category: Category, id: &str) -> Result<Value> {
        self.documents
            .get(&category)
            .and_then(|docs| docs.get(id))
            .cloned()
            .ok_or_else(|| Error::NotFound {
                category,
                id: id.to_string(),
            })
    }

    fn list_ids(&self, category: Category) -> Result<Vec<String>> {
        Ok(self
            .documents
            .get(&category)
            .map(|docs| docs.keys().cloned().collect())
            .unwrap_or_default())
    }
}
