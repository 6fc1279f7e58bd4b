//! The shared attribute catalog.
//!
//! Three flat namespaces (positional, structural, text) of attribute
//! definitions plus the auxiliary `types` and `struct_elems` documents.
//! Loaded once per process; resolved corpus views embed value copies of the
//! definitions so they stay inspectable independently of the catalog.

use std::collections::{BTreeMap, HashMap};

use corpus_store::{Category, DocumentStore};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Error, Result};

/// A fully materialized attribute definition.
///
/// The flags the engine itself consults are typed; all further metadata
/// (type tags, display hints) rides in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Display names keyed by language code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ranked: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_in_text: Option<bool>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AttributeDef {
    /// Decode a definition from its raw tree.
    pub fn from_value(raw: Value) -> Result<Self> {
        Ok(serde_json::from_value(raw)?)
    }

    /// Whether this positional attribute is ranked; unset means false.
    pub fn is_ranked(&self) -> bool {
        self.ranked.unwrap_or(false)
    }

    /// Whether this structural attribute is indexed inside the running
    /// text; unset means true.
    pub fn index_in_text(&self) -> bool {
        self.index_in_text.unwrap_or(true)
    }
}

/// The three attribute namespaces and the auxiliary catalogs, loaded once.
#[derive(Debug, Clone, Default)]
pub struct AttributeCatalog {
    word: HashMap<String, AttributeDef>,
    structural: HashMap<String, AttributeDef>,
    text: HashMap<String, AttributeDef>,
    type_info: Value,
    struct_elems: Value,
}

impl AttributeCatalog {
    /// Load every namespace and auxiliary catalog from the store.
    ///
    /// A missing or malformed document fails the load; the catalog is part
    /// of the registry build and never partially constructed.
    pub fn load(store: &dyn DocumentStore) -> Result<Self> {
        Ok(Self {
            word: Self::load_namespace(store, Category::Positional)?,
            structural: Self::load_namespace(store, Category::Structural)?,
            text: Self::load_namespace(store, Category::Text)?,
            type_info: store.load(Category::Catalog, "types")?,
            struct_elems: store.load(Category::Catalog, "struct_elems")?,
        })
    }

    fn load_namespace(
        store: &dyn DocumentStore,
        category: Category,
    ) -> Result<HashMap<String, AttributeDef>> {
        let mut namespace = HashMap::new();
        for id in store.list_ids(category)? {
            let def = AttributeDef::from_value(store.load(category, &id)?)?;
            namespace.insert(id, def);
        }
        tracing::debug!(%category, count = namespace.len(), "Loaded attribute namespace");
        Ok(namespace)
    }

    pub fn word_attribute(&self, name: &str) -> Option<&AttributeDef> {
        self.word.get(name)
    }

    pub fn struct_attribute(&self, name: &str) -> Option<&AttributeDef> {
        self.structural.get(name)
    }

    pub fn text_attribute(&self, name: &str) -> Option<&AttributeDef> {
        self.text.get(name)
    }

    pub fn word_attributes(&self) -> &HashMap<String, AttributeDef> {
        &self.word
    }

    pub fn struct_attributes(&self) -> &HashMap<String, AttributeDef> {
        &self.structural
    }

    pub fn text_attributes(&self) -> &HashMap<String, AttributeDef> {
        &self.text
    }

    /// The raw `types` auxiliary catalog.
    pub fn type_info(&self) -> &Value {
        &self.type_info
    }

    /// One entry of the `struct_elems` auxiliary catalog.
    pub fn struct_elem(&self, name: &str) -> Option<&Value> {
        self.struct_elems.get(name)
    }

    /// Whether the named positional attribute is ranked.
    ///
    /// Unlike the plain lookups, an unknown name is an error here, never a
    /// silent `false`.
    pub fn is_ranked(&self, name: &str) -> Result<bool> {
        self.word
            .get(name)
            .map(AttributeDef::is_ranked)
            .ok_or_else(|| Error::UnknownAttribute {
                name: name.to_string(),
            })
    }

    /// Whether a structural path ends in an object-valued element, i.e. a
    /// known structural attribute with `index_in_text` explicitly false.
    pub fn is_object<S: AsRef<str>>(&self, path: &[S]) -> bool {
        match path.last().and_then(|last| self.structural.get(last.as_ref())) {
            Some(attr) => !attr.index_in_text(),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corpus_store::MemoryStore;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn store_with_catalog() -> MemoryStore {
        MemoryStore::new()
            .with(Category::Positional, "pos", json!({"ranked": true}))
            .with(Category::Positional, "lemma", json!({}))
            .with(
                Category::Structural,
                "paragraph",
                json!({"index_in_text": false}),
            )
            .with(Category::Structural, "sentence", json!({}))
            .with(
                Category::Text,
                "author",
                json!({"translation": {"swe": "Författare", "eng": "Author"}}),
            )
            .with(Category::Catalog, "types", json!({"date": {"kind": "range"}}))
            .with(Category::Catalog, "struct_elems", json!({"text": {"nested": true}}))
    }

    #[test]
    fn load_populates_all_namespaces() {
        let catalog = AttributeCatalog::load(&store_with_catalog()).unwrap();

        assert_eq!(catalog.word_attributes().len(), 2);
        assert_eq!(catalog.struct_attributes().len(), 2);
        assert_eq!(catalog.text_attributes().len(), 1);
        assert_eq!(catalog.type_info()["date"]["kind"], json!("range"));
        assert_eq!(catalog.struct_elem("text"), Some(&json!({"nested": true})));
        assert_eq!(catalog.struct_elem("absent"), None);
    }

    #[test]
    fn load_fails_without_auxiliary_catalogs() {
        let store = MemoryStore::new().with(Category::Catalog, "types", json!({}));

        let err = AttributeCatalog::load(&store).unwrap_err();
        assert!(matches!(err, Error::Store(corpus_store::Error::NotFound { .. })));
    }

    #[test]
    fn is_ranked_distinguishes_unset_from_unknown() {
        let catalog = AttributeCatalog::load(&store_with_catalog()).unwrap();

        assert!(catalog.is_ranked("pos").unwrap());
        assert!(!catalog.is_ranked("lemma").unwrap());
        let err = catalog.is_ranked("msd").unwrap_err();
        match err {
            Error::UnknownAttribute { name } => assert_eq!(name, "msd"),
            other => panic!("expected unknown attribute, got: {other}"),
        }
    }

    #[test]
    fn is_object_requires_explicit_flag() {
        let catalog = AttributeCatalog::load(&store_with_catalog()).unwrap();

        assert!(catalog.is_object(&["text", "paragraph"]));
        assert!(!catalog.is_object(&["text", "sentence"]));
        assert!(!catalog.is_object(&["unknown"]));
        assert!(!catalog.is_object::<&str>(&[]));
    }
}
