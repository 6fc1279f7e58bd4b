//! The search-mode catalog.
//!
//! Modes are opaque descriptor trees consumed by search frontends, one
//! document each. Two identification forms are in circulation and both stay
//! supported: a `name` field inside the document, or a document whose single
//! top-level key is the mode name and whose value is the descriptor.

use std::collections::BTreeMap;

use corpus_store::{Category, DocumentStore};
use serde_json::Value;

use crate::{Error, Result};

/// Load every mode document from the store.
pub fn load_modes(store: &dyn DocumentStore) -> Result<BTreeMap<String, Value>> {
    let mut modes = BTreeMap::new();
    for id in store.list_ids(Category::Modes)? {
        let document = store.load(Category::Modes, &id)?;
        let (name, descriptor) = identify_mode(&id, document)?;
        tracing::debug!(mode = %name, document = %id, "Loaded mode");
        modes.insert(name, descriptor);
    }
    Ok(modes)
}

fn identify_mode(id: &str, document: Value) -> Result<(String, Value)> {
    let Value::Object(tree) = document else {
        return Err(Error::InvalidMode { id: id.to_string() });
    };

    if let Some(Value::String(name)) = tree.get("name") {
        let name = name.clone();
        return Ok((name, Value::Object(tree)));
    }
    if tree.len() == 1 {
        let (name, descriptor) = tree.into_iter().next().unwrap();
        return Ok((name, descriptor));
    }

    Err(Error::InvalidMode { id: id.to_string() })
}
