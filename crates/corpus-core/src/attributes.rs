//! Text-attribute dereferencing and aggregation.
//!
//! Resolved corpus documents still carry their text attributes as declared:
//! a mix of catalog references and inline descriptors. This pass expands the
//! references against the structural namespace, strips the special `title`
//! entry from the per-corpus view, and folds every corpus's view into one
//! global name → descriptor map.

use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;

use crate::catalog::{AttributeCatalog, AttributeDef};
use crate::config::{AttributeSpec, CorpusDocument};
use crate::{Error, Result};

/// Resolved text attributes of one corpus, in encounter order.
pub type TextAttributeMap = IndexMap<String, AttributeDef>;

/// Expand the text-attribute declarations of one resolved corpus document.
///
/// Returns `None` when the document declares no `text_attributes` field;
/// such corpora are skipped by aggregation. A reference to an id the
/// catalog does not know is fatal: dangling references are authoring
/// errors and surface at build time, not at query time.
pub fn resolve_text_attributes(
    corpus_id: &str,
    document: &CorpusDocument,
    catalog: &AttributeCatalog,
) -> Result<Option<TextAttributeMap>> {
    let Some(entries) = document
        .analyze_config
        .as_ref()
        .and_then(|analyze| analyze.text_attributes.as_ref())
    else {
        return Ok(None);
    };

    let mut resolved = TextAttributeMap::new();
    for entry in entries {
        for (name, spec) in entry {
            let def = match spec {
                AttributeSpec::Reference(id) => catalog
                    .struct_attribute(id)
                    .cloned()
                    .ok_or_else(|| Error::DanglingAttribute {
                        corpus: corpus_id.to_string(),
                        name: name.clone(),
                        reference: id.clone(),
                    })?,
                AttributeSpec::Inline(tree) => AttributeDef::from_value(tree.clone())?,
            };
            resolved.insert(name.clone(), def);
        }
    }

    // Title is displayed separately by every consumer and must not show up
    // in the generic listing.
    resolved.shift_remove("title");
    Ok(Some(resolved))
}

/// Fold per-corpus views into the global name → descriptor map.
///
/// `order` is the corpus discovery order recorded at registry build; later
/// corpora overwrite earlier same-named entries, so the result is
/// reproducible for a fixed input set. The synthetic `yearR` entry is set
/// last and can never be shadowed.
pub fn build_global_aggregate(
    order: &[String],
    per_corpus: &HashMap<String, TextAttributeMap>,
) -> TextAttributeMap {
    let mut aggregate = TextAttributeMap::new();
    for corpus_id in order {
        if let Some(attributes) = per_corpus.get(corpus_id) {
            for (name, def) in attributes {
                aggregate.insert(name.clone(), def.clone());
            }
        }
    }
    aggregate.insert("yearR".to_string(), year_r());
    aggregate
}

/// The synthetic aggregate entry kept for backward compatibility with
/// consumers that group by year of publication.
fn year_r() -> AttributeDef {
    AttributeDef {
        name: Some("yearR".to_string()),
        translation: Some(BTreeMap::from([
            ("swe".to_string(), "År".to_string()),
            ("eng".to_string(), "Year".to_string()),
        ])),
        ..AttributeDef::default()
    }
}
