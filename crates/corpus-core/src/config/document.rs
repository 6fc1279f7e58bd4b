//! Typed views over corpus configuration documents.
//!
//! Documents stay open trees: the distinguished fields are typed, everything
//! else rides in a flattened map and survives merging untouched. Absence and
//! emptiness are distinct for the distinguished fields: a child that
//! declares `parents: []` keeps that key against a parent that also has one,
//! while a child without the key inherits it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use indexmap::IndexMap;

use crate::{Error, Result};

/// One entry under `analyze_config.text_attributes`: local attribute names
/// mapped to either an id in the structural namespace or an inline
/// descriptor tree. In practice each entry holds a single pair.
pub type TextAttributeEntry = IndexMap<String, AttributeSpec>;

/// The two accepted shapes of a text-attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeSpec {
    /// A string id resolved against the attribute catalog.
    Reference(String),
    /// A descriptor given in place; passes through resolution unchanged.
    Inline(Value),
}

/// The specially-merged `analyze_config` subtree.
///
/// The three known sub-fields merge by concatenation (see
/// [`CorpusDocument::merge_parent`]); any other key is legal on a corpus but
/// rejected when it arrives from a parent template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_attributes: Option<Vec<TextAttributeEntry>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_attributes: Option<Vec<Value>>,

    /// Struct name to its ordered sub-attribute entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub struct_attributes: Option<IndexMap<String, Vec<Value>>>,

    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// A corpus (or template) configuration document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorpusDocument {
    /// Ordered parent template ids.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parents: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyze_config: Option<AnalyzeConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protected: Option<bool>,

    /// Every other top-level field, in document order.
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl CorpusDocument {
    /// Decode a document from its raw tree.
    pub fn parse(raw: Value) -> Result<Self> {
        Ok(serde_json::from_value(raw)?)
    }

    /// Declared parent template ids, empty when the field is absent.
    pub fn parents(&self) -> &[String] {
        self.parents.as_deref().unwrap_or_default()
    }

    /// The `protected` flag, defaulting to false.
    pub fn is_protected(&self) -> bool {
        self.protected.unwrap_or(false)
    }

    /// Re-encode the document as a raw tree.
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Merge a resolved parent template into this document.
    ///
    /// Top level: keys already present here win; parent-only keys are copied
    /// as-is. `analyze_config` always sub-merges instead:
    /// `text_attributes` and `word_attributes` become parent entries followed
    /// by child entries; per struct name, `struct_attributes` sequences get
    /// the parent's entries prepended. Any other `analyze_config` key on the
    /// parent fails with [`Error::MergeSchema`].
    ///
    /// Called once per declared parent, in declaration order.
    pub fn merge_parent(&mut self, parent: CorpusDocument) -> Result<()> {
        if self.parents.is_none() {
            self.parents = parent.parents;
        }
        if self.protected.is_none() {
            self.protected = parent.protected;
        }
        for (key, value) in parent.rest {
            if !self.rest.contains_key(&key) {
                self.rest.insert(key, value);
            }
        }

        if let Some(parent_analyze) = parent.analyze_config {
            let analyze = self.analyze_config.get_or_insert_with(AnalyzeConfig::default);
            merge_analyze(analyze, parent_analyze)?;
        }

        Ok(())
    }
}

fn merge_analyze(child: &mut AnalyzeConfig, parent: AnalyzeConfig) -> Result<()> {
    if let Some(key) = parent.rest.keys().next() {
        return Err(Error::MergeSchema { key: key.clone() });
    }

    if let Some(mut merged) = parent.text_attributes {
        merged.extend(child.text_attributes.take().unwrap_or_default());
        child.text_attributes = Some(merged);
    }
    if let Some(mut merged) = parent.word_attributes {
        merged.extend(child.word_attributes.take().unwrap_or_default());
        child.word_attributes = Some(merged);
    }
    if let Some(parent_structs) = parent.struct_attributes {
        let structs = child.struct_attributes.get_or_insert_with(IndexMap::new);
        for (name, mut entries) in parent_structs {
            if let Some(existing) = structs.get(&name) {
                entries.extend(existing.iter().cloned());
            }
            // Replacing an existing key keeps its original position.
            structs.insert(name, entries);
        }
    }

    Ok(())
}
