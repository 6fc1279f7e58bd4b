//! The corpus registry: build pass and read surface.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use corpus_store::{Category, DocumentStore};
use serde_json::Value;

use crate::attributes::{self, TextAttributeMap};
use crate::catalog::{AttributeCatalog, AttributeDef};
use crate::config::{ConfigResolver, CorpusDocument};
use crate::modes;
use crate::plugins::{Plugin, PluginCache, PluginLoader};
use crate::{Error, Result};

/// Fully built, read-only view of every resolved corpus configuration.
///
/// Built in one pass at process start. Any failure aborts the build: a
/// half-built inheritance graph must never serve a search platform, so no
/// partial registry is ever returned. After the build every map is
/// immutable and safe for unsynchronized concurrent reads; the plugin memo
/// is the only interior mutability, behind a mutex.
#[derive(Debug)]
pub struct CorpusRegistry {
    corpora: HashMap<String, CorpusDocument>,
    corpus_order: Vec<String>,
    catalog: AttributeCatalog,
    modes: BTreeMap<String, Value>,
    protected: HashMap<String, bool>,
    text_by_corpus: HashMap<String, TextAttributeMap>,
    text_aggregate: TextAttributeMap,
    plugins: Option<PluginCache>,
}

impl CorpusRegistry {
    /// Build the registry from every corpus the store knows about.
    pub fn build(store: &dyn DocumentStore) -> Result<Self> {
        Self::build_inner(store, None)
    }

    /// Build with a plugin loader attached; [`CorpusRegistry::plugin`]
    /// memoizes handles from it for the lifetime of this registry.
    pub fn build_with_plugins(
        store: &dyn DocumentStore,
        loader: Box<dyn PluginLoader>,
    ) -> Result<Self> {
        Self::build_inner(store, Some(PluginCache::new(loader)))
    }

    fn build_inner(store: &dyn DocumentStore, plugins: Option<PluginCache>) -> Result<Self> {
        // Discovery order is recorded once and drives every later
        // iteration, so derived views are reproducible within a build.
        let corpus_order = store.list_ids(Category::Corpora)?;

        let resolver = ConfigResolver::new(store);
        let mut corpora = HashMap::new();
        for corpus_id in &corpus_order {
            let document = resolver.resolve(corpus_id)?;
            corpora.insert(corpus_id.clone(), document);
        }
        tracing::debug!(count = corpus_order.len(), "Resolved corpus configurations");

        let catalog = AttributeCatalog::load(store)?;
        let modes = modes::load_modes(store)?;

        let protected = corpus_order
            .iter()
            .map(|id| (id.clone(), corpora[id].is_protected()))
            .collect();

        let mut text_by_corpus = HashMap::new();
        for corpus_id in &corpus_order {
            match attributes::resolve_text_attributes(corpus_id, &corpora[corpus_id], &catalog)? {
                Some(resolved) => {
                    text_by_corpus.insert(corpus_id.clone(), resolved);
                }
                None => tracing::info!(corpus = %corpus_id, "No text attributes for corpus"),
            }
        }
        let text_aggregate = attributes::build_global_aggregate(&corpus_order, &text_by_corpus);

        Ok(Self {
            corpora,
            corpus_order,
            catalog,
            modes,
            protected,
            text_by_corpus,
            text_aggregate,
            plugins,
        })
    }

    /// The resolved configuration for a corpus.
    pub fn config(&self, corpus_id: &str) -> Option<&CorpusDocument> {
        self.corpora.get(corpus_id)
    }

    /// Whether `corpus_id` names a configured corpus.
    pub fn is_corpus(&self, corpus_id: &str) -> bool {
        self.corpora.contains_key(corpus_id)
    }

    /// Corpus ids in recorded discovery order.
    pub fn corpus_ids(&self) -> &[String] {
        &self.corpus_order
    }

    /// The attribute catalog backing this registry.
    pub fn catalog(&self) -> &AttributeCatalog {
        &self.catalog
    }

    pub fn word_attribute(&self, name: &str) -> Option<&AttributeDef> {
        self.catalog.word_attribute(name)
    }

    pub fn struct_attribute(&self, name: &str) -> Option<&AttributeDef> {
        self.catalog.struct_attribute(name)
    }

    pub fn text_attribute(&self, name: &str) -> Option<&AttributeDef> {
        self.catalog.text_attribute(name)
    }

    pub fn word_attributes(&self) -> &HashMap<String, AttributeDef> {
        self.catalog.word_attributes()
    }

    pub fn struct_attributes(&self) -> &HashMap<String, AttributeDef> {
        self.catalog.struct_attributes()
    }

    pub fn text_attributes(&self) -> &HashMap<String, AttributeDef> {
        self.catalog.text_attributes()
    }

    /// Resolved text attributes per corpus; corpora without a
    /// `text_attributes` declaration are absent.
    pub fn text_attributes_by_corpora(&self) -> &HashMap<String, TextAttributeMap> {
        &self.text_by_corpus
    }

    /// Every text attribute seen across all corpora, later corpora winning
    /// name collisions, plus the synthetic `yearR` entry.
    pub fn global_text_attributes(&self) -> &TextAttributeMap {
        &self.text_aggregate
    }

    /// See [`AttributeCatalog::is_ranked`].
    pub fn is_ranked(&self, name: &str) -> Result<bool> {
        self.catalog.is_ranked(name)
    }

    /// See [`AttributeCatalog::is_object`].
    pub fn is_object<S: AsRef<str>>(&self, path: &[S]) -> bool {
        self.catalog.is_object(path)
    }

    /// The `protected` flag per corpus, defaulted to false.
    pub fn protected_flags(&self) -> &HashMap<String, bool> {
        &self.protected
    }

    pub fn is_protected(&self, corpus_id: &str) -> bool {
        self.protected.get(corpus_id).copied().unwrap_or(false)
    }

    pub fn modes(&self) -> &BTreeMap<String, Value> {
        &self.modes
    }

    pub fn type_info(&self) -> &Value {
        self.catalog.type_info()
    }

    pub fn struct_elem(&self, name: &str) -> Option<&Value> {
        self.catalog.struct_elem(name)
    }

    /// Fetch a plugin handle, loading and memoizing it on first use.
    pub fn plugin(&self, name: &str) -> Result<Arc<dyn Plugin>> {
        match &self.plugins {
            Some(cache) => cache.get(name),
            None => Err(Error::PluginLoad {
                name: name.to_string(),
                message: "no plugin loader configured".to_string(),
            }),
        }
    }
}

/// Atomically swappable registry snapshot for long-running consumers.
///
/// Readers clone the current [`Arc`] and keep a consistent snapshot for as
/// long as they hold it; [`SharedRegistry::reload`] builds a fresh registry
/// off to the side and publishes it only on success, so readers never
/// observe a partially rebuilt one.
pub struct SharedRegistry {
    current: RwLock<Arc<CorpusRegistry>>,
}

impl SharedRegistry {
    /// Build the initial snapshot.
    pub fn build(store: &dyn DocumentStore) -> Result<Self> {
        Ok(Self {
            current: RwLock::new(Arc::new(CorpusRegistry::build(store)?)),
        })
    }

    /// The currently published snapshot.
    pub fn get(&self) -> Arc<CorpusRegistry> {
        Arc::clone(&self.current.read().expect("registry lock poisoned"))
    }

    /// Rebuild from the store and publish the new snapshot. On failure the
    /// previous snapshot stays published.
    pub fn reload(&self, store: &dyn DocumentStore) -> Result<()> {
        let rebuilt = Arc::new(CorpusRegistry::build(store)?);
        *self.current.write().expect("registry lock poisoned") = rebuilt;
        Ok(())
    }
}
