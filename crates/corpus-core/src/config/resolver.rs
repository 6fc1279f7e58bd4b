//! Recursive corpus/template resolution.

use corpus_store::{Category, DocumentStore};

use crate::config::document::CorpusDocument;
use crate::{Error, Result};

/// Resolves corpus documents against their transitive template parents.
///
/// Resolution is a pure function of store contents: the resolver holds no
/// state between calls, and resolving the same id twice against an unchanged
/// store yields identical documents.
pub struct ConfigResolver<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> ConfigResolver<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Fully resolve `corpus_id`: load its document, recursively resolve
    /// every declared parent from the template namespace, and merge them in
    /// declaration order.
    ///
    /// A parent chain that revisits an id fails with
    /// [`Error::CyclicInheritance`] naming the chain up to the revisit.
    pub fn resolve(&self, corpus_id: &str) -> Result<CorpusDocument> {
        let mut chain = Vec::new();
        self.resolve_inner(Category::Corpora, corpus_id, &mut chain)
    }

    fn resolve_inner(
        &self,
        category: Category,
        id: &str,
        chain: &mut Vec<(Category, String)>,
    ) -> Result<CorpusDocument> {
        if chain.iter().any(|(cat, seen)| *cat == category && seen == id) {
            let mut cycle: Vec<String> = chain.iter().map(|(_, seen)| seen.clone()).collect();
            cycle.push(id.to_string());
            return Err(Error::CyclicInheritance { cycle });
        }
        chain.push((category, id.to_string()));

        let raw = self.store.load(category, id)?;
        let mut document = CorpusDocument::parse(raw)?;

        for parent_id in document.parents().to_vec() {
            tracing::debug!(parent = %parent_id, child = %id, "Resolving template parent");
            let parent = self.resolve_inner(Category::Templates, &parent_id, chain)?;
            document.merge_parent(parent)?;
        }

        chain.pop();
        Ok(document)
    }
}
