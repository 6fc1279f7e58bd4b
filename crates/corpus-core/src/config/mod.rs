//! Corpus document model and inheritance resolution
//!
//! A corpus document is an open tree with three distinguished fields:
//! `parents` (ordered template ids), `analyze_config` (the specially-merged
//! attribute subtree) and `protected`. Templates are documents from a
//! separate namespace and may declare parents of their own; the resolver in
//! this module flattens the whole chain into one inheritance-free document
//! per corpus.
//!
//! Merge rules are asymmetric: at the top level the child always wins,
//! while the `analyze_config` sub-fields concatenate so that template
//! attributes precede the corpus's own. See [`CorpusDocument::merge_parent`].

mod document;
mod resolver;

pub use document::{AnalyzeConfig, AttributeSpec, CorpusDocument, TextAttributeEntry};
pub use resolver::ConfigResolver;
