//! Configuration resolution engine for Corpus Manager
//!
//! This crate turns a settings tree of corpus documents, templates,
//! attribute definitions and modes into one immutable [`CorpusRegistry`]:
//!
//! - **Inheritance resolution**: corpus documents declare parent templates,
//!   templates may layer further; the resolver flattens every chain with
//!   field-specific merge rules and a cycle guard
//! - **Attribute dereferencing**: declared text attributes are expanded
//!   against the shared catalog into per-corpus and global views
//! - **Registry**: the read-only lookup surface a search platform consumes
//!
//! # Architecture
//!
//! `corpus-core` sits above the document store and below any serving layer:
//!
//! ```text
//!        HTTP / CLI consumers
//!                 |
//!           corpus-core
//!                 |
//!           corpus-store
//! ```
//!
//! # Example
//!
//! ```ignore
//! use corpus_core::CorpusRegistry;
//! use corpus_store::FsDocumentStore;
//!
//! let store = FsDocumentStore::new("/etc/corpus-manager/settings");
//! let registry = CorpusRegistry::build(&store)?;
//! assert!(registry.is_corpus("vivill"));
//! ```

pub mod attributes;
pub mod catalog;
pub mod config;
pub mod error;
pub mod modes;
pub mod plugins;
pub mod registry;

pub use attributes::TextAttributeMap;
pub use catalog::{AttributeCatalog, AttributeDef};
pub use config::{AnalyzeConfig, AttributeSpec, ConfigResolver, CorpusDocument, TextAttributeEntry};
pub use error::{Error, Result};
pub use plugins::{Plugin, PluginCache, PluginLoader};
pub use registry::{CorpusRegistry, SharedRegistry};
