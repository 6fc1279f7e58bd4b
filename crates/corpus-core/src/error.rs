//! Error types for corpus-core

/// Result type for corpus-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in corpus-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A parent chain revisits an id it is already resolving
    #[error("Cyclic inheritance: {}", .cycle.join(" -> "))]
    CyclicInheritance { cycle: Vec<String> },

    /// A parent template carries a nested key the merge rules do not cover
    #[error("Key analyze_config.{key} not allowed in parent configuration")]
    MergeSchema { key: String },

    /// A text-attribute entry references an id absent from the catalog
    #[error("Corpus {corpus}: text attribute {name} references unknown id {reference}")]
    DanglingAttribute {
        corpus: String,
        name: String,
        reference: String,
    },

    /// Lookup of an attribute name not present in its namespace
    #[error("Attribute {name} is not configured")]
    UnknownAttribute { name: String },

    /// A mode document identifies itself in neither supported form
    #[error("Invalid mode document: {id}")]
    InvalidMode { id: String },

    /// A plugin could not be produced by the loader
    #[error("Plugin {name} failed to load: {message}")]
    PluginLoad { name: String, message: String },

    // Transparent wrappers for underlying crate errors
    /// Store error from corpus-store
    #[error(transparent)]
    Store(#[from] corpus_store::Error),

    /// Document decoding error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
