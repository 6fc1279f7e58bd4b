//! The document store contract.

use serde_json::Value;

use crate::{Category, Result};

/// Read access to raw configuration documents.
///
/// The resolution core depends only on this contract; whether documents come
/// from a settings directory, memory, a database, or a remote service is the
/// implementer's concern. Documents are fully decoded trees; the origin
/// serialization format never leaks through this interface.
pub trait DocumentStore: Send + Sync {
    /// Load the decoded document `id` from `category`.
    ///
    /// Fails with [`crate::Error::NotFound`] when the document does not
    /// exist and [`crate::Error::Parse`] when it cannot be decoded.
    fn load(&self, category: Category, id: &str) -> Result<Value>;

    /// All document ids available in `category`, in a stable order.
    ///
    /// The order must be reproducible across calls for an unchanged store;
    /// callers record it as the canonical iteration order for derived views.
    fn list_ids(&self, category: Category) -> Result<Vec<String>>;
}
