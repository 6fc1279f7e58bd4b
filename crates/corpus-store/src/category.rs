//! Logical document categories and their on-disk layout.

use std::fmt;
use std::path::Path;

/// The namespaces a document store can address.
///
/// Each category maps to a subdirectory of the settings root in the
/// filesystem store. The flat [`Category::Catalog`] namespace carries the
/// auxiliary documents `types` and `struct_elems`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Corpus configuration documents
    Corpora,
    /// Inheritable corpus templates
    Templates,
    /// Positional (word) attribute definitions
    Positional,
    /// Structural attribute definitions
    Structural,
    /// Text-level attribute definitions
    Text,
    /// Flat auxiliary catalogs
    Catalog,
    /// Search mode descriptors
    Modes,
}

impl Category {
    /// Relative directory for this category under the settings root.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Corpora => "corpora",
            Self::Templates => "corpora_templates",
            Self::Positional => "attributes/positional",
            Self::Structural => "attributes/structural",
            Self::Text => "attributes/text",
            Self::Catalog => "attributes",
            Self::Modes => "modes",
        }
    }
}

impl AsRef<Path> for Category {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for Category {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
