//! Filesystem-backed document store.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::{Category, DocumentStore, Error, Result};

/// Extensions probed for a document id, in priority order.
const EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

/// Document store over a settings directory.
///
/// Each [`Category`] maps to a subdirectory of the root; a document id `x`
/// resolves to the first of `x.yaml`, `x.yml`, `x.json` that exists there.
/// Format is detected from the file extension and the decoded tree is
/// returned as a canonical [`Value`] regardless of the on-disk form.
#[derive(Debug, Clone)]
pub struct FsDocumentStore {
    root: PathBuf,
}

impl FsDocumentStore {
    /// Create a store rooted at the given settings directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The settings directory this store reads from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn category_dir(&self, category: Category) -> PathBuf {
        self.root.join(category.as_str())
    }

    fn locate(&self, category: Category, id: &str) -> Option<PathBuf> {
        let dir = self.category_dir(category);
        EXTENSIONS
            .iter()
            .map(|ext| dir.join(format!("{id}.{ext}")))
            .find(|candidate| candidate.is_file())
    }

    fn decode(path: &Path) -> Result<Value> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match extension.to_lowercase().as_str() {
            "yaml" | "yml" => serde_yaml::from_str(&content).map_err(|e| Error::Parse {
                path: path.to_path_buf(),
                format: "YAML".into(),
                message: e.to_string(),
            }),
            "json" => serde_json::from_str(&content).map_err(|e| Error::Parse {
                path: path.to_path_buf(),
                format: "JSON".into(),
                message: e.to_string(),
            }),
            _ => Err(Error::UnsupportedFormat {
                extension: extension.to_string(),
            }),
        }
    }
}

impl DocumentStore for FsDocumentStore {
    fn load(&self, category: Category, id: &str) -> Result<Value> {
        let path = self.locate(category, id).ok_or_else(|| Error::NotFound {
            category,
            id: id.to_string(),
        })?;
        tracing::debug!(?path, "Loading document");
        Self::decode(&path)
    }

    fn list_ids(&self, category: Category) -> Result<Vec<String>> {
        let dir = self.category_dir(category);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for entry in fs::read_dir(&dir).map_err(|e| Error::io(&dir, e))? {
            let entry = entry.map_err(|e| Error::io(&dir, e))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(extension) = path.extension().and_then(|e| e.to_str()) else {
                continue;
            };
            if !EXTENSIONS.contains(&extension.to_lowercase().as_str()) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                ids.push(stem.to_string());
            }
        }

        // Sorted stems give a stable discovery order; an id present in more
        // than one format appears once.
        ids.sort();
        ids.dedup();
        Ok(ids)
    }
}
