//! Where the state document lives.
//!
//! A backend only loads and saves whole documents; the store owns every
//! invariant across slots and tables.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::StoreError;

use super::document::{StoreDocument, STATE_FILE_VERSION};

/// Load/save seam for the persisted document.
pub trait StateBackend: Send + Sync {
    /// Returns `None` when nothing has been saved yet.
    fn load(&self) -> Result<Option<StoreDocument>, StoreError>;

    /// Replaces the saved document. Must be all-or-nothing.
    fn save(&self, doc: &StoreDocument) -> Result<(), StoreError>;

    /// Short description for logs.
    fn describe(&self) -> String;
}

/// A pretty-printed JSON file, replaced atomically on every save.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateBackend for JsonFileBackend {
    fn load(&self) -> Result<Option<StoreDocument>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Io(e)),
        };
        let doc: StoreDocument = serde_json::from_str(&raw).map_err(|e| {
            StoreError::Corrupt(format!("{}: {e}", self.path.display()))
        })?;
        if doc.version > STATE_FILE_VERSION {
            return Err(StoreError::Corrupt(format!(
                "{}: unsupported version {} (this build reads up to {STATE_FILE_VERSION})",
                self.path.display(),
                doc.version
            )));
        }
        Ok(Some(doc))
    }

    fn save(&self, doc: &StoreDocument) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_vec_pretty(doc)?;
        // Readers see either the previous document or the new one.
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Process-local backend for tests and `--state :memory:`.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    saved: Mutex<Option<StoreDocument>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing document instead of an empty slate.
    pub fn with_document(doc: StoreDocument) -> Self {
        Self {
            saved: Mutex::new(Some(doc)),
        }
    }
}

impl StateBackend for MemoryBackend {
    fn load(&self) -> Result<Option<StoreDocument>, StoreError> {
        let saved = self
            .saved
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(saved.clone())
    }

    fn save(&self, doc: &StoreDocument) -> Result<(), StoreError> {
        let mut saved = self
            .saved
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *saved = Some(doc.clone());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
