//! Saved file collection
//!
//! All saved files are one JSON object, keyed by filename, stored under
//! [`keys::FILES`]:
//!
//! ```json
//! { "file1.js": { "content": "...", "language": "javascript", "lastModified": 1700000000000 } }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

use crate::adapters::{keys, Persistence};
use crate::error::{PlaygroundError, Result};
use crate::highlight::Language;

/// One saved file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedFile {
    pub content: String,
    pub language: Language,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_modified: DateTime<Utc>,
}

/// Filename → saved file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SavedFiles(pub BTreeMap<String, SavedFile>);

impl SavedFiles {
    /// Read the collection; a missing key is an empty collection
    pub fn load(storage: &dyn Persistence) -> Result<Self> {
        match storage.load(keys::FILES)? {
            Some(raw) if !raw.trim().is_empty() => Ok(serde_json::from_str(&raw)?),
            _ => Ok(Self::default()),
        }
    }

    /// Like [`SavedFiles::load`], but an unreadable collection is replaced
    /// by an empty one instead of failing the save
    pub fn load_or_default(storage: &dyn Persistence) -> Result<Self> {
        match Self::load(storage) {
            Err(PlaygroundError::Serialization(e)) => {
                warn!("Saved file collection is corrupt, starting a new one: {}", e);
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn store(&self, storage: &mut dyn Persistence) -> Result<()> {
        let json = serde_json::to_string(self)?;
        storage.save(keys::FILES, &json)
    }

    pub fn insert(&mut self, filename: impl Into<String>, file: SavedFile) {
        self.0.insert(filename.into(), file);
    }

    pub fn get(&self, filename: &str) -> Option<&SavedFile> {
        self.0.get(filename)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> BTreeMap<String, SavedFile> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStorage;
    use chrono::TimeZone;

    fn sample() -> SavedFile {
        SavedFile {
            content: "let a = 1;".to_string(),
            language: Language::JavaScript,
            last_modified: Utc.timestamp_millis_opt(1_700_000_000_123).unwrap(),
        }
    }

    #[test]
    fn test_json_layout() {
        let mut files = SavedFiles::default();
        files.insert("file1.js", sample());

        let value: serde_json::Value = serde_json::to_value(&files).unwrap();
        assert_eq!(value["file1.js"]["language"], "javascript");
        assert_eq!(value["file1.js"]["lastModified"], 1_700_000_000_123_i64);
        assert_eq!(value["file1.js"]["content"], "let a = 1;");
    }

    #[test]
    fn test_store_and_load() {
        let mut storage = MemoryStorage::new();
        assert!(SavedFiles::load(&storage).unwrap().is_empty());

        let mut files = SavedFiles::default();
        files.insert("file1.js", sample());
        files.store(&mut storage).unwrap();

        let loaded = SavedFiles::load(&storage).unwrap();
        assert_eq!(loaded.get("file1.js"), Some(&sample()));
    }

    #[test]
    fn test_corrupt_collection() {
        let mut storage = MemoryStorage::new();
        storage.save(keys::FILES, "[1, 2").unwrap();

        assert!(SavedFiles::load(&storage).is_err());
        assert!(SavedFiles::load_or_default(&storage).unwrap().is_empty());
    }
}
