//! Tab records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::highlight::Language;

/// Tab identifier, unique for the lifetime of a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TabId(pub(crate) u64);

impl TabId {
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Parse the `tab_{n}` display form
    pub fn parse(value: &str) -> Option<Self> {
        value
            .strip_prefix("tab_")
            .and_then(|n| n.parse().ok())
            .map(TabId)
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tab_{}", self.0)
    }
}

/// One open document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub id: TabId,
    pub language: Language,
    pub filename: String,

    /// Last synced content. Stale for the active tab until the next sync point.
    pub content: String,

    /// Set by explicit save
    pub last_modified: Option<DateTime<Utc>>,
}

impl Tab {
    pub(crate) fn new(id: TabId, language: Language, filename: String, content: String) -> Self {
        Self {
            id,
            language,
            filename,
            content,
            last_modified: None,
        }
    }

    /// Content has something other than whitespace
    pub fn has_content(&self) -> bool {
        !self.content.trim().is_empty()
    }
}
