//! Ordered tab store
//!
//! Owns every open tab in display order and allocates ids from a monotonic
//! counter. Ids are never reused, even after close.

use chrono::{DateTime, Utc};
use tracing::{debug, error};

use super::tab::{Tab, TabId};
use crate::error::{PlaygroundError, Result};
use crate::highlight::Language;

/// A tab removed by [`TabStore::close`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosedTab {
    pub tab: Tab,

    /// Display index the tab had before removal
    pub index: usize,
}

#[derive(Debug)]
pub struct TabStore {
    tabs: Vec<Tab>,
    next_id: u64,
}

impl Default for TabStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TabStore {
    pub fn new() -> Self {
        Self {
            tabs: Vec::new(),
            next_id: 1,
        }
    }

    /// Create an empty tab for `language`, named `file{N}.{ext}`
    pub fn create(&mut self, language: &str) -> Result<TabId> {
        let language = Language::parse(language).ok_or_else(|| {
            error!("Cannot create tab: unsupported language {:?}", language);
            PlaygroundError::UnsupportedLanguage(language.to_string())
        })?;

        let filename = self.next_filename(language);
        Ok(self.create_named(language, filename, String::new()))
    }

    /// Create a tab with an explicit name and content
    pub fn create_named(
        &mut self,
        language: Language,
        filename: impl Into<String>,
        content: impl Into<String>,
    ) -> TabId {
        let id = TabId(self.next_id);
        self.next_id += 1;

        let tab = Tab::new(id, language, filename.into(), content.into());
        debug!("Created {} ({})", id, tab.filename);
        self.tabs.push(tab);
        id
    }

    /// `file{N}.{ext}` where N counts the open tabs of the same language.
    ///
    /// The count is of currently open tabs, so a name can repeat after a
    /// close.
    pub fn next_filename(&self, language: Language) -> String {
        let same = self.tabs.iter().filter(|t| t.language == language).count();
        format!("file{}.{}", same + 1, language.extension())
    }

    pub fn get(&self, id: TabId) -> Result<&Tab> {
        self.tabs
            .iter()
            .find(|t| t.id == id)
            .ok_or(PlaygroundError::TabNotFound(id))
    }

    pub fn contains(&self, id: TabId) -> bool {
        self.position(id).is_some()
    }

    /// Display index of `id`
    pub fn position(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == id)
    }

    pub fn set_content(&mut self, id: TabId, content: &str) -> Result<()> {
        let tab = self.get_mut(id)?;
        if tab.content != content {
            tab.content = content.to_string();
        }
        Ok(())
    }

    /// Stamp the last-modified time
    pub fn touch(&mut self, id: TabId, at: DateTime<Utc>) -> Result<()> {
        self.get_mut(id)?.last_modified = Some(at);
        Ok(())
    }

    /// Remove `id`, returning the tab and its former display index
    pub fn close(&mut self, id: TabId) -> Result<ClosedTab> {
        let Some(index) = self.position(id) else {
            error!("Cannot close {}: no such tab", id);
            return Err(PlaygroundError::TabNotFound(id));
        };
        let tab = self.tabs.remove(index);
        debug!("Closed {} ({}) at index {}", id, tab.filename, index);
        Ok(ClosedTab { tab, index })
    }

    /// Tabs in display order
    pub fn list(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// First tab in display order with `language` and non-blank content
    pub fn first_with_language(&self, language: Language) -> Option<&Tab> {
        self.tabs
            .iter()
            .find(|t| t.language == language && t.has_content())
    }

    fn get_mut(&mut self, id: TabId) -> Result<&mut Tab> {
        match self.tabs.iter_mut().find(|t| t.id == id) {
            Some(tab) => Ok(tab),
            None => {
                error!("No such tab: {}", id);
                Err(PlaygroundError::TabNotFound(id))
            }
        }
    }
}
