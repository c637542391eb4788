//! Document session controller
//!
//! Coordinates the tab store with the single editor widget. The widget holds
//! the live buffer of the active tab; the store's copy of that tab is only
//! refreshed at sync points (switch-away, save, run, preview, periodic sync).
//!
//! # Invariants
//!
//! - `state` is `ActiveTab(id)` only while `id` is in the store
//! - Every transition takes `&mut self`, so transitions never interleave

use chrono::Utc;
use std::collections::BTreeMap;
use tracing::{debug, error, info, warn};

use super::events::{PlaygroundEvent, PlaygroundOutcome, RunRequest};
use super::preview;
use super::saved_files::{SavedFile, SavedFiles};
use super::store::TabStore;
use super::tab::{Tab, TabId};
use crate::adapters::{
    create_widget, keys, EditorWidget, FileExporter, NotificationKind, Notifier, Persistence,
};
use crate::config::{EditorPreferences, PlaygroundConfig, Theme};
use crate::error::{PlaygroundError, Result};
use crate::highlight::Language;

/// Tabs opened by [`SessionController::bootstrap`], in display order
pub const DEFAULT_TABS: [(Language, &str); 3] = [
    (Language::Html, "index.html"),
    (Language::Css, "styles.css"),
    (Language::JavaScript, "script.js"),
];

const UNSUPPORTED_LANGUAGE_MESSAGE: &str =
    "Unsupported language. Please choose javascript, html, or css.";

/// Which tab, if any, owns the widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NoActiveTab,
    ActiveTab(TabId),
}

pub struct SessionController {
    store: TabStore,
    state: SessionState,
    widget: Box<dyn EditorWidget>,
    storage: Box<dyn Persistence>,
    notifier: Box<dyn Notifier>,
    exporter: Box<dyn FileExporter>,
    preferences: EditorPreferences,
    theme: Theme,
}

impl SessionController {
    pub fn new(
        widget: Box<dyn EditorWidget>,
        storage: Box<dyn Persistence>,
        notifier: Box<dyn Notifier>,
        exporter: Box<dyn FileExporter>,
    ) -> Self {
        Self {
            store: TabStore::new(),
            state: SessionState::NoActiveTab,
            widget,
            storage,
            notifier,
            exporter,
            preferences: EditorPreferences::default(),
            theme: Theme::default(),
        }
    }

    /// Build a session from configuration: the widget variant is chosen here,
    /// once, and the configured preferences apply until bootstrap restores
    /// stored ones
    pub fn from_config(
        config: &PlaygroundConfig,
        storage: Box<dyn Persistence>,
        notifier: Box<dyn Notifier>,
        exporter: Box<dyn FileExporter>,
    ) -> Self {
        let widget = create_widget(config.widget, &config.preferences);
        Self::new(widget, storage, notifier, exporter).with_preferences(config.preferences)
    }

    /// Initial preferences, used until [`bootstrap`](Self::bootstrap)
    /// restores stored ones
    pub fn with_preferences(mut self, preferences: EditorPreferences) -> Self {
        self.preferences = preferences.sanitized();
        self.widget.set_tab_width(self.preferences.tab_width);
        self
    }

    /// Restore theme and preferences, open the default tabs and activate the
    /// first one. Tabs are only created when the store is empty.
    pub fn bootstrap(&mut self) -> Result<TabId> {
        self.theme = self.restore_theme();
        if let Some(prefs) = self.restore_preferences() {
            self.preferences = prefs;
        }
        self.widget.set_tab_width(self.preferences.tab_width);

        if self.store.is_empty() {
            for (language, filename) in DEFAULT_TABS {
                self.store.create_named(language, filename, String::new());
            }
        }

        let first = self.store.list().first().map(|t| t.id).ok_or(PlaygroundError::NoActiveTab)?;
        self.switch_to(first)?;
        info!(
            "Session ready: {} tabs, theme {}, font {}px, tab width {}",
            self.store.len(),
            self.theme,
            self.preferences.font_size,
            self.preferences.tab_width
        );
        Ok(first)
    }

    /// Make `id` the active tab
    pub fn switch_to(&mut self, id: TabId) -> Result<()> {
        if !self.store.contains(id) {
            error!("Cannot switch to {}: no such tab", id);
            return Err(PlaygroundError::TabNotFound(id));
        }
        if self.state == SessionState::ActiveTab(id) {
            self.widget.focus();
            return Ok(());
        }

        self.sync_out();
        self.sync_in(id)
    }

    /// Open a new empty tab and switch to it
    pub fn create(&mut self, language: &str) -> Result<TabId> {
        let id = match self.store.create(language) {
            Ok(id) => id,
            Err(e) => {
                self.notifier.notify(UNSUPPORTED_LANGUAGE_MESSAGE, NotificationKind::Error);
                return Err(e);
            }
        };
        self.switch_to(id)?;
        Ok(id)
    }

    /// Close `id`. Returns the tab that is active afterwards.
    ///
    /// Closing the active tab activates its left neighbour, or the new
    /// leftmost tab; the closed tab's buffer is discarded, not synced.
    pub fn close(&mut self, id: TabId) -> Result<Option<TabId>> {
        let was_active = self.state == SessionState::ActiveTab(id);
        let closed = self.store.close(id)?;
        self.notifier.notify(
            &format!("Closed tab {}", closed.tab.filename),
            NotificationKind::Info,
        );

        if !was_active {
            return Ok(self.active_id());
        }

        self.state = SessionState::NoActiveTab;
        let successor = match closed.index.checked_sub(1) {
            Some(left) => self.store.list().get(left),
            None => self.store.list().first(),
        }
        .map(|t| t.id);

        match successor {
            Some(next) => self.sync_in(next)?,
            None => {
                debug!("Last tab closed, clearing editor");
                self.widget.set_content("");
            }
        }
        Ok(successor)
    }

    /// Periodic sync point: copy the widget buffer into the store
    pub fn sync_active(&mut self) {
        self.sync_out();
    }

    /// Save the active tab: record it in the saved-file collection and
    /// export it under its filename
    pub fn explicit_save(&mut self) -> Result<String> {
        self.sync_out();
        let Some(id) = self.active_id() else {
            self.notifier.notify("No active tab to save", NotificationKind::Error);
            return Err(PlaygroundError::NoActiveTab);
        };

        let tab = self.store.get(id)?.clone();
        if !tab.has_content() {
            warn!("Refusing to save {}: no content", tab.filename);
            self.notifier.notify(
                &format!("Nothing to save in {}", tab.filename),
                NotificationKind::Error,
            );
            return Err(PlaygroundError::EmptyDocument(tab.filename));
        }

        let now = Utc::now();
        let saved = SavedFile {
            content: tab.content.clone(),
            language: tab.language,
            last_modified: now,
        };
        let persisted = self.persist_saved(&tab.filename, saved);

        self.exporter.download(&tab.filename, &tab.content);

        match persisted {
            Ok(()) => {
                self.store.touch(id, now)?;
                info!("Saved {} ({} bytes)", tab.filename, tab.content.len());
                self.notifier.notify(
                    &format!("Code saved as {}", tab.filename),
                    NotificationKind::Success,
                );
                Ok(tab.filename)
            }
            Err(e) => {
                error!("Failed to store {}: {}", tab.filename, e);
                self.notifier.notify(
                    &format!("Could not store {}: {}", tab.filename, e),
                    NotificationKind::Error,
                );
                Err(e)
            }
        }
    }

    /// Sync point for "run": the active tab's code
    pub fn prepare_run(&mut self) -> Result<RunRequest> {
        self.sync_out();
        let Some(id) = self.active_id() else {
            error!("Nothing to run: no active tab");
            return Err(PlaygroundError::NoActiveTab);
        };
        let tab = self.store.get(id)?;
        Ok(RunRequest {
            language: tab.language,
            filename: tab.filename.clone(),
            content: tab.content.clone(),
        })
    }

    /// Content of the first tab of `language` that has any, else empty
    pub fn content_by_language(&mut self, language: Language) -> String {
        self.sync_out();
        self.content_of(language)
    }

    /// One document combining the html, css and javascript tabs
    pub fn compose_preview(&mut self) -> String {
        self.sync_out();
        let html = self.content_of(Language::Html);
        let css = self.content_of(Language::Css);
        let js = self.content_of(Language::JavaScript);
        debug!(
            "Composing preview (html {}, css {}, js {} bytes)",
            html.len(),
            css.len(),
            js.len()
        );
        preview::compose(&html, &css, &js)
    }

    /// The saved-file collection, by filename
    pub fn saved_files(&self) -> Result<BTreeMap<String, SavedFile>> {
        Ok(self.load_saved_files()?.into_inner())
    }

    /// Reopen a saved file as a new tab and switch to it
    pub fn open_saved(&mut self, filename: &str) -> Result<TabId> {
        let files = self.load_saved_files()?;
        let Some(file) = files.get(filename) else {
            error!("No saved file named {}", filename);
            self.notifier.notify(
                &format!("Saved file not found: {}", filename),
                NotificationKind::Error,
            );
            return Err(PlaygroundError::SavedFileNotFound(filename.to_string()));
        };

        let id = self
            .store
            .create_named(file.language, filename, file.content.clone());
        self.store.touch(id, file.last_modified)?;
        self.switch_to(id)?;
        self.notifier
            .notify(&format!("Opened {}", filename), NotificationKind::Info);
        Ok(id)
    }

    /// Flip between dark and light and persist the choice
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggle();
        if let Err(e) = self.storage.save(keys::THEME, self.theme.as_str()) {
            error!("Failed to persist theme: {}", e);
        }
        info!("Theme set to {}", self.theme);
        self.theme
    }

    /// Set the font size (clamped to 10..=24 px); returns the applied size
    pub fn set_font_size(&mut self, px: u8) -> Result<u8> {
        let size = EditorPreferences::clamp_font_size(px);
        if size != px {
            debug!("Font size {} clamped to {}", px, size);
        }
        self.preferences.font_size = size;
        self.persist_preferences()?;
        Ok(size)
    }

    /// Set the indent width (2, 4 or 8) and push it into the widget
    pub fn set_tab_width(&mut self, width: usize) -> Result<()> {
        let width = match EditorPreferences::validate_tab_width(width) {
            Ok(width) => width,
            Err(e) => {
                warn!("{}", e);
                self.notifier.notify(&e.to_string(), NotificationKind::Error);
                return Err(e);
            }
        };
        self.preferences.tab_width = width;
        self.widget.set_tab_width(width);
        self.persist_preferences()
    }

    /// Route a user event to its transition
    pub fn dispatch(&mut self, event: PlaygroundEvent) -> Result<PlaygroundOutcome> {
        debug!("Dispatching {:?}", event);
        match event {
            PlaygroundEvent::SwitchTab(id) => {
                self.switch_to(id)?;
                Ok(PlaygroundOutcome::Switched(id))
            }
            PlaygroundEvent::NewTab(language) => self.create(&language).map(PlaygroundOutcome::Created),
            PlaygroundEvent::CloseTab(id) => {
                let successor = self.close(id)?;
                Ok(PlaygroundOutcome::Closed { successor })
            }
            PlaygroundEvent::Save => {
                let filename = self.explicit_save()?;
                Ok(PlaygroundOutcome::Saved { filename })
            }
            PlaygroundEvent::Run => self.prepare_run().map(PlaygroundOutcome::Run),
            PlaygroundEvent::Preview => Ok(PlaygroundOutcome::Preview(self.compose_preview())),
            PlaygroundEvent::ToggleTheme => Ok(PlaygroundOutcome::ThemeChanged(self.toggle_theme())),
            PlaygroundEvent::Sync => {
                self.sync_active();
                Ok(PlaygroundOutcome::Synced)
            }
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn active_id(&self) -> Option<TabId> {
        match self.state {
            SessionState::ActiveTab(id) => Some(id),
            SessionState::NoActiveTab => None,
        }
    }

    /// Active tab as last synced (call [`sync_active`](Self::sync_active)
    /// first for the live buffer)
    pub fn active_tab(&self) -> Option<&Tab> {
        self.active_id().and_then(|id| self.store.get(id).ok())
    }

    pub fn tabs(&self) -> &[Tab] {
        self.store.list()
    }

    pub fn store(&self) -> &TabStore {
        &self.store
    }

    pub fn widget(&self) -> &dyn EditorWidget {
        self.widget.as_ref()
    }

    pub fn widget_mut(&mut self) -> &mut dyn EditorWidget {
        self.widget.as_mut()
    }

    pub fn storage(&self) -> &dyn Persistence {
        self.storage.as_ref()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn preferences(&self) -> EditorPreferences {
        self.preferences
    }

    /// Widget buffer → store, for the active tab
    fn sync_out(&mut self) {
        if let SessionState::ActiveTab(id) = self.state {
            let content = self.widget.content();
            if let Err(e) = self.store.set_content(id, &content) {
                error!("Sync-out of {} failed: {}", id, e);
            }
        }
    }

    /// Store → widget, then activate `id`
    fn sync_in(&mut self, id: TabId) -> Result<()> {
        let tab = self.store.get(id)?;
        self.widget.set_language(tab.language);
        self.widget.set_content(&tab.content);
        self.widget.focus();
        debug!("Activated {} ({})", id, tab.filename);
        self.state = SessionState::ActiveTab(id);
        Ok(())
    }

    fn content_of(&self, language: Language) -> String {
        self.store
            .first_with_language(language)
            .map(|t| t.content.clone())
            .unwrap_or_default()
    }

    /// Read the saved-file collection, telling the user when it is unreadable
    fn load_saved_files(&self) -> Result<SavedFiles> {
        SavedFiles::load(self.storage.as_ref()).map_err(|e| {
            error!("Failed to read saved files: {}", e);
            self.notifier.notify(
                &format!("Could not read saved files: {}", e),
                NotificationKind::Error,
            );
            e
        })
    }

    fn persist_saved(&mut self, filename: &str, file: SavedFile) -> Result<()> {
        let mut files = SavedFiles::load_or_default(self.storage.as_ref())?;
        files.insert(filename, file);
        files.store(self.storage.as_mut())
    }

    fn persist_preferences(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.preferences)?;
        self.storage.save(keys::PREFERENCES, &json).map_err(|e| {
            error!("Failed to persist editor preferences: {}", e);
            e
        })
    }

    fn restore_theme(&self) -> Theme {
        match self.storage.load(keys::THEME) {
            Ok(Some(raw)) => Theme::parse(&raw).unwrap_or_else(|| {
                warn!("Ignoring unknown stored theme {:?}", raw);
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(e) => {
                warn!("Could not read stored theme: {}", e);
                Theme::default()
            }
        }
    }

    fn restore_preferences(&self) -> Option<EditorPreferences> {
        let raw = match self.storage.load(keys::PREFERENCES) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("Could not read stored preferences: {}", e);
                return None;
            }
        };
        match serde_json::from_str::<EditorPreferences>(&raw) {
            Ok(prefs) => Some(prefs.sanitized()),
            Err(e) => {
                warn!("Ignoring corrupt stored preferences: {}", e);
                None
            }
        }
    }
}
