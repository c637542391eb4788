//! Editor widget contract
//!
//! The session only talks to the editing surface through [`EditorWidget`].
//! Two variants exist: a rich, rope-backed editor with history, and a plain
//! textarea fallback that renders highlighted markup itself. Which one is
//! used is decided once, at startup, by [`create_widget`].

use serde::{Deserialize, Serialize};
use tracing::info;

use super::plain::PlainTextWidget;
use super::rich::RichWidget;
use crate::config::EditorPreferences;
use crate::highlight::Language;

/// Editing surface seen by the session controller
pub trait EditorWidget {
    /// Current live buffer
    fn content(&self) -> String;

    /// Replace the whole buffer (sync-in). Resets any edit history.
    fn set_content(&mut self, content: &str);

    fn language(&self) -> Language;

    fn set_language(&mut self, language: Language);

    fn focus(&mut self);

    fn is_focused(&self) -> bool;

    fn set_tab_width(&mut self, width: usize);

    fn kind(&self) -> WidgetKind;
}

/// Which widget implementation to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WidgetKind {
    #[default]
    Rich,
    PlainText,
}

/// Build the editor widget for this session
pub fn create_widget(kind: WidgetKind, prefs: &EditorPreferences) -> Box<dyn EditorWidget> {
    info!("Creating {:?} editor widget (tab width {})", kind, prefs.tab_width);
    match kind {
        WidgetKind::Rich => Box::new(RichWidget::new(prefs.tab_width)),
        WidgetKind::PlainText => Box::new(PlainTextWidget::new(prefs.tab_width)),
    }
}
