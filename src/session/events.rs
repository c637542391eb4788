//! User events routed through [`SessionController::dispatch`]
//!
//! [`SessionController::dispatch`]: super::SessionController::dispatch

use super::tab::TabId;
use crate::config::Theme;
use crate::highlight::Language;

/// Something the user did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaygroundEvent {
    /// Tab header clicked
    SwitchTab(TabId),

    /// New tab with a language tag
    NewTab(String),

    /// Close button on a tab header
    CloseTab(TabId),

    Save,

    Run,

    Preview,

    ToggleTheme,

    /// Periodic or blur-triggered sync of the active buffer
    Sync,
}

/// Code handed to the runner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    pub language: Language,
    pub filename: String,
    pub content: String,
}

/// Result of a dispatched event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaygroundOutcome {
    Switched(TabId),
    Created(TabId),

    /// Tab closed; carries the newly active tab, if any
    Closed { successor: Option<TabId> },

    Saved { filename: String },
    Run(RunRequest),
    Preview(String),
    ThemeChanged(Theme),
    Synced,
}
