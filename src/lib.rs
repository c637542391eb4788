//! Slippy - code playground core
//!
//! The non-UI core of a browser code playground:
//! - A single-pass tokenizer and HTML highlighter for javascript, html and css
//! - An ordered tab store with per-language filenames
//! - A session controller that keeps one editor widget in sync with the
//!   active tab and drives save, run and preview
//!
//! # Architecture
//!
//! - **Highlight**: tokenizer, keyword tables, markup renderer
//! - **Session**: tabs, store, controller, preview composition
//! - **Adapters**: editor widgets, persistence, export, notifications
//! - **Config**: TOML configuration, editor preferences, theme
//!
//! # Example
//!
//! ```
//! use slippy_core::adapters::{
//!     create_widget, DirectoryExporter, EditorWidget, LogNotifier, MemoryStorage, WidgetKind,
//! };
//! use slippy_core::config::EditorPreferences;
//! use slippy_core::SessionController;
//!
//! let prefs = EditorPreferences::default();
//! let mut session = SessionController::new(
//!     create_widget(WidgetKind::Rich, &prefs),
//!     Box::new(MemoryStorage::new()),
//!     Box::new(LogNotifier),
//!     Box::new(DirectoryExporter::new(std::env::temp_dir())),
//! );
//!
//! session.bootstrap().unwrap();
//! session.widget_mut().set_content("<h1>Hello</h1>");
//! assert!(session.compose_preview().contains("<h1>Hello</h1>"));
//! ```

pub mod adapters;
pub mod config;
pub mod error;
pub mod highlight;
pub mod session;

// Re-export commonly used types
pub use config::{EditorPreferences, PlaygroundConfig, Theme};
pub use error::{PlaygroundError, Result};
pub use highlight::{highlight, Language};
pub use session::{
    PlaygroundEvent, PlaygroundOutcome, SessionController, SessionState, Tab, TabId, TabStore,
};
