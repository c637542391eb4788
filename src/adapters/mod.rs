//! Collaborators injected into the session controller
//!
//! Editor widget, key-value persistence, file export and notifications.

pub mod export;
pub mod notify;
pub mod persistence;
pub mod plain;
pub mod rich;
pub mod widget;

pub use export::{DirectoryExporter, FileExporter};
pub use notify::{LogNotifier, NotificationKind, Notifier};
pub use persistence::{keys, FileStorage, MemoryStorage, Persistence};
pub use plain::PlainTextWidget;
pub use rich::{Position, RichWidget, HISTORY_LIMIT};
pub use widget::{create_widget, EditorWidget, WidgetKind};
