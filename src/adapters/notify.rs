//! User-facing notifications

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{error, info};

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NotificationKind::Info => "info",
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
        };
        f.write_str(label)
    }
}

/// Fire-and-forget feedback sink. The session never depends on the outcome.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier {
    fn notify(&self, message: &str, kind: NotificationKind);
}

/// Notifier that writes to the tracing log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str, kind: NotificationKind) {
        match kind {
            NotificationKind::Error => error!("Notification ({}): {}", kind, message),
            _ => info!("Notification ({}): {}", kind, message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_display() {
        assert_eq!(NotificationKind::Success.to_string(), "success");
        assert_eq!(
            serde_json::to_string(&NotificationKind::Error).unwrap(),
            "\"error\""
        );
    }

    #[test]
    fn test_log_notifier_accepts_all_kinds() {
        let notifier = LogNotifier;
        notifier.notify("hello", NotificationKind::Info);
        notifier.notify("saved", NotificationKind::Success);
        notifier.notify("broken", NotificationKind::Error);
    }
}
