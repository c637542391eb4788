//! Common test utilities and helpers

#![allow(dead_code)]

use slippy_core::adapters::{
    create_widget, FileExporter, MemoryStorage, NotificationKind, Notifier, Persistence, WidgetKind,
};
use slippy_core::{EditorPreferences, Result, SessionController};
use std::cell::RefCell;
use std::rc::Rc;

/// Notifier that records every message
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    pub messages: Rc<RefCell<Vec<(String, NotificationKind)>>>,
}

impl RecordingNotifier {
    pub fn last(&self) -> Option<(String, NotificationKind)> {
        self.messages.borrow().last().cloned()
    }

    pub fn count(&self, kind: NotificationKind) -> usize {
        self.messages.borrow().iter().filter(|(_, k)| *k == kind).count()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, kind: NotificationKind) {
        self.messages.borrow_mut().push((message.to_string(), kind));
    }
}

/// Exporter that records downloads instead of writing files
#[derive(Clone, Default)]
pub struct RecordingExporter {
    pub downloads: Rc<RefCell<Vec<(String, String)>>>,
}

impl FileExporter for RecordingExporter {
    fn download(&self, filename: &str, content: &str) {
        self.downloads
            .borrow_mut()
            .push((filename.to_string(), content.to_string()));
    }
}

/// Memory storage that outlives the session using it
#[derive(Clone, Default)]
pub struct SharedStorage {
    pub inner: Rc<RefCell<MemoryStorage>>,
}

impl Persistence for SharedStorage {
    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.inner.borrow_mut().save(key, value)
    }

    fn load(&self, key: &str) -> Result<Option<String>> {
        self.inner.borrow().load(key)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.inner.borrow_mut().remove(key)
    }
}

/// A session wired to recording fakes
pub struct TestSession {
    pub session: SessionController,
    pub notifier: RecordingNotifier,
    pub exporter: RecordingExporter,
    pub storage: SharedStorage,
}

pub fn test_session() -> TestSession {
    test_session_with(SharedStorage::default(), WidgetKind::Rich)
}

pub fn test_session_with(storage: SharedStorage, widget: WidgetKind) -> TestSession {
    let notifier = RecordingNotifier::default();
    let exporter = RecordingExporter::default();
    let session = SessionController::new(
        create_widget(widget, &EditorPreferences::default()),
        Box::new(storage.clone()),
        Box::new(notifier.clone()),
        Box::new(exporter.clone()),
    );
    TestSession {
        session,
        notifier,
        exporter,
        storage,
    }
}
