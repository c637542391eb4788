//! Tab store and document session
//!
//! [`TabStore`] keeps the ordered tabs; [`SessionController`] moves content
//! between the store and the single editor widget and drives save, run and
//! preview.

mod controller;
mod events;
pub mod preview;
mod saved_files;
mod store;
mod tab;

pub use controller::{SessionController, SessionState, DEFAULT_TABS};
pub use events::{PlaygroundEvent, PlaygroundOutcome, RunRequest};
pub use saved_files::{SavedFile, SavedFiles};
pub use store::{ClosedTab, TabStore};
pub use tab::{Tab, TabId};
