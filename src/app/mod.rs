//! Application orchestration layer
//!
//! Coordinates the domain, file codec and session launcher on behalf of the
//! selector window.

pub mod controller;
pub mod state;

pub use controller::{GenerateError, LoadOutcome, SelectorController};
pub use state::{FileTarget, Notice, NoticeLevel, Notifier};
