//! Configuration module for monitor-select
//!
//! In-process settings shared by the selector window, the layout engine and
//! the file/launch flows. Nothing is persisted; the defaults reproduce the
//! stock 800x600 selector.

pub mod selector;

pub use selector::{SelectorConfig, SelectorConfigError};
