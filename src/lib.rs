//! RDP Monitor Select
//!
//! Picks which physical monitors a remote-desktop session should span and
//! writes that choice into an RDP connection file before launching the
//! client. Layout, selection, the file codec and the controller are
//! platform-neutral; the window and monitor enumeration are Win32-only.

pub mod app;
pub mod config;
pub mod domain;
pub mod logging;
#[cfg(windows)]
pub mod platform;
pub mod rdp;
pub mod session;
pub mod ui;
