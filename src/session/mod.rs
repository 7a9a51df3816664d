//! Remote session launching

pub mod launcher;

pub use launcher::{LaunchError, RemoteDesktopClient, SessionLauncher};
