//! Domain logic and core data structures
//!
//! Pure monitor geometry and selection state, independent of Win32.

pub mod core;
pub mod layout;
pub mod selection;

pub use core::{Monitor, Rect};
pub use layout::{LayoutParams, MonitorLayout, compute_layout};
pub use selection::{MonitorSelection, MonitorViewModel};
