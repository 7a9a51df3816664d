pub mod renderer;
#[cfg(windows)]
pub mod selector_window;

pub use renderer::{MonitorMapLayout, MonitorMapRenderer, RendererError};
#[cfg(windows)]
pub use selector_window::{SelectorExit, SelectorWindow, WindowError};
