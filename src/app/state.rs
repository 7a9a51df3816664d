//! Selector state that lives outside the monitor records
//!
//! Tracks which file the next generate action writes to, and the notices the
//! controller raises for the user.

use std::path::{Path, PathBuf};

/// Where the next generate action writes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FileTarget {
    /// Create a new timestamped file next to the executable
    #[default]
    NewFile,
    /// Merge the selection into a file the user picked
    Existing(PathBuf),
}

impl FileTarget {
    pub fn existing_path(&self) -> Option<&Path> {
        match self {
            FileTarget::NewFile => None,
            FileTarget::Existing(path) => Some(path),
        }
    }

    /// Text of the selected-file indicator
    pub fn label(&self) -> String {
        match self {
            FileTarget::NewFile => "No file selected - will create new".to_string(),
            FileTarget::Existing(path) => {
                let name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                format!("Selected: {}", name)
            }
        }
    }
}

/// Severity of a user-facing notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A blocking message shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, title, message)
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, title, message)
    }

    fn new(level: NoticeLevel, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Presents notices to the user
///
/// The window shows message boxes. A `Vec` collects notices so they can be
/// shown later, outside the code that raised them.
pub trait Notifier {
    fn notify(&mut self, notice: Notice);
}

impl Notifier for Vec<Notice> {
    fn notify(&mut self, notice: Notice) {
        self.push(notice);
    }
}
