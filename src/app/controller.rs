//! Application controller and coordination layer
//!
//! The controller owns the monitor selection and the file target, and runs
//! the user-triggered flows: loading a selection from an existing file,
//! writing a connection file and launching the remote session. Every
//! user-facing outcome goes through a `Notifier`, so the flows run the same
//! under the Win32 window and in tests.

use std::path::{Path, PathBuf};

use chrono::Local;
use thiserror::Error;

use crate::app::state::{FileTarget, Notice, NoticeLevel, Notifier};
use crate::config::SelectorConfig;
use crate::domain::core::Monitor;
use crate::domain::layout::{MonitorLayout, compute_layout};
use crate::domain::selection::MonitorSelection;
use crate::rdp::{self, RdpDocument, RdpFileError, SelectionDirective};
use crate::session::{LaunchError, SessionLauncher};

/// Errors that end a generate-and-connect action
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("No monitors selected")]
    NoSelection,
    #[error(transparent)]
    File(#[from] RdpFileError),
    #[error(transparent)]
    Launch(#[from] LaunchError),
}

/// Result of loading a selection from a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The file had a selection directive; `matched` monitors are now selected
    Loaded { matched: usize },
    /// The file has no selection directive; every monitor is unselected
    NoSelectionFound,
    /// The file does not exist; selection left untouched
    FileMissing,
    /// Reading failed after the selection was cleared
    ReadFailed,
}

/// Main application controller
pub struct SelectorController<L: SessionLauncher> {
    config: SelectorConfig,
    layout: MonitorLayout,
    selection: MonitorSelection,
    target: FileTarget,
    /// Directory for generated files and the initial directory of the file prompt
    output_dir: PathBuf,
    launcher: L,
}

impl<L: SessionLauncher> SelectorController<L> {
    /// Creates a controller with every monitor selected
    pub fn new(
        monitors: &[Monitor],
        config: SelectorConfig,
        output_dir: PathBuf,
        launcher: L,
    ) -> Self {
        let layout = compute_layout(monitors, &config.layout);
        let selection = MonitorSelection::new(monitors, &layout, true);

        tracing::info!(
            "Selector initialized with {} monitors, output directory {}",
            monitors.len(),
            output_dir.display()
        );

        Self {
            config,
            layout,
            selection,
            target: FileTarget::NewFile,
            output_dir,
            launcher,
        }
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    pub fn layout(&self) -> &MonitorLayout {
        &self.layout
    }

    pub fn selection(&self) -> &MonitorSelection {
        &self.selection
    }

    pub fn target(&self) -> &FileTarget {
        &self.target
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Text of the selected-file indicator
    pub fn file_label(&self) -> String {
        self.target.label()
    }

    /// Toggles the monitor under a canvas point
    ///
    /// # Returns
    /// Index of the toggled monitor, or None if the click missed every tile
    pub fn handle_click(&mut self, x: i32, y: i32) -> Option<usize> {
        let index = self.selection.monitor_at(x, y)?;
        self.selection.toggle(index)?;
        Some(index)
    }

    /// Makes `path` the edit target and loads its selection
    pub fn select_existing_file(&mut self, path: PathBuf, notifier: &mut dyn Notifier) -> LoadOutcome {
        tracing::info!("Selected existing file {}", path.display());
        self.target = FileTarget::Existing(path.clone());
        self.load_selection_from_file(&path, notifier)
    }

    /// Replaces the current selection with the one stored in `path`
    ///
    /// All monitors are cleared first, then every monitor listed in the
    /// file's `selectedmonitors` directive is selected again.
    pub fn load_selection_from_file(&mut self, path: &Path, notifier: &mut dyn Notifier) -> LoadOutcome {
        if !path.exists() {
            notify(
                notifier,
                Notice::warning(
                    "File Not Found",
                    format!("The file {} does not exist.", path.display()),
                ),
            );
            return LoadOutcome::FileMissing;
        }

        self.selection.reset(false);

        let document = match rdp::read_document(path) {
            Ok(document) => document,
            Err(err) => {
                notify(
                    notifier,
                    Notice::error(
                        "Error",
                        format!("Error reading monitor selection from file: {}", err),
                    ),
                );
                return LoadOutcome::ReadFailed;
            }
        };

        match document.parse_selection() {
            SelectionDirective::Found(indices) => {
                let matched = self.selection.apply_indices(&indices);
                tracing::info!(
                    "Loaded selection {:?} from {} ({} monitors matched)",
                    indices,
                    path.display(),
                    matched
                );
                LoadOutcome::Loaded { matched }
            }
            SelectionDirective::Missing => {
                notify(
                    notifier,
                    Notice::info(
                        "No Selection Found",
                        "No monitor selection found in the RDP file. All monitors will be unselected.",
                    ),
                );
                LoadOutcome::NoSelectionFound
            }
        }
    }

    /// Writes the connection file for the current selection
    ///
    /// Edits the chosen file when there is one, falling back to a new file
    /// if the edit fails. Nothing is written when no monitor is selected.
    pub fn write_connection_file(&self, notifier: &mut dyn Notifier) -> Result<PathBuf, GenerateError> {
        let indices = self.selection.selected_indices();
        if indices.is_empty() {
            notify(
                notifier,
                Notice::warning("No Selection", "Please select at least one monitor."),
            );
            return Err(GenerateError::NoSelection);
        }

        match self.target.existing_path() {
            Some(path) => self.edit_existing_file(path, &indices, notifier),
            None => self.generate_new_file(&indices, notifier),
        }
    }

    /// Writes the connection file, then launches the remote session with it
    ///
    /// # Returns
    /// Path of the launched file; the caller closes the window on success
    pub fn generate_and_connect(&self, notifier: &mut dyn Notifier) -> Result<PathBuf, GenerateError> {
        let path = self.write_connection_file(notifier)?;
        self.connect(&path, notifier)?;
        Ok(path)
    }

    /// Launches the remote session for an already written file
    pub fn connect(&self, path: &Path, notifier: &mut dyn Notifier) -> Result<(), GenerateError> {
        if let Err(err) = self.launcher.launch(path) {
            notify(
                notifier,
                Notice::error("Error", format!("Error launching RDP session: {}", err)),
            );
            return Err(err.into());
        }

        Ok(())
    }

    fn edit_existing_file(
        &self,
        path: &Path,
        indices: &[usize],
        notifier: &mut dyn Notifier,
    ) -> Result<PathBuf, GenerateError> {
        let edited = rdp::read_document(path).and_then(|mut document| {
            let outcome = document.merge_selection(indices);
            tracing::debug!("Merged selection into {}: {:?}", path.display(), outcome);
            rdp::write_document(path, &document)
        });

        match edited {
            Ok(()) => {
                notify(
                    notifier,
                    Notice::info(
                        "File Updated",
                        format!("RDP file has been updated:\n{}", path.display()),
                    ),
                );
                Ok(path.to_path_buf())
            }
            Err(RdpFileError::NotFound { .. }) => {
                notify(
                    notifier,
                    Notice::warning(
                        "File Not Found",
                        format!(
                            "The file {} no longer exists. Creating a new file instead.",
                            path.display()
                        ),
                    ),
                );
                self.generate_new_file(indices, notifier)
            }
            Err(err) => {
                notify(
                    notifier,
                    Notice::error(
                        "Error",
                        format!("Error updating RDP file: {}\nCreating a new file instead.", err),
                    ),
                );
                self.generate_new_file(indices, notifier)
            }
        }
    }

    fn generate_new_file(&self, indices: &[usize], notifier: &mut dyn Notifier) -> Result<PathBuf, GenerateError> {
        let file_name = rdp::timestamped_file_name(
            &self.config.file_prefix,
            &self.config.file_extension,
            Local::now().naive_local(),
        );
        let path = self.output_dir.join(file_name);

        if let Err(err) = rdp::write_document(&path, &RdpDocument::generate(indices)) {
            notify(
                notifier,
                Notice::error("Error", format!("Error saving RDP file: {}", err)),
            );
            return Err(err.into());
        }

        notify(
            notifier,
            Notice::info(
                "File Saved",
                format!("RDP file has been saved next to the executable:\n{}", path.display()),
            ),
        );
        Ok(path)
    }
}

/// Logs a notice and hands it to the notifier
fn notify(notifier: &mut dyn Notifier, notice: Notice) {
    match notice.level {
        NoticeLevel::Info => tracing::info!("{}: {}", notice.title, notice.message),
        NoticeLevel::Warning => tracing::warn!("{}: {}", notice.title, notice.message),
        NoticeLevel::Error => tracing::error!("{}: {}", notice.title, notice.message),
    }
    notifier.notify(notice);
}
