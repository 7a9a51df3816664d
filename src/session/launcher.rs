//! Starting the remote-desktop client
//!
//! The client is an opaque external process. It receives the connection file
//! path as its only argument and is not waited on.

use std::path::Path;
use std::process::Command;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Failed to start {program}: {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Something that can open a remote session for a connection file
pub trait SessionLauncher {
    fn launch(&self, rdp_file: &Path) -> Result<(), LaunchError>;
}

/// Launches the system remote-desktop client (`mstsc.exe` by default)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteDesktopClient {
    program: String,
}

impl RemoteDesktopClient {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command(&self, rdp_file: &Path) -> Command {
        // Command quotes the argument itself, paths with spaces stay intact
        let mut command = Command::new(&self.program);
        command.arg(rdp_file);
        command
    }
}

impl SessionLauncher for RemoteDesktopClient {
    fn launch(&self, rdp_file: &Path) -> Result<(), LaunchError> {
        tracing::info!("Launching {} with {}", self.program, rdp_file.display());

        let child = self
            .command(rdp_file)
            .spawn()
            .map_err(|source| LaunchError::SpawnFailed {
                program: self.program.clone(),
                source,
            })?;

        tracing::debug!("{} started with pid {}", self.program, child.id());
        Ok(())
    }
}
