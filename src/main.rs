//! RDP Monitor Select: choose monitors, write the connection file, connect

use std::process::ExitCode;

use monitor_select::logging;

fn main() -> ExitCode {
    logging::init();
    run()
}

#[cfg(windows)]
fn run() -> ExitCode {
    use monitor_select::app::SelectorController;
    use monitor_select::config::SelectorConfig;
    use monitor_select::platform::{monitors, windows};
    use monitor_select::rdp::store::executable_dir;
    use monitor_select::session::RemoteDesktopClient;
    use monitor_select::ui::{SelectorExit, SelectorWindow};

    // Before any other Win32 call, so monitor bounds come back in real pixels
    if let Err(err) = windows::enable_dpi_awareness() {
        tracing::warn!("Could not enable per-monitor DPI awareness: {}", err);
    }

    let monitors = match monitors::enumerate_monitors() {
        Ok(monitors) => monitors,
        Err(err) => {
            tracing::error!("Monitor enumeration failed: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let config = SelectorConfig::default();
    if let Err(err) = config.validate() {
        tracing::warn!("Invalid selector configuration, sanitizing: {}", err);
    }
    let config = config.sanitized();

    let output_dir = match executable_dir() {
        Ok(dir) => dir,
        Err(err) => {
            tracing::error!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    let launcher = RemoteDesktopClient::new(config.client_program.clone());
    let controller = SelectorController::new(&monitors, config, output_dir, launcher);

    match SelectorWindow::run(controller) {
        Ok(SelectorExit::Connected(path)) => {
            tracing::info!("Session started with {}", path.display());
            ExitCode::SUCCESS
        }
        Ok(SelectorExit::Closed) => {
            tracing::info!("Selector closed without connecting");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("Selector window failed: {}", err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(windows))]
fn run() -> ExitCode {
    tracing::error!("monitor-select needs a Windows desktop to enumerate monitors and show its window");
    ExitCode::FAILURE
}
