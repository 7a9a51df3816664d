//! Monitor enumeration
//!
//! Reports every attached monitor in physical pixels. The process must be
//! per-monitor DPI aware before this runs, otherwise bounds come back in
//! scaled logical units.

use crate::domain::core::{Monitor, Rect};
use windows::Win32::Foundation::*;
use windows::Win32::Graphics::Gdi::*;

#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    #[error("Failed to enumerate monitors")]
    EnumerationFailed,
    #[error("No monitors found during enumeration")]
    NoMonitors,
}

/// Bit set in `MONITORINFO::dwFlags` for the primary monitor
const MONITORINFOF_PRIMARY: u32 = 1;

struct EnumContext {
    monitors: Vec<Monitor>,
}

/// Collects one monitor per callback
///
/// A monitor whose info cannot be read is skipped and enumeration continues.
unsafe extern "system" fn enum_monitor_proc(
    hmonitor: HMONITOR,
    _hdc: HDC,
    _rect: *mut RECT,
    lparam: LPARAM,
) -> BOOL {
    unsafe {
        let context = &mut *(lparam.0 as *mut EnumContext);

        let mut info = MONITORINFO {
            cbSize: std::mem::size_of::<MONITORINFO>() as u32,
            ..Default::default()
        };

        if GetMonitorInfoW(hmonitor, &mut info) == FALSE {
            tracing::warn!("Skipping monitor {:?}: GetMonitorInfoW failed", hmonitor);
            return TRUE;
        }

        let bounds = Rect::new(
            info.rcMonitor.left,
            info.rcMonitor.top,
            info.rcMonitor.right - info.rcMonitor.left,
            info.rcMonitor.bottom - info.rcMonitor.top,
        );

        let mut monitor = Monitor::new(context.monitors.len(), bounds);
        monitor.is_primary = (info.dwFlags & MONITORINFOF_PRIMARY) != 0;
        context.monitors.push(monitor);

        TRUE
    }
}

/// Enumerates all monitors in system order
///
/// Indices are assigned sequentially from zero and are the identifiers
/// written to connection files.
pub fn enumerate_monitors() -> Result<Vec<Monitor>, MonitorError> {
    let mut context = EnumContext {
        monitors: Vec::new(),
    };

    unsafe {
        if EnumDisplayMonitors(
            None,
            None,
            Some(enum_monitor_proc),
            LPARAM(&mut context as *mut _ as isize),
        ) == FALSE
        {
            return Err(MonitorError::EnumerationFailed);
        }
    }

    if context.monitors.is_empty() {
        return Err(MonitorError::NoMonitors);
    }

    for monitor in &context.monitors {
        tracing::debug!(
            "Monitor {}: {:?}{}",
            monitor.index,
            monitor.bounds,
            if monitor.is_primary { " (primary)" } else { "" }
        );
    }

    Ok(context.monitors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_enumerate_monitors() {
        let monitors = enumerate_monitors().expect("Should be able to enumerate monitors");
        assert!(!monitors.is_empty(), "Should find at least one monitor");

        assert!(
            monitors.iter().any(|m| m.is_primary),
            "Should have a primary monitor"
        );

        for (i, monitor) in monitors.iter().enumerate() {
            assert_eq!(monitor.index, i, "Monitor indices should be sequential");
        }
    }
}
