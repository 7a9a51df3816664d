//! General Windows platform utilities
//!
//! Win32 helpers that don't fit into other specialized platform modules.

use crate::domain::core::Rect;
use windows::Win32::Foundation::RECT;
use windows::Win32::UI::HiDpi::{
    DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2, SetProcessDpiAwarenessContext,
};
use windows::Win32::UI::WindowsAndMessaging::{
    SPI_GETWORKAREA, SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS, SystemParametersInfoW,
};

/// Opts the process into per-monitor DPI awareness
///
/// Must run before any window is created or monitor is queried, so that
/// Win32 reports real pixels instead of scaled ones.
pub fn enable_dpi_awareness() -> windows::core::Result<()> {
    unsafe { SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2) }
}

/// Work area of the primary monitor, excluding the taskbar
pub fn primary_work_area() -> windows::core::Result<Rect> {
    let mut work_area = RECT::default();
    unsafe {
        SystemParametersInfoW(
            SPI_GETWORKAREA,
            0,
            Some(&mut work_area as *mut _ as *mut _),
            SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS(0),
        )?;
    }
    Ok(win32_rect_to_rect(&work_area))
}

/// Converts a Windows RECT to a domain rectangle
pub fn win32_rect_to_rect(rect: &RECT) -> Rect {
    Rect::new(rect.left, rect.top, rect.right - rect.left, rect.bottom - rect.top)
}

/// Null-terminated UTF-16 copy of `input`
pub fn to_wstring(input: &str) -> Vec<u16> {
    input.encode_utf16().chain(std::iter::once(0)).collect()
}
