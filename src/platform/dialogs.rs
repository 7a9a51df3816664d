//! Common dialogs: the open-file prompt and message boxes

use std::path::{Path, PathBuf};

use crate::app::state::{Notice, NoticeLevel, Notifier};
use crate::platform::windows::to_wstring;
use windows::core::{PCWSTR, PWSTR};
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::Controls::Dialogs::{
    GetOpenFileNameW, OFN_FILEMUSTEXIST, OFN_NOCHANGEDIR, OFN_PATHMUSTEXIST, OPENFILENAMEW,
};
use windows::Win32::UI::WindowsAndMessaging::{
    MB_ICONERROR, MB_ICONINFORMATION, MB_ICONWARNING, MB_OK, MESSAGEBOX_STYLE, MessageBoxW,
};

const MAX_PATH_CHARS: usize = 32_768;

/// Asks the user for an existing `.rdp` file
///
/// Returns `None` when the prompt is cancelled.
pub fn open_rdp_file(owner: HWND, initial_dir: &Path) -> Option<PathBuf> {
    // Pairs of display name and pattern, double-null terminated
    let filter: Vec<u16> = "RDP Files (*.rdp)\0*.rdp\0\0".encode_utf16().collect();
    let title = to_wstring("Select an RDP File to Edit");
    let initial_dir = to_wstring(&initial_dir.to_string_lossy());
    let mut file_buffer = vec![0u16; MAX_PATH_CHARS];

    let mut ofn = OPENFILENAMEW {
        lStructSize: std::mem::size_of::<OPENFILENAMEW>() as u32,
        hwndOwner: owner,
        lpstrFilter: PCWSTR(filter.as_ptr()),
        nFilterIndex: 1,
        lpstrFile: PWSTR(file_buffer.as_mut_ptr()),
        nMaxFile: file_buffer.len() as u32,
        lpstrInitialDir: PCWSTR(initial_dir.as_ptr()),
        lpstrTitle: PCWSTR(title.as_ptr()),
        Flags: OFN_FILEMUSTEXIST | OFN_PATHMUSTEXIST | OFN_NOCHANGEDIR,
        ..Default::default()
    };

    let accepted = unsafe { GetOpenFileNameW(&mut ofn) }.as_bool();
    if !accepted {
        tracing::debug!("File prompt cancelled");
        return None;
    }

    let len = file_buffer
        .iter()
        .position(|&c| c == 0)
        .unwrap_or(file_buffer.len());
    Some(PathBuf::from(String::from_utf16_lossy(&file_buffer[..len])))
}

fn message_box_style(level: NoticeLevel) -> MESSAGEBOX_STYLE {
    match level {
        NoticeLevel::Info => MB_OK | MB_ICONINFORMATION,
        NoticeLevel::Warning => MB_OK | MB_ICONWARNING,
        NoticeLevel::Error => MB_OK | MB_ICONERROR,
    }
}

/// Shows every notice as a modal message box owned by a window
pub struct MessageBoxNotifier {
    owner: HWND,
}

impl MessageBoxNotifier {
    pub fn new(owner: HWND) -> Self {
        Self { owner }
    }
}

impl Notifier for MessageBoxNotifier {
    fn notify(&mut self, notice: Notice) {
        let text = to_wstring(&notice.message);
        let caption = to_wstring(&notice.title);
        unsafe {
            MessageBoxW(
                self.owner,
                PCWSTR(text.as_ptr()),
                PCWSTR(caption.as_ptr()),
                message_box_style(notice.level),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_levels_map_to_icons() {
        assert_eq!(message_box_style(NoticeLevel::Info), MB_OK | MB_ICONINFORMATION);
        assert_eq!(message_box_style(NoticeLevel::Warning), MB_OK | MB_ICONWARNING);
        assert_eq!(message_box_style(NoticeLevel::Error), MB_OK | MB_ICONERROR);
    }
}
