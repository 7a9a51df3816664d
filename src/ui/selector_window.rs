//! Main selector window implemented with raw Win32 controls.
//!
//! The monitor map is painted from a tiny-skia pixmap and captioned with
//! GDI text. Clicking a tile toggles that monitor; the two buttons browse for
//! an existing connection file and generate-and-connect. The window closes
//! itself once a session has been launched.
//!
//! File prompts and message boxes run their own message loops, which call
//! back into `selector_wnd_proc`. Button handlers therefore take the window
//! state only between those calls and queue notices until it is released.

#![allow(unsafe_op_in_unsafe_fn)]

use std::ffi::c_void;
use std::path::PathBuf;

use crate::app::{Notice, Notifier, SelectorController};
use crate::platform::dialogs::{MessageBoxNotifier, open_rdp_file};
use crate::platform::windows::{primary_work_area, to_wstring, win32_rect_to_rect};
use crate::session::RemoteDesktopClient;
use crate::ui::renderer::{MonitorMapLayout, MonitorMapRenderer, pixmap_to_bgra};
use windows::core::{w, PCWSTR};
use windows::Win32::Foundation::{
    COLORREF, FALSE, GetLastError, HINSTANCE, HWND, LPARAM, LRESULT, RECT, WIN32_ERROR, WPARAM,
};
use windows::Win32::Graphics::Gdi::{
    BI_RGB, BITMAPINFO, BITMAPINFOHEADER, BeginPaint, COLOR_BTNFACE, DEFAULT_GUI_FONT, DIB_RGB_COLORS,
    DT_CALCRECT, DT_CENTER, DT_WORDBREAK, DrawTextW, EndPaint, GetStockObject, HBRUSH, HDC, HFONT,
    HGDIOBJ, InvalidateRect, PAINTSTRUCT, SRCCOPY, SelectObject, SetBkMode, SetTextColor,
    StretchDIBits, TRANSPARENT,
};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::*;

const WINDOW_CLASS: PCWSTR = w!("MonitorSelectWindow");
const WINDOW_TITLE: PCWSTR = w!("RDP Monitor Selector");

const ID_BTN_BROWSE: i32 = 1001;
const ID_BTN_GENERATE: i32 = 1002;

const INSTRUCTION_TEXT: &str = "Click on monitors to select/deselect them for your RDP session \
(only contiguous monitors can be selected)";

// Matches the Win32 ERROR_CLASS_ALREADY_EXISTS (1410) code.
const CLASS_ALREADY_EXISTS_ERR: WIN32_ERROR = WIN32_ERROR(1410);

#[derive(Debug, thiserror::Error)]
pub enum WindowError {
    #[error("Failed to register selector window class")]
    ClassRegistrationFailed,
    #[error("Failed to create selector window")]
    WindowCreationFailed,
    #[error("Windows API error: {0}")]
    Win32Error(String),
}

/// How the window was closed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorExit {
    /// A session was launched with this connection file
    Connected(PathBuf),
    /// The user closed the window
    Closed,
}

/// Public entry point: shows the window and runs its message loop
pub struct SelectorWindow;

impl SelectorWindow {
    pub fn run(
        controller: SelectorController<RemoteDesktopClient>,
    ) -> Result<SelectorExit, WindowError> {
        let state = WindowState::new(controller);
        let state_ptr = Box::into_raw(Box::new(state));

        unsafe {
            if let Err(err) = create_selector_window(state_ptr) {
                let _ = Box::from_raw(state_ptr);
                return Err(err);
            }
            ShowWindow((*state_ptr).hwnd, SW_SHOW);
            let _ = SetForegroundWindow((*state_ptr).hwnd);
        }

        run_message_loop(state_ptr);

        let boxed_state = unsafe { Box::from_raw(state_ptr) };
        Ok(boxed_state.exit)
    }
}

struct WindowState {
    hwnd: HWND,
    controller: SelectorController<RemoteDesktopClient>,
    renderer: MonitorMapRenderer,
    file_label: HWND,
    font: HFONT,
    exit: SelectorExit,
}

impl WindowState {
    fn new(controller: SelectorController<RemoteDesktopClient>) -> Self {
        let font = unsafe { HFONT(GetStockObject(DEFAULT_GUI_FONT).0) };
        Self {
            hwnd: HWND(0),
            controller,
            renderer: MonitorMapRenderer::new(),
            file_label: HWND(0),
            font,
            exit: SelectorExit::Closed,
        }
    }
}

fn create_selector_window(state_ptr: *mut WindowState) -> Result<(), WindowError> {
    unsafe {
        let module = GetModuleHandleW(PCWSTR::null())
            .map_err(|e| WindowError::Win32Error(format!("{:?}", e)))?;
        let instance: HINSTANCE = module.into();

        register_window_class(instance)?;

        let config = (*state_ptr).controller.config();
        let (width, height) = (config.window_width, config.window_height);
        let (x, y) = match primary_work_area() {
            Ok(work_area) => {
                let placed = work_area.centered(width, height);
                (placed.x, placed.y)
            }
            Err(err) => {
                tracing::debug!("No work area to center on: {}", err);
                (CW_USEDEFAULT, CW_USEDEFAULT)
            }
        };

        let hwnd = CreateWindowExW(
            WINDOW_EX_STYLE(WS_EX_CONTROLPARENT.0),
            WINDOW_CLASS,
            WINDOW_TITLE,
            WS_OVERLAPPED | WS_CAPTION | WS_SYSMENU | WS_MINIMIZEBOX,
            x,
            y,
            width,
            height,
            None,
            None,
            instance,
            Some(state_ptr as *const c_void),
        );

        if hwnd.0 == 0 {
            return Err(WindowError::WindowCreationFailed);
        }

        (*state_ptr).hwnd = hwnd;
        Ok(())
    }
}

fn register_window_class(instance: HINSTANCE) -> Result<(), WindowError> {
    unsafe {
        let wnd_class = WNDCLASSW {
            style: CS_HREDRAW | CS_VREDRAW,
            lpfnWndProc: Some(selector_wnd_proc),
            hInstance: instance,
            hCursor: LoadCursorW(None, IDC_ARROW).unwrap_or_default(),
            hbrBackground: HBRUSH((COLOR_BTNFACE.0 + 1) as isize),
            lpszClassName: WINDOW_CLASS,
            ..Default::default()
        };

        if RegisterClassW(&wnd_class) == 0 {
            match GetLastError() {
                Err(err) if err.code() == CLASS_ALREADY_EXISTS_ERR.to_hresult() => {}
                _ => return Err(WindowError::ClassRegistrationFailed),
            }
        }
    }

    Ok(())
}

unsafe extern "system" fn selector_wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_CREATE => {
            let createstruct = &*(lparam.0 as *const CREATESTRUCTW);
            SetWindowLongPtrW(hwnd, GWLP_USERDATA, createstruct.lpCreateParams as isize);
            if let Some(state) = window_state_mut(hwnd) {
                state.hwnd = hwnd;
                state.build_controls();
            }
            LRESULT(0)
        }
        WM_PAINT => {
            let mut ps = PAINTSTRUCT::default();
            let hdc = BeginPaint(hwnd, &mut ps);
            if let Some(state) = window_state(hwnd) {
                state.paint_map(hdc);
            }
            EndPaint(hwnd, &ps);
            LRESULT(0)
        }
        WM_LBUTTONDOWN => {
            // Signed client coordinates packed into the low and high words
            let x = (lparam.0 & 0xFFFF) as i16 as i32;
            let y = ((lparam.0 >> 16) & 0xFFFF) as i16 as i32;
            if let Some(state) = window_state_mut(hwnd) {
                state.handle_click(x, y);
            }
            LRESULT(0)
        }
        WM_COMMAND => {
            handle_command(hwnd, wparam);
            LRESULT(0)
        }
        WM_CLOSE => {
            let _ = DestroyWindow(hwnd);
            LRESULT(0)
        }
        WM_DESTROY => {
            if let Some(state) = window_state_mut(hwnd) {
                state.hwnd = HWND(0);
            }
            PostQuitMessage(0);
            LRESULT(0)
        }
        _ => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}

fn run_message_loop(state_ptr: *mut WindowState) {
    unsafe {
        let mut msg = MSG::default();
        while GetMessageW(&mut msg, None, 0, 0).as_bool() {
            let hwnd = (*state_ptr).hwnd;
            if hwnd.0 != 0 && IsDialogMessageW(hwnd, &msg).as_bool() {
                continue;
            }
            TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
}

unsafe fn window_state(hwnd: HWND) -> Option<&'static WindowState> {
    let ptr = GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *const WindowState;
    if ptr.is_null() {
        None
    } else {
        Some(&*ptr)
    }
}

unsafe fn window_state_mut(hwnd: HWND) -> Option<&'static mut WindowState> {
    let ptr = GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *mut WindowState;
    if ptr.is_null() {
        None
    } else {
        Some(&mut *ptr)
    }
}

impl WindowState {
    fn client_size(&self) -> (i32, i32) {
        let mut rect = RECT::default();
        unsafe {
            if GetClientRect(self.hwnd, &mut rect).is_err() {
                return (0, 0);
            }
        }
        let client = win32_rect_to_rect(&rect);
        (client.w, client.h)
    }

    fn build_controls(&mut self) {
        let (client_w, client_h) = self.client_size();
        let padding = self.controller.config().layout.padding;

        create_static(
            self.hwnd,
            self.font,
            INSTRUCTION_TEXT,
            padding,
            client_h - 100,
            client_w - padding * 2,
            20,
        );

        create_button(
            self.hwnd,
            self.font,
            w!("Select Existing RDP File"),
            ID_BTN_BROWSE,
            padding,
            client_h - 70,
            150,
            30,
        );

        self.file_label = create_static(
            self.hwnd,
            self.font,
            &self.controller.file_label(),
            padding + 160,
            client_h - 65,
            client_w - padding * 2 - 160,
            20,
        );

        // `&&` renders as a literal ampersand in button captions
        create_button(
            self.hwnd,
            self.font,
            w!("Generate RDP File && Connect"),
            ID_BTN_GENERATE,
            client_w / 2 - 100,
            client_h - 30,
            200,
            30,
        );
    }

    fn paint_map(&self, hdc: HDC) {
        let padding = self.controller.config().layout.padding;
        let (canvas_w, canvas_h) = self.controller.layout().canvas_size(padding);

        let layout = match MonitorMapLayout::from_selection(
            self.controller.selection(),
            canvas_w,
            canvas_h,
        ) {
            Ok(layout) => layout,
            Err(err) => {
                tracing::error!("Cannot lay out monitor map: {}", err);
                return;
            }
        };

        let pixmap = match self.renderer.render_layout(&layout) {
            Ok(pixmap) => pixmap,
            Err(err) => {
                tracing::error!("Cannot render monitor map: {}", err);
                return;
            }
        };
        let pixels = pixmap_to_bgra(&pixmap);

        let width = pixmap.width() as i32;
        let height = pixmap.height() as i32;
        let bitmap_info = BITMAPINFO {
            bmiHeader: BITMAPINFOHEADER {
                biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
                biWidth: width,
                biHeight: -height, // top-down rows, same order as the pixmap
                biPlanes: 1,
                biBitCount: 32,
                biCompression: BI_RGB.0,
                ..Default::default()
            },
            ..Default::default()
        };

        unsafe {
            StretchDIBits(
                hdc,
                0,
                0,
                width,
                height,
                0,
                0,
                width,
                height,
                Some(pixels.as_ptr() as *const c_void),
                &bitmap_info,
                DIB_RGB_COLORS,
                SRCCOPY,
            );

            SetBkMode(hdc, TRANSPARENT);
            SetTextColor(hdc, COLORREF(0x00000000));
            let old_font = SelectObject(hdc, HGDIOBJ(self.font.0));

            for tile in &layout.tiles {
                let mut bounds = RECT {
                    left: tile.rect.left() as i32,
                    top: tile.rect.top() as i32,
                    right: tile.rect.right() as i32,
                    bottom: tile.rect.bottom() as i32,
                };
                let mut text: Vec<u16> = tile.caption.encode_utf16().collect();

                let mut measured = bounds;
                DrawTextW(hdc, &mut text, &mut measured, DT_CENTER | DT_WORDBREAK | DT_CALCRECT);
                let text_height = measured.bottom - measured.top;
                bounds.top += ((bounds.bottom - bounds.top) - text_height).max(0) / 2;

                DrawTextW(hdc, &mut text, &mut bounds, DT_CENTER | DT_WORDBREAK);
            }

            SelectObject(hdc, old_font);
        }
    }

    fn handle_click(&mut self, x: i32, y: i32) {
        if let Some(index) = self.controller.handle_click(x, y) {
            tracing::debug!("Toggled monitor {} from map click", index);
            self.invalidate_map();
        }
    }

    fn invalidate_map(&self) {
        unsafe {
            let _ = InvalidateRect(self.hwnd, None, FALSE);
        }
    }
}

unsafe fn handle_command(hwnd: HWND, wparam: WPARAM) {
    let command_id = (wparam.0 & 0xFFFF) as i32;
    let notify_code = ((wparam.0 >> 16) & 0xFFFF) as u32;
    if notify_code != BN_CLICKED as u32 {
        return;
    }

    match command_id {
        ID_BTN_BROWSE => browse_for_file(hwnd),
        ID_BTN_GENERATE => generate_and_connect(hwnd),
        _ => {}
    }
}

unsafe fn browse_for_file(hwnd: HWND) {
    let Some(initial_dir) =
        window_state(hwnd).map(|state| state.controller.output_dir().to_path_buf())
    else {
        return;
    };
    let Some(path) = open_rdp_file(hwnd, &initial_dir) else {
        return;
    };

    let mut pending: Vec<Notice> = Vec::new();
    if let Some(state) = window_state_mut(hwnd) {
        state.controller.select_existing_file(path, &mut pending);
        set_control_text(state.file_label, &state.controller.file_label());
        state.invalidate_map();
    }
    show_notices(hwnd, pending);
}

/// Shows the save notice before the client starts, then closes the window
unsafe fn generate_and_connect(hwnd: HWND) {
    let mut pending: Vec<Notice> = Vec::new();
    let written = match window_state(hwnd) {
        Some(state) => state.controller.write_connection_file(&mut pending),
        None => return,
    };
    show_notices(hwnd, std::mem::take(&mut pending));

    let path = match written {
        Ok(path) => path,
        Err(err) => {
            tracing::warn!("No connection file written: {}", err);
            return;
        }
    };

    let connected = match window_state(hwnd) {
        Some(state) => state.controller.connect(&path, &mut pending),
        None => return,
    };
    show_notices(hwnd, pending);

    match connected {
        Ok(()) => {
            if let Some(state) = window_state_mut(hwnd) {
                state.exit = SelectorExit::Connected(path);
            }
            let _ = PostMessageW(hwnd, WM_CLOSE, WPARAM(0), LPARAM(0));
        }
        Err(err) => tracing::warn!("Session not started: {}", err),
    }
}

fn show_notices(hwnd: HWND, notices: Vec<Notice>) {
    let mut notifier = MessageBoxNotifier::new(hwnd);
    for notice in notices {
        notifier.notify(notice);
    }
}

fn apply_font(hwnd: HWND, font: HFONT) {
    unsafe {
        SendMessageW(hwnd, WM_SETFONT, WPARAM(font.0 as usize), LPARAM(1));
    }
}

fn create_static(
    parent: HWND,
    font: HFONT,
    text: &str,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
) -> HWND {
    unsafe {
        let hwnd = CreateWindowExW(
            WINDOW_EX_STYLE(0),
            w!("STATIC"),
            PCWSTR::null(),
            WS_CHILD | WS_VISIBLE,
            x,
            y,
            width,
            height,
            parent,
            None,
            None,
            None,
        );
        apply_font(hwnd, font);
        set_control_text(hwnd, text);
        hwnd
    }
}

#[allow(clippy::too_many_arguments)]
fn create_button(
    parent: HWND,
    font: HFONT,
    text: PCWSTR,
    id: i32,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
) -> HWND {
    unsafe {
        let hwnd = CreateWindowExW(
            WINDOW_EX_STYLE(0),
            w!("BUTTON"),
            text,
            WINDOW_STYLE(WS_CHILD.0 | WS_VISIBLE.0 | WS_TABSTOP.0),
            x,
            y,
            width,
            height,
            parent,
            HMENU(id as isize),
            None,
            None,
        );
        apply_font(hwnd, font);
        hwnd
    }
}

fn set_control_text(hwnd: HWND, text: &str) {
    let wide = to_wstring(text);
    unsafe {
        let _ = SetWindowTextW(hwnd, PCWSTR(wide.as_ptr()));
    }
}
