//! Win32 window backend.
//!
//! Enumerates with `EnumWindows` (top-level windows in Z order) and pins with
//! two calls: the `WS_EX_TOPMOST` extended style bit keeps the window in the
//! topmost band, and `SetWindowPos(HWND_TOPMOST)` restages it there now.

use std::ffi::c_void;

use tracing::debug;
use windows::Win32::Foundation::{
    ERROR_SUCCESS, GetLastError, HWND, LPARAM, SetLastError, WIN32_ERROR,
};
use windows::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GWL_EXSTYLE, GetWindowLongW, GetWindowTextLengthW, GetWindowTextW,
    HWND_TOPMOST, IsWindowVisible, SWP_NOMOVE, SWP_NOSIZE, SetWindowLongW, SetWindowPos,
    WS_EX_TOPMOST,
};
use windows::core::BOOL;

use crate::window::errors::WindowError;
use crate::window::traits::WindowBackend;
use crate::window::types::{WindowHandle, WindowInfo};

pub struct Win32WindowBackend;

unsafe extern "system" fn collect_window(hwnd: HWND, lparam: LPARAM) -> BOOL {
    // SAFETY: lparam carries the `&mut Vec<isize>` passed by
    // `enumerate_visible_windows`, which outlives the EnumWindows call.
    let handles = unsafe { &mut *(lparam.0 as *mut Vec<isize>) };
    handles.push(hwnd.0 as isize);
    BOOL::from(true)
}

fn hwnd(handle: WindowHandle) -> HWND {
    HWND(handle.0 as *mut c_void)
}

fn window_title(hwnd: HWND) -> String {
    // SAFETY: plain Win32 queries on a handle from EnumWindows. A handle that
    // was destroyed since enumeration yields an empty title.
    unsafe {
        let length = GetWindowTextLengthW(hwnd);
        if length <= 0 {
            return String::new();
        }
        let mut buf = vec![0u16; length as usize + 1];
        let copied = GetWindowTextW(hwnd, &mut buf);
        String::from_utf16_lossy(&buf[..copied.max(0) as usize])
    }
}

impl WindowBackend for Win32WindowBackend {
    fn name(&self) -> &'static str {
        "win32"
    }

    fn enumerate_visible_windows(&self) -> Result<Vec<WindowInfo>, WindowError> {
        let mut handles: Vec<isize> = Vec::new();

        // SAFETY: the callback only pushes into `handles`, which lives until
        // EnumWindows returns.
        unsafe {
            EnumWindows(
                Some(collect_window),
                LPARAM(&mut handles as *mut Vec<isize> as isize),
            )
        }
        .map_err(|e| WindowError::EnumerationFailed {
            message: e.to_string(),
        })?;

        let total = handles.len();
        let windows: Vec<WindowInfo> = handles
            .into_iter()
            .map(|raw| HWND(raw as *mut c_void))
            // SAFETY: read-only query on an enumerated handle.
            .filter(|&h| unsafe { IsWindowVisible(h) }.as_bool())
            .map(|h| WindowInfo::new(WindowHandle(h.0 as isize), window_title(h)))
            .collect();

        debug!(
            event = "core.window.win32_enumerate_completed",
            total = total,
            visible = windows.len()
        );
        Ok(windows)
    }

    fn set_always_on_top(&self, handle: WindowHandle) -> Result<(), WindowError> {
        let target = hwnd(handle);

        // SAFETY: GetWindowLongW/SetWindowLongW report failure only through
        // the thread's last-error value, which is cleared before each call.
        let style = unsafe {
            SetLastError(WIN32_ERROR(0));
            let current = GetWindowLongW(target, GWL_EXSTYLE);
            if current == 0 && GetLastError() != ERROR_SUCCESS {
                return Err(WindowError::StyleUpdateFailed {
                    handle,
                    message: format!("GetWindowLongW failed: {:?}", GetLastError()),
                });
            }

            let updated = current | WS_EX_TOPMOST.0 as i32;
            SetLastError(WIN32_ERROR(0));
            let previous = SetWindowLongW(target, GWL_EXSTYLE, updated);
            if previous == 0 && GetLastError() != ERROR_SUCCESS {
                return Err(WindowError::StyleUpdateFailed {
                    handle,
                    message: format!("SetWindowLongW failed: {:?}", GetLastError()),
                });
            }
            updated
        };

        debug!(
            event = "core.window.win32_style_applied",
            handle = %handle,
            ex_style = style
        );

        // SAFETY: repositions in Z order only; NOMOVE and NOSIZE keep the
        // window rectangle.
        unsafe {
            SetWindowPos(
                target,
                Some(HWND_TOPMOST),
                0,
                0,
                0,
                0,
                SWP_NOMOVE | SWP_NOSIZE,
            )
        }
        .map_err(|e| WindowError::ZOrderUpdateFailed {
            handle,
            message: e.to_string(),
        })?;

        Ok(())
    }
}
