use tracing::{error, info, warn};

use super::errors::WindowError;
use super::traits::WindowBackend;
use super::types::WindowInfo;
use crate::errors::TabfloaterError;

/// Case-insensitive substring match of `needle` in a window title.
///
/// An empty needle matches every title.
pub fn title_matches(window_title: &str, needle: &str) -> bool {
    window_title.to_lowercase().contains(&needle.to_lowercase())
}

/// Find the first visible window whose title contains `title`.
///
/// Matching is a case-insensitive substring test. When several windows match,
/// the first one in the backend's enumeration order wins, so the result can
/// change between calls as windows are raised, opened or closed.
pub fn find_first_window_by_title(
    backend: &dyn WindowBackend,
    title: &str,
) -> Result<WindowInfo, WindowError> {
    info!(
        event = "core.window.find_started",
        title = title,
        backend = backend.name()
    );

    let windows = backend.enumerate_visible_windows()?;
    let candidates = windows.len();

    let window = windows
        .into_iter()
        .find(|w| title_matches(&w.title, title))
        .ok_or_else(|| WindowError::WindowNotFound {
            title: title.to_string(),
        })?;

    info!(
        event = "core.window.find_completed",
        title = title,
        found_handle = %window.handle,
        found_title = window.title,
        candidates = candidates
    );
    Ok(window)
}

/// Pin the first window matching `title` above all other windows.
///
/// Returns false when no window matches or any OS call fails. Errors are
/// logged here and never returned.
pub fn make_window_floating(backend: &dyn WindowBackend, title: &str) -> bool {
    info!(event = "core.window.float_started", title = title);

    let result = find_first_window_by_title(backend, title)
        .and_then(|window| backend.set_always_on_top(window.handle).map(|()| window));

    match result {
        Ok(window) => {
            info!(
                event = "core.window.float_completed",
                title = title,
                handle = %window.handle,
                window_title = window.title
            );
            true
        }
        Err(e) if e.is_user_error() => {
            warn!(
                event = "core.window.float_failed",
                title = title,
                error = %e,
                error_code = e.error_code()
            );
            false
        }
        Err(e) => {
            error!(
                event = "core.window.float_failed",
                title = title,
                error = %e,
                error_code = e.error_code()
            );
            false
        }
    }
}
