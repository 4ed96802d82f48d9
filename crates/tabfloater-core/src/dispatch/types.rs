use crate::config::HostConfig;

/// Behavior switches for the loop, taken from [`HostConfig`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOptions {
    /// Answer unknown actions with `{success: false, error}` instead of
    /// writing nothing.
    pub respond_to_unknown_actions: bool,
}

impl From<&HostConfig> for DispatchOptions {
    fn from(config: &HostConfig) -> Self {
        Self {
            respond_to_unknown_actions: config.respond_to_unknown_actions,
        }
    }
}

/// Counters for one host session, returned on clean shutdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Complete frames read, malformed ones included.
    pub frames_read: usize,
    pub responses_written: usize,
    /// Requests that were answered with `{success: false, error}`.
    pub errors_reported: usize,
    /// Requests dropped without a response.
    pub requests_ignored: usize,
}
