//! Named constants for the editor, gathered in one place instead of
//! scattered as magic numbers through the other modules.
//!
//! Per spec Non-goals, no external configuration file is read; `Config` is
//! an in-memory struct with a fixed `Default`.

use std::time::Duration;

/// Displayed in the welcome banner.
pub const KILO_VERSION: &str = "0.0.1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Fixed tab stop width used by [`crate::row::Row::update_render`].
    pub tab_stop: usize,
    /// Number of consecutive `Ctrl-Q` presses required to quit with unsaved
    /// changes.
    pub quit_times: usize,
    /// Initial capacity (in bytes) of a prompt's input buffer, doubled on
    /// growth.
    pub prompt_initial_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self { tab_stop: 8, quit_times: 3, prompt_initial_capacity: 128 }
    }
}

impl Config {
    /// How long a status message remains visible.
    pub const fn message_ttl() -> Duration {
        Duration::from_secs(5)
    }

    /// Polling granularity for the raw-mode terminal read.
    pub const fn read_timeout() -> Duration {
        Duration::from_millis(100)
    }
}
