//! Error types for the editor.
//!
//! Mirrors the hand-rolled `Error` enum used throughout the kilo lineage
//! (no `thiserror`/`anyhow` is pulled in; see DESIGN.md).

use std::fmt;

/// Errors that can abort initialization or a steady-state I/O operation.
///
/// Per spec §7, only initialization failures are fatal; save/load I/O
/// failures during steady-state editing are reported as status messages and
/// do not propagate as this type past the call site that triggers them.
#[derive(Debug)]
pub enum Error {
    /// Wrapper around `std::io::Error` (raw mode setup, stdin/stdout I/O).
    Io(std::io::Error),
    /// The terminal reported a window size of zero rows or columns, or the
    /// cursor-position fallback could not be parsed.
    InvalidWindowSize,
    /// `nix` reported an errno setting or restoring termios attributes.
    Termios(nix::errno::Errno),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidWindowSize => write!(f, "could not determine terminal window size"),
            Self::Termios(e) => write!(f, "termios error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::InvalidWindowSize => None,
            Self::Termios(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<nix::errno::Errno> for Error {
    fn from(err: nix::errno::Errno) -> Self {
        Self::Termios(err)
    }
}
