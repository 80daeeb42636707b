//! Crate-level error types.

use std::fmt;

/// Errors produced by the fireworks crate.
#[derive(Debug)]
pub enum FireworksError {
    /// The render surface is missing or unusable. Fatal at mount time.
    Surface(String),
    /// No usable GPU surface, adapter or device for the viewer window.
    Gpu(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Options parsed but hold values the engine cannot run with.
    InvalidOptions(String),
    /// The countdown target instant could not be resolved.
    Clock(String),
    /// Viewer event-loop failure.
    Viewer(String),
    /// Browser API failure.
    Web(String),
}

impl fmt::Display for FireworksError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Surface(msg) => write!(f, "render surface error: {msg}"),
            Self::Gpu(msg) => write!(f, "GPU error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::InvalidOptions(msg) => {
                write!(f, "invalid options: {msg}")
            }
            Self::Clock(msg) => write!(f, "clock error: {msg}"),
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
            Self::Web(msg) => write!(f, "web error: {msg}"),
        }
    }
}

impl std::error::Error for FireworksError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FireworksError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
