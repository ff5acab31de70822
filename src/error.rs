//! Error types for the globe controller.

use std::path::PathBuf;

/// Rejected input to the state store.
///
/// The store is never modified when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The color is neither 6/8 hex digits nor a decimal channel list.
    #[error("invalid color {0:?} (expected 6 or 8 hex digits, or r,g,b[,w])")]
    InvalidColor(String),

    /// A decimal color channel is outside 0-255.
    #[error("color channel {channel} out of range: {value} (expected 0-255)")]
    ChannelOutOfRange {
        /// Channel name (`r`, `g`, `b` or `w`).
        channel: char,
        /// The value provided.
        value: i64,
    },

    /// The mode is not one of the four display modes.
    #[error("unknown mode {0:?} (expected 0-3 or clock, solid, lava, fireworks)")]
    UnknownMode(String),

    /// The offset is not a signed integer number of seconds.
    #[error("invalid offset {0:?} (expected signed integer seconds)")]
    InvalidOffset(String),

    /// The request carried a field the control surface does not know.
    #[error("unknown field {0:?} (expected offset, color or mode)")]
    UnknownField(String),

    /// The request carried zero or several fields.
    #[error("expected exactly one field, got {0}")]
    FieldCount(usize),
}

/// Failure pushing a frame to the LED hardware.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DriverError {
    /// The driver reported an I/O failure.
    #[error("LED driver I/O error: {0}")]
    Io(String),

    /// The output worker thread is gone.
    #[error("output worker disconnected")]
    Disconnected,
}

/// Configuration loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("invalid config value for {field}: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

/// Fatal errors while bringing the daemon up.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to bind HTTP listener on {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("failed to initialize LED driver: {0}")]
    Driver(#[from] DriverError),

    #[error("failed to spawn output worker: {0}")]
    Worker(std::io::Error),
}
