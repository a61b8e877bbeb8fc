//! Error handling for Ithaka
//!
//! The crop and snapshot engines never fail on bad input; they correct it.
//! Errors only surface at the edges where data enters or leaves the process:
//! - Geometry errors (parsing aspect-ratio presets from UI labels or config)
//! - Snapshot errors (decoding or encoding persisted history snapshots)
//! - Config errors (editor configuration files)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Geometry error type
///
/// Raised when a geometric value arrives as text and cannot be interpreted.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// The aspect-ratio preset name is not recognised
    #[error("Unknown aspect ratio preset: {name}")]
    UnknownAspectPreset {
        /// The name that failed to parse.
        name: String,
    },

    /// A custom ratio could not be parsed as a number
    #[error("Invalid aspect ratio value: {value}")]
    InvalidRatio {
        /// The raw ratio text.
        value: String,
    },
}

/// Snapshot error type
///
/// Represents failures moving element snapshots across a serialization
/// boundary. In-memory snapshot operations do not produce these.
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// Snapshot JSON is missing a field or has the wrong shape
    #[error("Malformed snapshot: {reason}")]
    Malformed {
        /// What was wrong with the payload.
        reason: String,
    },

    /// Declared element count disagrees with the element list
    #[error("Snapshot count mismatch: declared {count}, found {actual} elements")]
    CountMismatch {
        /// The declared `count` field.
        count: usize,
        /// The actual number of elements.
        actual: usize,
    },

    /// JSON encoding or decoding failed
    #[error("Snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration error type
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    /// The configuration file extension is not supported
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// The configuration file could not be parsed
    #[error("Invalid {format} config: {reason}")]
    Parse {
        /// The file format (json or toml).
        format: String,
        /// The parser message.
        reason: String,
    },

    /// The configuration could not be serialized
    #[error("Failed to serialize config: {reason}")]
    Serialize {
        /// The serializer message.
        reason: String,
    },

    /// A configuration value is out of range
    #[error("Invalid setting '{key}': {reason}")]
    InvalidSetting {
        /// The dotted key of the offending setting.
        key: String,
        /// Why the value was rejected.
        reason: String,
    },
}

impl ConfigError {
    /// Shorthand for an [`ConfigError::InvalidSetting`].
    pub fn invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidSetting {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Main error type for Ithaka
///
/// Aggregates the per-concern error types.
#[derive(Error, Debug)]
pub enum Error {
    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Snapshot error
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a configuration error
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::Config(_))
    }

    /// Check if this is a snapshot error
    pub fn is_snapshot_error(&self) -> bool {
        matches!(self, Error::Snapshot(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
