//! Keyboard input understood by the crop tool.

use std::fmt;

/// Keys the crop tool reacts to. Everything else is passed through as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Other(String),
}

impl Key {
    /// Maps a DOM `KeyboardEvent.key` value.
    pub fn from_dom(name: &str) -> Self {
        match name {
            "ArrowUp" => Self::ArrowUp,
            "ArrowDown" => Self::ArrowDown,
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn is_arrow(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// Unit direction of an arrow key, `(0, 0)` for anything else.
    pub fn direction(&self) -> (f64, f64) {
        match self {
            Self::ArrowUp => (0.0, -1.0),
            Self::ArrowDown => (0.0, 1.0),
            Self::ArrowLeft => (-1.0, 0.0),
            Self::ArrowRight => (1.0, 0.0),
            Self::Other(_) => (0.0, 0.0),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArrowUp => write!(f, "ArrowUp"),
            Self::ArrowDown => write!(f, "ArrowDown"),
            Self::ArrowLeft => write!(f, "ArrowLeft"),
            Self::ArrowRight => write!(f, "ArrowRight"),
            Self::Other(name) => write!(f, "{}", name),
        }
    }
}

/// A key press with the modifier state the crop tool cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub shift: bool,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self { key, shift: false }
    }

    pub fn with_shift(key: Key) -> Self {
        Self { key, shift: true }
    }
}
