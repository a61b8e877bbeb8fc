//! Ithaka Settings Crate
//!
//! Editor configuration: defaults for the crop tool and the undo/redo
//! stack, validation, and JSON/TOML persistence.

pub mod config;

pub use config::{EditorConfig, CONFIG_DIR_NAME, CONFIG_FILE_NAME};
pub use ithaka_cropper::CropSettings;
pub use ithaka_history::HistorySettings;
