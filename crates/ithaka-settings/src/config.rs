//! Editor configuration for Ithaka
//!
//! Provides configuration file handling, defaults, and validation.
//! Supports JSON and TOML file formats; the default location is
//! `<platform config dir>/ithaka/editor.toml`.
//!
//! Configuration is organized into sections:
//! - Crop tool settings (size floor, snap grid, handle tolerance, presets)
//! - History settings (undo depth and memory cap)

use std::path::{Path, PathBuf};

use ithaka_core::{ConfigError, Result};
use ithaka_cropper::{CropSettings, CropTool};
use ithaka_history::{HistorySettings, UndoRedoManager};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Directory under the platform config dir holding Ithaka's files
pub const CONFIG_DIR_NAME: &str = "ithaka";

/// File name of the default configuration
pub const CONFIG_FILE_NAME: &str = "editor.toml";

/// On-disk encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> Result<Self> {
        if path.extension().is_some_and(|ext| ext == "json") {
            Ok(Self::Json)
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            Ok(Self::Toml)
        } else {
            Err(ConfigError::UnsupportedFormat(format!(
                "{} (config file must be .json or .toml)",
                path.display()
            ))
            .into())
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Toml => "TOML",
        }
    }
}

/// Complete editor configuration
///
/// Missing sections and fields fall back to their defaults when loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EditorConfig {
    /// Crop tool settings
    pub crop: CropSettings,
    /// Undo/redo limits
    pub history: HistorySettings,
}

impl EditorConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// `<config_dir>/ithaka/editor.toml`, or `None` when the platform has
    /// no config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
                format: format.name().to_string(),
                reason: e.to_string(),
            })?,
            Format::Toml => toml::from_str(&content).map_err(|e| ConfigError::Parse {
                format: format.name().to_string(),
                reason: e.to_string(),
            })?,
        };

        config.validate()?;
        debug!(path = %path.display(), "editor config loaded");
        Ok(config)
    }

    /// Load config from file, or the defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            debug!(path = %path.display(), "no editor config, using defaults");
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML), creating the parent directory
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;
        let format = Format::from_path(path)?;

        let content = match format {
            Format::Json => serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialize {
                reason: e.to_string(),
            })?,
            Format::Toml => toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize {
                reason: e.to_string(),
            })?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;

        debug!(path = %path.display(), "editor config saved");
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let crop = &self.crop;

        // Crop settings
        if !(crop.min_size.is_finite() && crop.min_size > 0.0) {
            return Err(ConfigError::invalid("crop.min_size", "must be > 0").into());
        }
        if !(crop.snap_grid_size.is_finite() && crop.snap_grid_size > 0.0) {
            return Err(ConfigError::invalid("crop.snap_grid_size", "must be > 0").into());
        }
        if !(crop.handle_tolerance.is_finite() && crop.handle_tolerance >= 0.0) {
            return Err(ConfigError::invalid("crop.handle_tolerance", "must be >= 0").into());
        }
        if !(crop.keyboard_step.is_finite() && crop.keyboard_step > 0.0) {
            return Err(ConfigError::invalid("crop.keyboard_step", "must be > 0").into());
        }
        if !(crop.initial_fraction > 0.0 && crop.initial_fraction <= 1.0) {
            return Err(
                ConfigError::invalid("crop.initial_fraction", "must be in (0, 1]").into(),
            );
        }

        // History settings
        if self.history.max_depth == 0 {
            return Err(ConfigError::invalid("history.max_depth", "must be > 0").into());
        }
        if self.history.max_total_bytes == 0 {
            return Err(ConfigError::invalid("history.max_total_bytes", "must be > 0").into());
        }

        Ok(())
    }

    /// Starts a crop session over a `width` x `height` image with these settings
    pub fn crop_tool(&self, image_width: f64, image_height: f64) -> CropTool {
        CropTool::with_settings(image_width, image_height, self.crop)
    }

    /// Creates an empty undo/redo stack with these limits
    pub fn undo_manager(&self) -> UndoRedoManager {
        UndoRedoManager::with_settings(self.history)
    }
}
