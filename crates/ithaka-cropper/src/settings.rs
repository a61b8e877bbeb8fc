//! Tunables for the crop tool.

use crate::aspect::AspectRatioPreset;
use serde::{Deserialize, Serialize};

/// Smallest crop width/height in image pixels.
pub const MIN_SIZE: f64 = 50.0;
/// Grid that committed coordinates snap to.
pub const DEFAULT_SNAP_GRID_SIZE: f64 = 10.0;
/// Hit radius around each handle, in screen pixels.
pub const DEFAULT_HANDLE_TOLERANCE: f64 = 16.0;
/// Arrow key step in image pixels.
pub const DEFAULT_KEYBOARD_STEP: f64 = 5.0;
/// Share of each image dimension the initial region covers.
pub const DEFAULT_INITIAL_FRACTION: f64 = 0.5;

/// Crop tool settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropSettings {
    /// Size floor for both dimensions
    pub min_size: f64,
    /// Snap grid size
    pub snap_grid_size: f64,
    /// Handle hit tolerance (screen px)
    pub handle_tolerance: f64,
    /// Arrow key step
    pub keyboard_step: f64,
    /// Initial region size as a fraction of the image
    pub initial_fraction: f64,
    /// Preset selected when a session starts
    pub default_preset: AspectRatioPreset,
}

impl Default for CropSettings {
    fn default() -> Self {
        Self {
            min_size: MIN_SIZE,
            snap_grid_size: DEFAULT_SNAP_GRID_SIZE,
            handle_tolerance: DEFAULT_HANDLE_TOLERANCE,
            keyboard_step: DEFAULT_KEYBOARD_STEP,
            initial_fraction: DEFAULT_INITIAL_FRACTION,
            default_preset: AspectRatioPreset::Free,
        }
    }
}
