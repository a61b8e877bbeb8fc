//! # Ithaka
//!
//! Editing engines behind the Ithaka journal editor.
//!
//! ## Architecture
//!
//! Ithaka is organized as a workspace with multiple crates:
//!
//! 1. **ithaka-core** - Error types and shared geometry primitives
//! 2. **ithaka-cropper** - Crop geometry engine: handles, aspect-ratio locks,
//!    boundary clamping, grid snapping, pointer and keyboard input
//! 3. **ithaka-history** - Element snapshots, history actions, and a bounded
//!    undo/redo stack
//! 4. **ithaka-settings** - Editor configuration with JSON/TOML persistence
//! 5. **ithaka** - This facade, re-exporting the crates above
//!
//! The two engines are independent. Confirming a crop writes the final
//! region into an image element; that element edit is what the history
//! engine records.

pub use ithaka_cropper as cropper;
pub use ithaka_history as history;
pub use ithaka_settings as settings;

pub use ithaka_core::{ConfigError, Error, GeometryError, Point, Result, Size, SnapshotError};

pub use ithaka_cropper::{
    AspectRatioPreset, ContainerRect, CropRegion, CropSettings, CropTool, CropUpdate, DragState,
    HandleId, Key, KeyEvent,
};

pub use ithaka_history::{
    are_snapshots_equal, get_action_from_snapshot, get_snapshot_size, is_valid_snapshot,
    ElementSnapshot, ElementStore, HistoryAction, HistorySettings, PageStore, RestoreOutcome,
    SnapshotEngine, UndoRedoManager,
};

pub use ithaka_settings::EditorConfig;

/// Version of Ithaka
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support, INFO by default
///
/// Fails if a global subscriber is already installed.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Initialize logging as one JSON object per line, for hosts that collect
/// structured logs
pub fn init_json_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_line_number(true)
        .json();

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

fn env_filter() -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into())
}
