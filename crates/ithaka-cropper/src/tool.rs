//! Interactive crop tool session.
//!
//! A [`CropTool`] owns one crop region over one image. Pointer and keyboard
//! handlers translate input into candidate regions and commit them through
//! the [`Constraints`] pipeline, so the committed region is valid after every
//! call. No call fails: out-of-range input is clamped and missed hit tests
//! leave the state untouched.

use std::collections::HashSet;

use ithaka_core::{Point, Size};
use tracing::{debug, trace};

use crate::aspect::{clamp_custom_ratio, AspectRatioPreset};
use crate::constraints::{Constraints, SnapDirection};
use crate::handle::HandleId;
use crate::input::{Key, KeyEvent};
use crate::region::{ContainerRect, CropRegion, CropUpdate};
use crate::settings::{CropSettings, DEFAULT_INITIAL_FRACTION};

/// Pointer gesture state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        /// Handle grabbed at mouse-down
        handle: HandleId,
        /// Cursor position at mouse-down, client pixels
        start: Point,
        /// Region at mouse-down; every move is applied relative to it
        start_crop: CropRegion,
    },
}

/// Crop geometry engine for one image.
#[derive(Debug, Clone)]
pub struct CropTool {
    image: Size,
    settings: CropSettings,
    constraints: Constraints,
    initial: CropRegion,
    crop: CropRegion,
    preset: AspectRatioPreset,
    custom_ratio: f64,
    drag: DragState,
    pressed_keys: HashSet<Key>,
}

impl CropTool {
    /// Starts a session over a `width` x `height` image with default settings.
    ///
    /// The initial region covers half of each dimension, centered.
    pub fn new(image_width: f64, image_height: f64) -> Self {
        Self::with_settings(image_width, image_height, CropSettings::default())
    }

    /// Starts a session with explicit settings.
    pub fn with_settings(image_width: f64, image_height: f64, settings: CropSettings) -> Self {
        let image = Size::new(image_width, image_height);
        let constraints = Constraints::new(image, settings.min_size, settings.snap_grid_size);
        let fraction = if settings.initial_fraction > 0.0 && settings.initial_fraction <= 1.0 {
            settings.initial_fraction
        } else {
            DEFAULT_INITIAL_FRACTION
        };
        let initial = constraints.constrain(&CropRegion::centered(image, fraction));

        let mut tool = Self {
            image,
            settings,
            constraints,
            initial,
            crop: initial,
            preset: AspectRatioPreset::Free,
            custom_ratio: 1.0,
            drag: DragState::Idle,
            pressed_keys: HashSet::new(),
        };
        if !settings.default_preset.is_free() {
            tool.set_aspect_ratio(settings.default_preset);
        }

        debug!(image = %image, crop = ?tool.crop, "crop session started");
        tool
    }

    /// Current crop region.
    pub fn crop_data(&self) -> CropRegion {
        self.crop
    }

    /// Writes the given fields and clamps the result.
    ///
    /// Only the boundary clamp runs here; the aspect ratio is not
    /// re-enforced and nothing is snapped.
    pub fn update_crop_data(&mut self, update: CropUpdate) -> CropRegion {
        let merged = self.crop.merged(&update);
        self.crop = self.constraints.constrain(&merged);
        trace!(requested = ?merged, committed = ?self.crop, "crop updated directly");
        self.crop
    }

    /// Restores the region from session start and clears the ratio lock.
    pub fn reset_crop(&mut self) {
        self.crop = self.initial;
        self.preset = AspectRatioPreset::Free;
        self.drag = DragState::Idle;
        debug!(crop = ?self.crop, "crop reset");
    }

    pub fn image_size(&self) -> Size {
        self.image
    }

    pub fn settings(&self) -> &CropSettings {
        &self.settings
    }

    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    pub fn snap_grid_size(&self) -> f64 {
        self.constraints.grid_size()
    }

    pub fn snap_to_grid(&self, value: f64) -> f64 {
        self.constraints.snap_to_grid(value)
    }

    pub fn constrain_crop(&self, region: &CropRegion) -> CropRegion {
        self.constraints.constrain(region)
    }

    /// Reshapes `region` to the active ratio; identity when no ratio is active.
    pub fn enforce_aspect_ratio(&self, region: &CropRegion, handle: Option<HandleId>) -> CropRegion {
        self.constraints
            .enforce_aspect_ratio(region, self.current_ratio(), handle)
    }

    // --- aspect ratio -----------------------------------------------------

    pub fn aspect_ratio_preset(&self) -> AspectRatioPreset {
        self.preset
    }

    /// Active width/height ratio, `None` when free.
    pub fn current_ratio(&self) -> Option<f64> {
        self.preset.ratio()
    }

    pub fn custom_aspect_ratio(&self) -> f64 {
        self.custom_ratio
    }

    /// Selects a preset and reshapes the current region to it.
    pub fn set_aspect_ratio(&mut self, preset: AspectRatioPreset) {
        let preset = match preset {
            AspectRatioPreset::Custom(ratio) => {
                self.custom_ratio = clamp_custom_ratio(ratio);
                AspectRatioPreset::Custom(self.custom_ratio)
            }
            other => other,
        };
        self.preset = preset;

        if preset.ratio().is_some() {
            self.crop = self.constraints.apply(&self.crop, preset.ratio(), None);
        }
        debug!(preset = %preset, crop = ?self.crop, "aspect ratio set");
    }

    /// Stores a custom ratio, clamped to `[0.1, 10]`. Reshapes the region
    /// only when the custom preset is the active one.
    pub fn set_custom_aspect_ratio(&mut self, ratio: f64) {
        self.custom_ratio = clamp_custom_ratio(ratio);
        if self.preset.is_custom() {
            self.set_aspect_ratio(AspectRatioPreset::Custom(self.custom_ratio));
        }
    }

    // --- pointer ----------------------------------------------------------

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    pub fn active_handle(&self) -> Option<HandleId> {
        match self.drag {
            DragState::Dragging { handle, .. } => Some(handle),
            DragState::Idle => None,
        }
    }

    /// Hit test: corners first, then edge midpoints, then the interior.
    ///
    /// Handle zones extend `handle_tolerance` screen pixels around each
    /// handle, converted into image pixels through the container scale.
    pub fn handle_at(&self, client: Point, container: &ContainerRect) -> Option<HandleId> {
        if !container.is_measurable() {
            return None;
        }

        let point = container.to_image_space(client, self.image);
        let (sx, sy) = container.image_scale(self.image);
        let tolerance_x = self.settings.handle_tolerance * sx;
        let tolerance_y = self.settings.handle_tolerance * sy;

        HandleId::CORNERS
            .iter()
            .chain(HandleId::EDGES.iter())
            .copied()
            .find(|handle| point.near(handle.anchor_on(&self.crop), tolerance_x, tolerance_y))
            .or_else(|| self.crop.contains(point).then_some(HandleId::Center))
    }

    /// Cursor to show while hovering `client`.
    pub fn cursor_at(&self, client: Point, container: &ContainerRect) -> &'static str {
        if let Some(handle) = self.active_handle() {
            return handle.cursor();
        }
        self.handle_at(client, container)
            .map(|handle| handle.cursor())
            .unwrap_or("default")
    }

    /// Starts a gesture when `client` hits a handle or the interior.
    ///
    /// Returns whether a gesture started. A press during an active gesture
    /// is ignored; the running gesture keeps its handle and start region.
    pub fn handle_mouse_down(&mut self, client: Point, container: &ContainerRect) -> bool {
        if let DragState::Dragging { handle, .. } = self.drag {
            debug!(active = %handle, "mouse down ignored during active drag");
            return false;
        }

        let Some(handle) = self.handle_at(client, container) else {
            return false;
        };

        self.drag = DragState::Dragging {
            handle,
            start: client,
            start_crop: self.crop,
        };
        debug!(handle = %handle, at = %client, "crop drag started");
        true
    }

    /// Applies the pointer offset since mouse-down to the start region.
    ///
    /// Returns whether the region was recomputed.
    pub fn handle_mouse_move(&mut self, client: Point, container: &ContainerRect) -> bool {
        let DragState::Dragging {
            handle,
            start,
            start_crop,
        } = self.drag
        else {
            return false;
        };
        if !container.is_measurable() {
            return false;
        }

        let (sx, sy) = container.image_scale(self.image);
        let (dx, dy) = client.delta_from(start);
        let candidate = handle.apply_delta(
            &start_crop,
            dx * sx,
            dy * sy,
            self.constraints.min_width(),
            self.constraints.min_height(),
        );

        self.crop = match handle {
            HandleId::Center => self.constraints.apply_move(&candidate),
            _ => self
                .constraints
                .apply(&candidate, self.current_ratio(), Some(handle)),
        };
        trace!(handle = %handle, candidate = ?candidate, committed = ?self.crop, "crop drag");
        true
    }

    /// Ends the gesture, keeping the committed region.
    pub fn handle_mouse_up(&mut self) {
        if let DragState::Dragging { handle, .. } = self.drag {
            debug!(handle = %handle, crop = ?self.crop, "crop drag finished");
        }
        self.drag = DragState::Idle;
    }

    /// Ends the gesture and puts back the region from mouse-down.
    pub fn handle_mouse_cancel(&mut self) {
        if let DragState::Dragging { start_crop, .. } = self.drag {
            self.crop = start_crop;
            debug!(crop = ?self.crop, "crop drag cancelled");
        }
        self.drag = DragState::Idle;
    }

    // --- keyboard ---------------------------------------------------------

    /// Arrow keys resize by `keyboard_step`; with Shift they move instead.
    ///
    /// A key that is already down is ignored until its key-up, which stops
    /// auto-repeat from running away. Different keys are tracked separately.
    /// Returns whether the region changed.
    pub fn handle_key_down(&mut self, event: &KeyEvent) -> bool {
        if !event.key.is_arrow() {
            return false;
        }
        if !self.pressed_keys.insert(event.key.clone()) {
            trace!(key = %event.key, "key repeat suppressed");
            return false;
        }

        let step = self.settings.keyboard_step;
        let previous = self.crop;
        self.crop = if event.shift {
            self.nudge_position(&event.key, step)
        } else {
            self.nudge_size(&event.key, step)
        };
        trace!(key = %event.key, shift = event.shift, committed = ?self.crop, "crop nudged");
        self.crop != previous
    }

    pub fn handle_key_up(&mut self, key: &Key) {
        self.pressed_keys.remove(key);
    }

    /// Forgets every pressed key. Call when focus leaves the tool, since
    /// the matching key-up events will never arrive.
    pub fn handle_blur(&mut self) {
        self.pressed_keys.clear();
    }

    pub fn is_key_pressed(&self, key: &Key) -> bool {
        self.pressed_keys.contains(key)
    }

    fn nudge_position(&self, key: &Key, step: f64) -> CropRegion {
        let (ux, uy) = key.direction();
        let mut candidate = self.crop;
        if let Some(direction) = snap_direction(ux) {
            candidate.x = self
                .constraints
                .snap_toward(self.crop.x + ux * step, direction);
        }
        if let Some(direction) = snap_direction(uy) {
            candidate.y = self
                .constraints
                .snap_toward(self.crop.y + uy * step, direction);
        }
        self.constraints.constrain_position(&candidate)
    }

    fn nudge_size(&self, key: &Key, step: f64) -> CropRegion {
        let (ux, uy) = key.direction();
        let mut candidate = self.crop;
        let handle = if ux != 0.0 {
            if let Some(direction) = snap_direction(ux) {
                candidate.width = self
                    .constraints
                    .snap_toward(self.crop.width + ux * step, direction);
            }
            HandleId::Right
        } else {
            if let Some(direction) = snap_direction(uy) {
                candidate.height = self
                    .constraints
                    .snap_toward(self.crop.height + uy * step, direction);
            }
            HandleId::Bottom
        };
        self.constraints
            .apply(&candidate, self.current_ratio(), Some(handle))
    }
}

fn snap_direction(unit: f64) -> Option<SnapDirection> {
    if unit > 0.0 {
        Some(SnapDirection::Up)
    } else if unit < 0.0 {
        Some(SnapDirection::Down)
    } else {
        None
    }
}
