//! Constraint pipeline for crop regions.
//!
//! Every geometry change runs through the same fixed sequence:
//!
//! ```text
//! candidate ──► enforce_aspect_ratio ──► constrain ──► snap ──► constrain ──► committed
//! ```
//!
//! The trailing `constrain` pulls a value that snapping pushed past an image
//! edge back onto that edge. Such a value is then not a multiple of the grid,
//! which is the one exception the snap invariant allows.

use crate::handle::HandleId;
use crate::region::CropRegion;
use ithaka_core::Size;

/// Rounding direction for keyboard nudges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapDirection {
    /// Round to the nearest grid line
    Nearest,
    /// Round up (growing, moving right or down)
    Up,
    /// Round down (shrinking, moving left or up)
    Down,
}

/// Image bounds, size floor, and grid the crop region must respect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraints {
    image: Size,
    min_size: f64,
    grid_size: f64,
}

impl Constraints {
    /// Creates a constraint set. A floor or grid below 1px is raised to 1px,
    /// so snapping never divides by zero.
    pub fn new(image: Size, min_size: f64, grid_size: f64) -> Self {
        Self {
            image,
            min_size: if min_size.is_finite() { min_size.max(1.0) } else { 1.0 },
            grid_size: if grid_size.is_finite() { grid_size.max(1.0) } else { 1.0 },
        }
    }

    pub fn image(&self) -> Size {
        self.image
    }

    pub fn min_size(&self) -> f64 {
        self.min_size
    }

    pub fn grid_size(&self) -> f64 {
        self.grid_size
    }

    /// Smallest allowed width. Images narrower than the floor cap it at their width.
    pub fn min_width(&self) -> f64 {
        self.min_size.min(self.image.width)
    }

    /// Smallest allowed height. Images shorter than the floor cap it at their height.
    pub fn min_height(&self) -> f64 {
        self.min_size.min(self.image.height)
    }

    /// `round(value / grid) * grid`
    pub fn snap_to_grid(&self, value: f64) -> f64 {
        self.snap_toward(value, SnapDirection::Nearest)
    }

    /// Snaps `value` to the grid, rounding in `direction`.
    pub fn snap_toward(&self, value: f64, direction: SnapDirection) -> f64 {
        let cells = value / self.grid_size;
        let cells = match direction {
            SnapDirection::Nearest => cells.round(),
            SnapDirection::Up => cells.ceil(),
            SnapDirection::Down => cells.floor(),
        };
        cells * self.grid_size
    }

    /// Clamps position into the image and size between the floor and the
    /// space left after the position.
    pub fn constrain(&self, region: &CropRegion) -> CropRegion {
        let min_width = self.min_width();
        let min_height = self.min_height();

        let x = clamp(region.x, 0.0, self.image.width - min_width);
        let y = clamp(region.y, 0.0, self.image.height - min_height);
        let width = clamp(region.width, min_width, self.image.width - x);
        let height = clamp(region.height, min_height, self.image.height - y);

        CropRegion::new(x, y, width, height)
    }

    /// Moves `region` back inside the image without resizing it.
    pub fn constrain_position(&self, region: &CropRegion) -> CropRegion {
        let width = clamp(region.width, self.min_width(), self.image.width);
        let height = clamp(region.height, self.min_height(), self.image.height);
        CropRegion::new(
            clamp(region.x, 0.0, self.image.width - width),
            clamp(region.y, 0.0, self.image.height - height),
            width,
            height,
        )
    }

    /// Snaps every field of `region` to the grid.
    pub fn snap_region(&self, region: &CropRegion) -> CropRegion {
        CropRegion::new(
            self.snap_to_grid(region.x),
            self.snap_to_grid(region.y),
            self.snap_to_grid(region.width),
            self.snap_to_grid(region.height),
        )
    }

    /// Reshapes `region` to `ratio` (width / height).
    ///
    /// With a handle, the handle decides which dimension is kept: top and
    /// bottom edges keep the height, every other handle keeps the width. The
    /// edges the handle does not move stay where they are. Without a handle,
    /// the dimension that is too large for the ratio is reduced and the region
    /// keeps its center.
    ///
    /// The result is scaled to fit the space available on the moving side
    /// and raised to the size floor, so `constrain` afterwards only disturbs
    /// the ratio when the image itself cannot hold it.
    pub fn enforce_aspect_ratio(
        &self,
        region: &CropRegion,
        ratio: Option<f64>,
        handle: Option<HandleId>,
    ) -> CropRegion {
        let Some(ratio) = ratio.filter(|r| r.is_finite() && *r > 0.0) else {
            return *region;
        };

        match handle {
            Some(HandleId::Center) => *region,
            Some(handle) => self.enforce_anchored(region, ratio, handle),
            None => self.enforce_centered(region, ratio),
        }
    }

    /// Runs the full pipeline on `candidate`.
    pub fn apply(
        &self,
        candidate: &CropRegion,
        ratio: Option<f64>,
        handle: Option<HandleId>,
    ) -> CropRegion {
        let shaped = self.enforce_aspect_ratio(candidate, ratio, handle);
        let clamped = self.constrain(&shaped);
        let snapped = self.snap_region(&clamped);
        self.constrain(&snapped)
    }

    /// Pipeline for pure translation: clamp position, snap position, clamp again.
    pub fn apply_move(&self, candidate: &CropRegion) -> CropRegion {
        let clamped = self.constrain_position(candidate);
        let snapped = CropRegion::new(
            self.snap_to_grid(clamped.x),
            self.snap_to_grid(clamped.y),
            clamped.width,
            clamped.height,
        );
        self.constrain_position(&snapped)
    }

    fn enforce_anchored(&self, region: &CropRegion, ratio: f64, handle: HandleId) -> CropRegion {
        // Edges the handle leaves alone act as anchors.
        let right = region.right().min(self.image.width);
        let bottom = region.bottom().min(self.image.height);
        let left = region.x.max(0.0);
        let top = region.y.max(0.0);

        let max_width = if handle.moves_left_edge() {
            right
        } else {
            self.image.width - left
        };
        let max_height = if handle.moves_top_edge() {
            bottom
        } else {
            self.image.height - top
        };

        let (width, height) = if handle.drives_width() {
            (region.width, region.width / ratio)
        } else {
            (region.height * ratio, region.height)
        };
        let (width, height) = self.fit(width, height, ratio, max_width, max_height);

        let x = if handle.moves_left_edge() {
            right - width
        } else {
            region.x
        };
        let y = if handle.moves_top_edge() {
            bottom - height
        } else {
            region.y
        };

        self.shift_inside(x, y, width, height)
    }

    fn enforce_centered(&self, region: &CropRegion, ratio: f64) -> CropRegion {
        let center = region.center();
        let (width, height) = if region.aspect_ratio() > ratio {
            (region.height * ratio, region.height)
        } else {
            (region.width, region.width / ratio)
        };

        let max_width = 2.0 * center.x.min(self.image.width - center.x);
        let max_height = 2.0 * center.y.min(self.image.height - center.y);
        let (width, height) = self.fit(
            width,
            height,
            ratio,
            max_width.max(self.min_width()),
            max_height.max(self.min_height()),
        );

        self.shift_inside(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }

    /// Translates a reshaped region back into the image. Only a size raised
    /// to the floor can overhang, and moving it keeps the ratio intact.
    fn shift_inside(&self, x: f64, y: f64, width: f64, height: f64) -> CropRegion {
        CropRegion::new(
            clamp(x, 0.0, self.image.width - width),
            clamp(y, 0.0, self.image.height - height),
            width,
            height,
        )
    }

    /// Scales a `ratio`-shaped size down into `max_*`, then up to the floor.
    fn fit(&self, width: f64, height: f64, ratio: f64, max_width: f64, max_height: f64) -> (f64, f64) {
        let (mut width, mut height) = (width, height);

        if width > max_width {
            width = max_width;
            height = width / ratio;
        }
        if height > max_height {
            height = max_height;
            width = height * ratio;
        }
        if width < self.min_width() {
            width = self.min_width();
            height = width / ratio;
        }
        if height < self.min_height() {
            height = self.min_height();
            width = height * ratio;
        }

        (width, height)
    }
}

/// `value.clamp(lo, hi)` that tolerates `lo > hi` (the upper bound wins)
/// and maps NaN to `lo`.
fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    let hi = hi.max(0.0);
    let lo = lo.min(hi);
    if value.is_nan() {
        return lo;
    }
    value.max(lo).min(hi)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constraints() -> Constraints {
        Constraints::new(Size::new(800.0, 600.0), 50.0, 10.0)
    }

    #[test]
    fn test_snap_to_grid() {
        let c = constraints();
        assert_eq!(c.snap_to_grid(47.0), 50.0);
        assert_eq!(c.snap_to_grid(63.0), 60.0);
        assert_eq!(c.snap_to_grid(65.0), 70.0);
        assert_eq!(c.snap_to_grid(0.0), 0.0);
    }

    #[test]
    fn test_snap_toward() {
        let c = constraints();
        assert_eq!(c.snap_toward(405.0, SnapDirection::Up), 410.0);
        assert_eq!(c.snap_toward(405.0, SnapDirection::Down), 400.0);
        assert_eq!(c.snap_toward(400.0, SnapDirection::Up), 400.0);
    }

    #[test]
    fn test_constrain_clamps_position_and_size() {
        let c = constraints();
        let r = c.constrain(&CropRegion::new(-20.0, 700.0, 1000.0, 10.0));
        assert_eq!(r, CropRegion::new(0.0, 550.0, 800.0, 50.0));
    }

    #[test]
    fn test_constrain_enforces_floor() {
        let c = constraints();
        let r = c.constrain(&CropRegion::new(200.0, 150.0, 20.0, 20.0));
        assert_eq!(r.width, 50.0);
        assert_eq!(r.height, 50.0);
    }

    #[test]
    fn test_constrain_tiny_image() {
        let c = Constraints::new(Size::new(30.0, 40.0), 50.0, 10.0);
        let r = c.constrain(&CropRegion::new(5.0, 5.0, 10.0, 10.0));
        assert_eq!(r, CropRegion::new(0.0, 0.0, 30.0, 40.0));
    }

    #[test]
    fn test_clamp_handles_nan() {
        let c = constraints();
        let r = c.constrain(&CropRegion::new(f64::NAN, 10.0, f64::NAN, 100.0));
        assert_eq!(r.x, 0.0);
        assert_eq!(r.width, 50.0);
    }

    #[test]
    fn test_enforce_without_ratio_is_identity() {
        let c = constraints();
        let r = CropRegion::new(1.0, 2.0, 300.0, 70.0);
        assert_eq!(c.enforce_aspect_ratio(&r, None, Some(HandleId::Right)), r);
    }

    #[test]
    fn test_enforce_centered_square() {
        let c = constraints();
        let r = c.enforce_aspect_ratio(&CropRegion::new(200.0, 150.0, 400.0, 300.0), Some(1.0), None);
        assert_eq!(r, CropRegion::new(250.0, 150.0, 300.0, 300.0));
    }

    #[test]
    fn test_enforce_right_handle_keeps_width() {
        let c = constraints();
        let r = c.enforce_aspect_ratio(
            &CropRegion::new(100.0, 100.0, 320.0, 100.0),
            Some(16.0 / 9.0),
            Some(HandleId::Right),
        );
        assert_eq!(r.width, 320.0);
        assert!((r.height - 180.0).abs() < 1e-9);
        assert_eq!(r.y, 100.0);
    }

    #[test]
    fn test_enforce_bottom_handle_keeps_height() {
        let c = constraints();
        let r = c.enforce_aspect_ratio(
            &CropRegion::new(100.0, 100.0, 100.0, 200.0),
            Some(1.0),
            Some(HandleId::Bottom),
        );
        assert_eq!(r, CropRegion::new(100.0, 100.0, 200.0, 200.0));
    }

    #[test]
    fn test_enforce_top_left_keeps_bottom_right_anchor() {
        let c = constraints();
        let r = c.enforce_aspect_ratio(
            &CropRegion::new(300.0, 100.0, 200.0, 300.0),
            Some(1.0),
            Some(HandleId::TopLeft),
        );
        assert_eq!(r.right(), 500.0);
        assert_eq!(r.bottom(), 400.0);
        assert_eq!(r.width, 200.0);
        assert_eq!(r.height, 200.0);
    }

    #[test]
    fn test_enforce_shrinks_to_available_space() {
        let c = constraints();
        // Height derived from width would run off the bottom edge.
        let r = c.enforce_aspect_ratio(
            &CropRegion::new(0.0, 400.0, 600.0, 100.0),
            Some(1.0),
            Some(HandleId::Right),
        );
        assert_eq!(r.height, 200.0);
        assert_eq!(r.width, 200.0);
        assert!(r.bottom() <= 600.0);
    }

    #[test]
    fn test_floor_raised_region_is_shifted_not_trimmed() {
        let c = constraints();
        // Pinned to the right edge; a 2:1 region at the 50px height floor is 100 wide.
        let r = c.apply(&CropRegion::new(750.0, 100.0, 50.0, 50.0), Some(2.0), None);
        assert_eq!(r, CropRegion::new(700.0, 100.0, 100.0, 50.0));
    }

    #[test]
    fn test_pipeline_snaps_and_stays_in_bounds() {
        let c = Constraints::new(Size::new(805.0, 603.0), 50.0, 10.0);
        let r = c.apply(&CropRegion::new(3.0, 7.0, 900.0, 900.0), None, None);
        assert_eq!(r.x, 0.0);
        assert_eq!(r.y, 10.0);
        assert_eq!(r.width, 800.0);
        // 600 would overrun the 603px edge from y = 10
        assert_eq!(r.height, 593.0);
        assert!(r.fits_within(c.image(), 50.0));
    }

    #[test]
    fn test_apply_move_preserves_size() {
        let c = constraints();
        let r = c.apply_move(&CropRegion::new(650.0, -40.0, 300.0, 200.0));
        assert_eq!(r, CropRegion::new(500.0, 0.0, 300.0, 200.0));
    }
}
