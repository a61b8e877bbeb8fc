//! Grab points on the crop rectangle.

use crate::region::CropRegion;
use ithaka_core::Point;
use std::fmt;

/// Which part of the crop rectangle a gesture manipulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleId {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Top,
    Right,
    Bottom,
    Left,
    /// Interior of the rectangle; moves without resizing
    Center,
}

impl HandleId {
    /// Corner handles, hit-tested before edges so they win where zones overlap.
    pub const CORNERS: [HandleId; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// Edge midpoint handles.
    pub const EDGES: [HandleId; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// Short identifier used by the overlay markup (`tl`, `r`, `center`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TopLeft => "tl",
            Self::TopRight => "tr",
            Self::BottomLeft => "bl",
            Self::BottomRight => "br",
            Self::Top => "t",
            Self::Right => "r",
            Self::Bottom => "b",
            Self::Left => "l",
            Self::Center => "center",
        }
    }

    /// CSS cursor name for hovering this handle.
    pub fn cursor(&self) -> &'static str {
        match self {
            Self::TopLeft | Self::BottomRight => "nwse-resize",
            Self::TopRight | Self::BottomLeft => "nesw-resize",
            Self::Top | Self::Bottom => "ns-resize",
            Self::Left | Self::Right => "ew-resize",
            Self::Center => "move",
        }
    }

    /// Position of this handle on `region`, in the region's coordinate space.
    pub fn anchor_on(&self, region: &CropRegion) -> Point {
        let mid_x = region.x + region.width / 2.0;
        let mid_y = region.y + region.height / 2.0;
        match self {
            Self::TopLeft => Point::new(region.x, region.y),
            Self::TopRight => Point::new(region.right(), region.y),
            Self::BottomLeft => Point::new(region.x, region.bottom()),
            Self::BottomRight => Point::new(region.right(), region.bottom()),
            Self::Top => Point::new(mid_x, region.y),
            Self::Right => Point::new(region.right(), mid_y),
            Self::Bottom => Point::new(mid_x, region.bottom()),
            Self::Left => Point::new(region.x, mid_y),
            Self::Center => Point::new(mid_x, mid_y),
        }
    }

    /// Handle moves the left edge.
    pub fn moves_left_edge(&self) -> bool {
        matches!(self, Self::TopLeft | Self::BottomLeft | Self::Left)
    }

    /// Handle moves the right edge.
    pub fn moves_right_edge(&self) -> bool {
        matches!(self, Self::TopRight | Self::BottomRight | Self::Right)
    }

    /// Handle moves the top edge.
    pub fn moves_top_edge(&self) -> bool {
        matches!(self, Self::TopLeft | Self::TopRight | Self::Top)
    }

    /// Handle moves the bottom edge.
    pub fn moves_bottom_edge(&self) -> bool {
        matches!(self, Self::BottomLeft | Self::BottomRight | Self::Bottom)
    }

    /// Under a ratio lock, whether the width is kept and the height derived
    /// from it. Only the top and bottom edge handles drive the height instead.
    pub fn drives_width(&self) -> bool {
        !matches!(self, Self::Top | Self::Bottom | Self::Center)
    }

    /// Applies an image-space pointer delta to `start`.
    ///
    /// Moving edges are limited so the opposite edge stays put: a left or top
    /// edge never crosses past `min_width`/`min_height` from its partner and
    /// never leaves the image on the low side. `Center` translates only.
    pub fn apply_delta(
        &self,
        start: &CropRegion,
        dx: f64,
        dy: f64,
        min_width: f64,
        min_height: f64,
    ) -> CropRegion {
        let mut next = *start;

        if *self == Self::Center {
            next.x += dx;
            next.y += dy;
            return next;
        }

        if self.moves_left_edge() {
            let dx = dx.max(-start.x).min(start.width - min_width);
            next.x = start.x + dx;
            next.width = start.width - dx;
        } else if self.moves_right_edge() {
            next.width = start.width + dx;
        }

        if self.moves_top_edge() {
            let dy = dy.max(-start.y).min(start.height - min_height);
            next.y = start.y + dy;
            next.height = start.height - dy;
        } else if self.moves_bottom_edge() {
            next.height = start.height + dy;
        }

        next
    }
}

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
