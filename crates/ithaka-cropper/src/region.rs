//! Crop rectangle and the on-screen container it is edited in.

use ithaka_core::{Point, Size};
use serde::{Deserialize, Serialize};

/// Rectangular crop area in source-image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CropRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRegion {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Region covering `fraction` of each image dimension, centered, with
    /// every value rounded to whole pixels.
    pub fn centered(image: Size, fraction: f64) -> Self {
        let margin = (1.0 - fraction) / 2.0;
        Self {
            x: (image.width * margin).round(),
            y: (image.height * margin).round(),
            width: (image.width * fraction).round(),
            height: (image.height * fraction).round(),
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    /// Inclusive containment test.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// True when the region lies inside `image` and meets the size floor.
    pub fn fits_within(&self, image: Size, min_size: f64) -> bool {
        let min_width = min_size.min(image.width);
        let min_height = min_size.min(image.height);
        self.x >= 0.0
            && self.y >= 0.0
            && self.right() <= image.width
            && self.bottom() <= image.height
            && self.width >= min_width
            && self.height >= min_height
    }

    /// Returns a copy with every field present in `update` replaced.
    pub fn merged(&self, update: &CropUpdate) -> Self {
        Self {
            x: update.x.unwrap_or(self.x),
            y: update.y.unwrap_or(self.y),
            width: update.width.unwrap_or(self.width),
            height: update.height.unwrap_or(self.height),
        }
    }

    /// Maps this image-space region into container pixels for drawing the overlay.
    pub fn to_display(&self, container: &ContainerRect, image: Size) -> Self {
        let (sx, sy) = container.display_scale(image);
        Self {
            x: container.left + self.x * sx,
            y: container.top + self.y * sy,
            width: self.width * sx,
            height: self.height * sy,
        }
    }
}

/// Partial write for [`crate::CropTool::update_crop_data`]; `None` keeps the current value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CropUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl CropUpdate {
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn size(width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }
}

/// Bounding box of the element the image is rendered into, in client pixels.
///
/// The image fills the container, so the ratio between the two sizes converts
/// pointer movement into image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ContainerRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// A container at the origin rendering the image at its natural size.
    pub fn natural(image: Size) -> Self {
        Self::new(0.0, 0.0, image.width, image.height)
    }

    /// False for a collapsed or unmeasured container; no pointer input can be
    /// mapped through it.
    pub fn is_measurable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Image pixels per container pixel on each axis.
    pub fn image_scale(&self, image: Size) -> (f64, f64) {
        (image.width / self.width, image.height / self.height)
    }

    /// Container pixels per image pixel on each axis.
    pub fn display_scale(&self, image: Size) -> (f64, f64) {
        (self.width / image.width, self.height / image.height)
    }

    /// Converts a client-space pointer position into image space.
    pub fn to_image_space(&self, client: Point, image: Size) -> Point {
        let (sx, sy) = self.image_scale(image);
        Point::new((client.x - self.left) * sx, (client.y - self.top) * sy)
    }
}
