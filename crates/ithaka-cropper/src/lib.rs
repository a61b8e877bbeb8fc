//! # Ithaka Cropper
//!
//! Geometry engine behind the image crop tool of the page editor.
//!
//! ## Core Components
//!
//! - **CropTool**: one crop session over one image; pointer, keyboard, and
//!   aspect-ratio input in, a valid [`CropRegion`] out
//! - **Constraints**: the fixed pipeline every change passes through
//!   (aspect ratio, boundary clamp, grid snap, final clamp)
//! - **HandleId**: the nine grab points and how each reshapes the region
//! - **AspectRatioPreset**: named ratio locks plus `custom` and `free`
//!
//! ## Invariants
//!
//! After every call the committed region lies inside the image, is at least
//! `min_size` (50px) on each side where the image allows it, and follows the
//! active aspect ratio up to grid rounding.
//!
//! ## Usage
//!
//! ```
//! use ithaka_core::Point;
//! use ithaka_cropper::{AspectRatioPreset, ContainerRect, CropTool};
//!
//! let mut tool = CropTool::new(800.0, 600.0);
//! let container = ContainerRect::new(0.0, 0.0, 800.0, 600.0);
//!
//! // Drag the bottom-right corner 50px right and 30px down.
//! assert!(tool.handle_mouse_down(Point::new(600.0, 450.0), &container));
//! tool.handle_mouse_move(Point::new(650.0, 480.0), &container);
//! tool.handle_mouse_up();
//! assert_eq!(tool.crop_data().width, 450.0);
//!
//! tool.set_aspect_ratio(AspectRatioPreset::Square);
//! let crop = tool.crop_data();
//! assert_eq!(crop.width, crop.height);
//! ```

pub mod aspect;
pub mod constraints;
pub mod handle;
pub mod input;
pub mod region;
pub mod settings;
pub mod tool;

pub use aspect::{clamp_custom_ratio, AspectRatioPreset, MAX_CUSTOM_RATIO, MIN_CUSTOM_RATIO};
pub use constraints::{Constraints, SnapDirection};
pub use handle::HandleId;
pub use input::{Key, KeyEvent};
pub use region::{ContainerRect, CropRegion, CropUpdate};
pub use settings::{CropSettings, MIN_SIZE};
pub use tool::{CropTool, DragState};
