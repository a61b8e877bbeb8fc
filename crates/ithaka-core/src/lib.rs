//! # Ithaka Core
//!
//! Core types shared by the Ithaka editor engines.
//! Provides the common error type and the pixel geometry primitives the
//! crop tool and the element store agree on.

pub mod error;
pub mod geometry;

pub use error::{ConfigError, Error, GeometryError, Result, SnapshotError};
pub use geometry::{Point, Size};
