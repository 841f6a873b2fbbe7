//! Core data structures and traits for facecrate
//!
//! This crate provides the geometry model handed to exporters (polygonal
//! meshes with per-point or per-face-corner attributes, grouped into a
//! [`Geometry`]), the pinhole camera contract used by reconstruction and
//! texture baking drivers, and the progress/abort capability they report to.

pub mod point;
pub mod mesh;
pub mod builder;
pub mod geometry;
pub mod traits;
pub mod transform;
pub mod camera;
pub mod progress;
pub mod error;

pub use point::*;
pub use mesh::*;
pub use builder::*;
pub use geometry::*;
pub use traits::*;
pub use transform::*;
pub use camera::*;
pub use progress::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Matrix4, Point2, Point3, Vector3, UnitQuaternion};
