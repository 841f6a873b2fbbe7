//! # facecrate
//!
//! Geometry, camera and image utilities for face reconstruction and texture
//! baking pipelines.
//!
//! This is the umbrella crate that re-exports the individual crates. Use
//! `facecrate-core` or `facecrate-io` directly for finer control over
//! dependencies.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use facecrate::prelude::*;
//!
//! let mut builder = MeshBuilder::new();
//! builder.add_point(Point3f::new(0.0, 0.0, 0.0));
//! builder.add_point(Point3f::new(1.0, 0.0, 0.0));
//! builder.add_point(Point3f::new(0.0, 1.0, 0.0));
//! builder.add_face(&[0, 1, 2]);
//! builder.set_uvs_attribute(
//!     AttributeLayout::VertexBased,
//!     vec![uv(0.0, 0.0), uv(1.0, 0.0), uv(0.0, 1.0)],
//! );
//! let geometry = Geometry::from(builder.build()?);
//!
//! write_geometry_obj(&geometry, "head.obj")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Enables `io`
//! - `io`: OBJ export and reading, image and frame sequence loading

// Re-export core functionality
pub use facecrate_core::*;

#[cfg(feature = "io")]
pub use facecrate_io as io;

/// Convenient imports for common use cases
pub mod prelude {
    pub use facecrate_core::*;

    #[cfg(feature = "io")]
    pub use facecrate_io::*;
}
