//! I/O operations for facecrate geometry and images
//!
//! This crate exports head geometry to Wavefront OBJ, reads OBJ files back,
//! and loads and writes the images and numbered frame sequences used by
//! reconstruction and texture baking drivers.

pub mod obj;
pub mod image_io;
pub mod sequence;
pub mod error;

pub use error::*;
pub use self::obj::{read_obj, read_obj_from, write_geometry_obj, ObjExporter, ObjReader, ObjWriteOptions};
pub use image_io::{load_image_rgb, load_image_rgba, load_images, write_image_rgba};
pub use sequence::FrameSequence;

use facecrate_core::Geometry;
use std::path::Path;

/// Trait for reading geometry from files
pub trait GeometryReader {
    fn read_geometry<P: AsRef<Path>>(path: P) -> IoResult<Geometry>;
}

/// Trait for writing geometry to files
pub trait GeometryWriter {
    type Error;

    fn write_geometry<P: AsRef<Path>>(&self, geometry: &Geometry, path: P) -> Result<(), Self::Error>;
}

/// Auto-detect format and read geometry
pub fn read_geometry<P: AsRef<Path>>(path: P) -> IoResult<Geometry> {
    let path = path.as_ref();
    match path.extension().and_then(|s| s.to_str()).map(str::to_lowercase).as_deref() {
        Some("obj") => self::obj::ObjReader::read_geometry(path),
        _ => Err(IoError::InvalidFormat {
            format: format!("Unsupported geometry format: {:?}", path.extension()),
        }),
    }
}
