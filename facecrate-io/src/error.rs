//! Error types for I/O operations

use facecrate_core::{AttributeLayout, MeshAttributeKind};
use thiserror::Error;

/// Errors raised while exporting geometry
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Unsupported mesh structure: expected exactly 1 sub-mesh, found {meshes}")]
    UnsupportedMeshStructure { meshes: usize },

    #[error("Unsupported attribute layout: {attribute} attribute is {layout}, expected VERTEX_BASED")]
    UnsupportedAttributeLayout {
        attribute: MeshAttributeKind,
        layout: AttributeLayout,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while reading geometry, images and frame sequences
#[derive(Error, Debug)]
pub enum IoError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid file format: {format}")]
    InvalidFormat { format: String },

    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("Frame {frame} is not part of the sequence")]
    MissingFrame { frame: i64 },

    #[error("Frame sequence has gaps: {found} frames in range [{first}, {last}]")]
    SequenceGap { first: i64, last: i64, found: usize },

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Core(#[from] facecrate_core::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for reading operations
pub type IoResult<T> = std::result::Result<T, IoError>;
