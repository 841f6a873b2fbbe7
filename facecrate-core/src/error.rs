//! Error types for facecrate

use thiserror::Error;

/// Main error type for facecrate operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Invalid camera parameters: {0}")]
    InvalidCamera(String),

    #[error("Operation aborted at {progress:.1}% progress")]
    Aborted { progress: f32 },
}

/// Result type alias for facecrate operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::InvalidCamera("far plane must lie beyond near plane".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid camera parameters: far plane must lie beyond near plane"
        );

        let err = Error::Aborted { progress: 37.5 };
        assert_eq!(err.to_string(), "Operation aborted at 37.5% progress");
    }
}
