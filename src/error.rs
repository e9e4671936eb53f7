//! Error types for the cat eyes application.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// `OpenCV` operation failed
    #[error("OpenCV error: {0}")]
    OpenCV(#[from] opencv::Error),

    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Face detection model file could not be found
    #[error("Face detection model not found: {}", .0.display())]
    ModelNotFound(PathBuf),

    /// Face detection model exists but could not be loaded
    #[error("Model error: {0}")]
    ModelLoad(String),

    /// Camera could not be opened
    #[error("Could not open camera {0}")]
    CameraUnavailable(i32),

    /// A single frame could not be captured
    #[error("Capture error: {0}")]
    Capture(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Whether this error must stop the application.
    ///
    /// Only per-frame capture failures are absorbed by the sampling loop;
    /// everything else is a startup condition the process cannot recover from.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Capture(_))
    }
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
