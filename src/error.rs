// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Error types for the annotation pipeline.

use std::fmt;

/// Result type alias for annotation operations.
pub type Result<T> = std::result::Result<T, AnnotatorError>;

/// Main error type for the annotation pipeline.
#[derive(Debug)]
pub enum AnnotatorError {
    /// Source video cannot be opened or probed. Fatal for the job.
    SourceError(String),
    /// Output encoder cannot be opened or a frame cannot be encoded.
    EncodeError(String),
    /// Error raised by the landmark-detection collaborator. Aborts the job.
    DetectorError(String),
    /// Error converting or manipulating image buffers.
    ImageError(String),
    /// Feature not enabled.
    FeatureNotEnabled(String),
}

impl fmt::Display for AnnotatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceError(msg) => write!(f, "Source error: {msg}"),
            Self::EncodeError(msg) => write!(f, "Encode error: {msg}"),
            Self::DetectorError(msg) => write!(f, "Detector error: {msg}"),
            Self::ImageError(msg) => write!(f, "Image error: {msg}"),
            Self::FeatureNotEnabled(msg) => write!(f, "Feature not enabled: {msg}"),
        }
    }
}

impl std::error::Error for AnnotatorError {}
