// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Seam for the external pose-estimation collaborator.

use image::RgbImage;

use crate::error::Result;
use crate::landmark::Pose;

/// A per-frame pose detector operating in stateful video mode.
///
/// Implementations assume one call per logical frame with strictly
/// increasing `timestamp_ms` within one job; the pipeline guarantees both.
/// Returning zero poses is a normal outcome, not an error.
pub trait LandmarkSource {
    /// Detect all poses in a single video frame.
    ///
    /// # Arguments
    ///
    /// * `frame` - Decoded frame pixels.
    /// * `timestamp_ms` - Presentation timestamp in milliseconds.
    ///
    /// # Errors
    ///
    /// Backends report model failures as
    /// [`AnnotatorError::DetectorError`](crate::error::AnnotatorError::DetectorError);
    /// the pipeline treats any error as fatal for the job.
    fn detect(&mut self, frame: &RgbImage, timestamp_ms: i64) -> Result<Vec<Pose>>;
}

/// A detector that never reports poses.
///
/// Useful for exercising the decode/track/encode path without a model
/// backend linked in; every frame is written with no overlay.
#[derive(Debug, Default)]
pub struct NullLandmarkSource;

impl LandmarkSource for NullLandmarkSource {
    fn detect(&mut self, _frame: &RgbImage, _timestamp_ms: i64) -> Result<Vec<Pose>> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_source_reports_nothing() {
        let mut detector = NullLandmarkSource;
        let frame = RgbImage::new(8, 8);
        assert!(detector.detect(&frame, 0).unwrap().is_empty());
    }
}
