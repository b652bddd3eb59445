// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Pipeline configuration.
//!
//! This module defines the [`PipelineConfig`] struct, which controls the
//! identity tracker's lifecycle parameters and the output background mode.
//! It uses a builder pattern for convenient construction.
//!
//! The pose confidence gate is a fixed policy constant
//! ([`crate::filter::CONFIDENCE_THRESHOLD`]) and is deliberately not
//! configurable here.

use crate::tracker::DEFAULT_MAX_AGE;

/// Configuration for a video annotation job.
///
/// # Example
///
/// ```rust
/// use pose_annotator::PipelineConfig;
///
/// let config = PipelineConfig::new()
///     .with_max_age(30)
///     .with_overlay(false);
/// ```
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Frames a track may go unmatched before it is removed.
    pub max_age: u64,
    /// Explicit tracker matching distance threshold in pixels.
    /// If `None`, derived from the frame size as `max(40, 0.05 * max(w, h))`.
    pub dist_thresh: Option<f32>,
    /// Draw skeletons over the original frames (`true`) or on a solid-black
    /// background of identical dimensions (`false`).
    pub overlay: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_age: DEFAULT_MAX_AGE,
            dist_thresh: None,
            overlay: true,
        }
    }
}

impl PipelineConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the track expiry age, in frames.
    #[must_use]
    pub const fn with_max_age(mut self, max_age: u64) -> Self {
        self.max_age = max_age;
        self
    }

    /// Override the tracker's matching distance threshold, in pixels.
    #[must_use]
    pub const fn with_dist_thresh(mut self, dist_thresh: f32) -> Self {
        self.dist_thresh = Some(dist_thresh);
        self
    }

    /// Set the background mode: overlay-on-original or solid black.
    #[must_use]
    pub const fn with_overlay(mut self, overlay: bool) -> Self {
        self.overlay = overlay;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = PipelineConfig::default();
        assert_eq!(config.max_age, DEFAULT_MAX_AGE);
        assert!(config.dist_thresh.is_none());
        assert!(config.overlay);
    }

    #[test]
    fn test_config_builder() {
        let config = PipelineConfig::new()
            .with_max_age(30)
            .with_dist_thresh(64.0)
            .with_overlay(false);

        assert_eq!(config.max_age, 30);
        assert_eq!(config.dist_thresh, Some(64.0));
        assert!(!config.overlay);
    }
}
