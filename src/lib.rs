// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

#![allow(clippy::multiple_crate_versions)]

//! # Pose Annotator
//!
//! Batch video pose annotation library and CLI: decode a video, run a
//! pose-estimation collaborator over every frame, associate detected poses
//! with persistent identities across frames, and render a stick-figure
//! overlay into an output video.
//!
//! The pose model itself is an external collaborator behind the
//! [`LandmarkSource`] trait; video decode and encode go through FFmpeg via
//! `video-rs` (behind the default `video` feature).
//!
//! ## Quick Start
//!
//! ```no_run
//! use pose_annotator::{NullLandmarkSource, PipelineConfig, pipeline};
//!
//! # #[cfg(not(feature = "video"))] fn main() {}
//! # #[cfg(feature = "video")]
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Swap in a real LandmarkSource backend for actual pose detection.
//!     let detector = NullLandmarkSource;
//!     let config = PipelineConfig::new().with_overlay(true);
//!
//!     let summary = pipeline::run(detector, "input.mp4", "annotated.mp4", &config)?;
//!     println!("annotated {} frames", summary.frames);
//!     Ok(())
//! }
//! ```
//!
//! ## Processing model
//!
//! One job runs single-threaded and sequential: each frame's full
//! decode → detect → track → draw → encode cycle completes before the next
//! frame begins, preserving the detector's strictly increasing video-time
//! contract. Jobs are fully isolated: each gets a fresh [`IdentityTracker`]
//! and no state survives past the job.
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`landmark`] | Pose/landmark data model and the fixed 33-point schema |
//! | [`filter`] | Confidence gating of raw detections |
//! | [`tracker`] | Greedy nearest-neighbor identity tracking by centroid |
//! | [`render`] | Stick-figure overlay drawing |
//! | [`detector`] | [`LandmarkSource`] seam for the external pose model |
//! | [`pipeline`] | Per-job frame loop and timestamp computation |
//! | [`source`] | Sequential video decoding |
//! | [`io`] | Output video encoding |
//! | [`config`] | [`PipelineConfig`] builder |
//! | [`error`] | Error types ([`AnnotatorError`], [`Result`]) |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `video` | Video file decode/encode via FFmpeg (default) |

// Modules
pub mod cli;
pub mod config;
pub mod detector;
pub mod error;
pub mod filter;
pub mod io;
pub mod landmark;
pub mod pipeline;
pub mod render;
pub mod source;
pub mod tracker;

// Re-export main types for convenience
pub use config::PipelineConfig;
pub use detector::{LandmarkSource, NullLandmarkSource};
pub use error::{AnnotatorError, Result};
pub use landmark::{Landmark, NUM_LANDMARKS, Pose, SKELETON};
pub use pipeline::{FramePipeline, JobSummary};
pub use render::SkeletonRenderer;
pub use tracker::{IdentityTracker, Track};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(VERSION.contains('.'));
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "pose-annotator");
    }
}
