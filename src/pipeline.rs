// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Frame-by-frame annotation pipeline.
//!
//! Drives decode → detect → track → draw → encode for one video job. The
//! loop is single-threaded and sequential: frame N completes fully before
//! frame N+1 begins, which is what the stateful detector's monotonic
//! video-time contract requires. Jobs are fully isolated; each gets a fresh
//! tracker and shares no mutable state with other jobs.

use image::RgbImage;

use crate::config::PipelineConfig;
use crate::detector::LandmarkSource;
use crate::error::Result;
use crate::filter;
use crate::landmark::Pose;
use crate::render::SkeletonRenderer;
use crate::tracker::IdentityTracker;

#[cfg(feature = "video")]
use std::path::Path;
#[cfg(feature = "video")]
use std::time::Instant;

/// Outcome of a completed annotation job.
#[derive(Debug, Clone, Copy)]
pub struct JobSummary {
    /// Frames decoded, annotated, and encoded.
    pub frames: u64,
    /// Distinct identities created over the job.
    pub tracks_created: u64,
    /// Wall-clock job duration in milliseconds.
    pub elapsed_ms: f64,
}

/// Presentation timestamp handed to the detector for a frame.
///
/// `round(frame_index / fps * 1000)` milliseconds; strictly non-decreasing
/// across frames in index order.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn timestamp_ms(frame_index: u64, fps: f32) -> i64 {
    #[allow(clippy::cast_precision_loss)]
    let seconds = frame_index as f64 / f64::from(fps);
    (seconds * 1000.0).round() as i64
}

/// The per-job annotation pipeline, generic over the detector backend.
///
/// Owns the per-frame buffers and the job-scoped [`IdentityTracker`];
/// stages only communicate through the per-frame data handed between them.
pub struct FramePipeline<D: LandmarkSource> {
    detector: D,
    tracker: IdentityTracker,
    renderer: SkeletonRenderer,
    overlay: bool,
    fps: f32,
    frame_index: u64,
}

impl<D: LandmarkSource> FramePipeline<D> {
    /// Create a pipeline for one job.
    ///
    /// # Arguments
    ///
    /// * `detector` - Pose-estimation collaborator, exclusively owned.
    /// * `config` - Tracker and background settings.
    /// * `width`, `height` - Source frame dimensions in pixels.
    /// * `fps` - Source frame rate, used for detector timestamps.
    #[must_use]
    pub fn new(detector: D, config: &PipelineConfig, width: u32, height: u32, fps: f32) -> Self {
        let dist_thresh = config
            .dist_thresh
            .unwrap_or_else(|| IdentityTracker::default_dist_thresh(width, height));

        Self {
            detector,
            tracker: IdentityTracker::new(dist_thresh, config.max_age),
            renderer: SkeletonRenderer::new(),
            overlay: config.overlay,
            fps,
            frame_index: 0,
        }
    }

    /// Run one frame through detect → filter → track → draw.
    ///
    /// Returns the output frame: a copy of the input with skeletons drawn
    /// over it, or skeletons on solid black when overlay mode is off. A
    /// frame with zero detections (or all rejected by the confidence gate)
    /// passes through with nothing drawn; that is not an error.
    ///
    /// # Errors
    ///
    /// Propagates detector failures, which abort the job.
    pub fn annotate_frame(&mut self, frame: &RgbImage) -> Result<RgbImage> {
        let timestamp = timestamp_ms(self.frame_index, self.fps);
        let poses = self.detector.detect(frame, timestamp)?;

        let accepted: Vec<&Pose> = poses.iter().filter(|p| filter::accept(p)).collect();

        let (width, height) = frame.dimensions();
        let centroids: Vec<(f32, f32)> = accepted
            .iter()
            .map(|p| p.centroid(width, height))
            .collect();
        let ids = self.tracker.update(&centroids, self.frame_index);

        let mut output = if self.overlay {
            frame.clone()
        } else {
            RgbImage::new(width, height)
        };

        for (pose, id) in accepted.iter().zip(ids) {
            let label = format!("Person {id}");
            self.renderer.draw(&mut output, pose, Some(&label));
        }

        self.frame_index += 1;
        Ok(output)
    }

    /// Index of the next frame to be processed.
    #[must_use]
    pub const fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Identities created so far.
    #[must_use]
    pub const fn tracks_created(&self) -> u64 {
        self.tracker.tracks_created()
    }

    /// The detector backend.
    #[must_use]
    pub const fn detector(&self) -> &D {
        &self.detector
    }
}

/// Run a full annotation job from a source video to an output video.
///
/// Opens the source, probes its rate and dimensions, opens the encoder at
/// the same rate and dimensions, then annotates every frame in decode order
/// until the source is exhausted. The output container is finalized before
/// returning.
///
/// # Errors
///
/// Failing to open the source or the encoder is fatal for the whole job and
/// no output file is considered valid. Detector failures on any frame also
/// abort the job.
#[cfg(feature = "video")]
pub fn run<D, P, Q>(
    detector: D,
    input: P,
    output: Q,
    config: &PipelineConfig,
) -> Result<JobSummary>
where
    D: LandmarkSource,
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let started = Instant::now();

    let mut source = crate::source::VideoSource::open(input)?;
    let (width, height) = source.dimensions();
    let fps = source.frame_rate();

    let mut writer =
        crate::io::VideoWriter::new(output, width as usize, height as usize, fps)?;

    let mut pipeline = FramePipeline::new(detector, config, width, height, fps);

    while let Some(frame) = source.next_frame() {
        let annotated = pipeline.annotate_frame(&frame)?;
        writer.write_frame(&annotated)?;
    }

    writer.finish()?;

    Ok(JobSummary {
        frames: pipeline.frame_index(),
        tracks_created: pipeline.tracks_created(),
        elapsed_ms: started.elapsed().as_secs_f64() * 1000.0,
    })
}
