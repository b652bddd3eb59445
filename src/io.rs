// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Output video encoding.

#[cfg(feature = "video")]
use video_rs::{Encoder, Time, encode::Settings as EncoderSettings};

use crate::error::{AnnotatorError, Result};
use std::path::Path;

#[cfg(feature = "video")]
use std::sync::Once;

#[cfg(feature = "video")]
static INIT: Once = Once::new();

/// Initialize the global video backend once.
///
/// Ensures `video-rs` (and the FFmpeg context behind it) is initialized.
/// Safe to call multiple times.
#[allow(clippy::missing_const_for_fn)]
pub fn init_video() {
    #[cfg(feature = "video")]
    INIT.call_once(|| {
        if let Err(e) = video_rs::init() {
            eprintln!("Failed to initialize video-rs: {e}");
        }
    });
}

/// A wrapper around the `video-rs` encoder for writing annotated frames.
///
/// Frames are appended at a fixed rate and dimensions matching the source;
/// the container becomes playable once [`VideoWriter::finish`] runs.
#[cfg(feature = "video")]
pub struct VideoWriter {
    encoder: Encoder,
    frame_duration: Time,
    position: Time,
    width: usize,
    height: usize,
}

#[cfg(feature = "video")]
impl VideoWriter {
    /// Create a new `VideoWriter` (H.264, yuv420p).
    ///
    /// # Arguments
    ///
    /// * `path` - Output video path (e.g., "annotated.mp4").
    /// * `width` - Video width.
    /// * `height` - Video height.
    /// * `fps` - Frames per second.
    ///
    /// # Errors
    ///
    /// Returns [`AnnotatorError::EncodeError`] if the encoder cannot be
    /// initialized. This is fatal for the whole job.
    pub fn new<P: AsRef<Path>>(path: P, width: usize, height: usize, fps: f32) -> Result<Self> {
        init_video();

        let output_path = path.as_ref().to_path_buf();
        if let Some(parent) = output_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                AnnotatorError::EncodeError(format!(
                    "Failed to create directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let settings = EncoderSettings::preset_h264_yuv420p(width, height, false);
        let encoder = Encoder::new(output_path.as_path(), settings).map_err(|e| {
            AnnotatorError::EncodeError(format!("Failed to create video encoder: {e}"))
        })?;

        let seconds_per_frame = 1.0 / f64::from(fps);
        let frame_duration = Time::from_secs_f64(seconds_per_frame);

        Ok(Self {
            encoder,
            frame_duration,
            position: Time::zero(),
            width,
            height,
        })
    }

    /// Append a frame to the output video.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails or the frame dimensions do not
    /// match the writer's.
    pub fn write_frame(&mut self, frame: &image::RgbImage) -> Result<()> {
        let width = frame.width() as usize;
        let height = frame.height() as usize;

        if width != self.width || height != self.height {
            return Err(AnnotatorError::EncodeError(format!(
                "Frame dimensions {}x{} do not match video dimensions {}x{}",
                width, height, self.width, self.height
            )));
        }

        let raw = frame.as_raw().clone();
        let frame_array = ndarray::Array3::from_shape_vec((height, width, 3), raw)
            .map_err(|e| AnnotatorError::ImageError(format!("Bad frame buffer shape: {e}")))?;

        self.encoder
            .encode(&frame_array, self.position)
            .map_err(|e| AnnotatorError::EncodeError(format!("Failed to encode frame: {e}")))?;

        self.position = self.position.aligned_with(self.frame_duration).add();
        Ok(())
    }

    /// Finish writing the video.
    ///
    /// Calling this explicitly is optional as `drop` will also clean up,
    /// but this allows catching errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the encoder fails to finish.
    pub fn finish(mut self) -> Result<()> {
        self.encoder.finish().map_err(|e| {
            AnnotatorError::EncodeError(format!("Failed to finish video encoding: {e}"))
        })
    }
}

#[cfg(not(feature = "video"))]
/// Placeholder when compiled without the `video` feature.
pub struct VideoWriter;

#[cfg(not(feature = "video"))]
impl VideoWriter {
    /// Always fails: video encoding requires the `video` feature.
    ///
    /// # Errors
    ///
    /// Returns [`AnnotatorError::FeatureNotEnabled`].
    pub fn new<P: AsRef<Path>>(_path: P, _width: usize, _height: usize, _fps: f32) -> Result<Self> {
        Err(AnnotatorError::FeatureNotEnabled(
            "Video encoding requires the 'video' feature".to_string(),
        ))
    }
}
