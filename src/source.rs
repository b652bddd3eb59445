// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Sequential frame reading from a source video.

use std::path::Path;
#[cfg(feature = "video")]
use std::path::PathBuf;

#[cfg(feature = "video")]
use image::RgbImage;

use crate::error::{AnnotatorError, Result};

/// A source video opened for sequential frame reads.
///
/// Exposes the frame rate and dimensions probed at open time; frames are
/// decoded one at a time in presentation order. End of stream is a clean
/// stop, not an error.
#[cfg(feature = "video")]
pub struct VideoSource {
    decoder: video_rs::decode::Decoder,
    path: PathBuf,
    frames_read: usize,
}

#[cfg(feature = "video")]
impl VideoSource {
    /// Open a source video for decoding.
    ///
    /// # Errors
    ///
    /// Returns [`AnnotatorError::SourceError`] if the file cannot be opened
    /// or probed. This is fatal for the whole job.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        crate::io::init_video();

        let path = path.as_ref().to_path_buf();
        let decoder = video_rs::decode::Decoder::new(path.as_path()).map_err(|e| {
            AnnotatorError::SourceError(format!("Failed to open {}: {e}", path.display()))
        })?;

        Ok(Self {
            decoder,
            path,
            frames_read: 0,
        })
    }

    /// Source frame rate in frames per second.
    #[must_use]
    pub fn frame_rate(&self) -> f32 {
        self.decoder.frame_rate()
    }

    /// Source frame dimensions as (width, height).
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.decoder.size()
    }

    /// Source path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of frames decoded so far.
    #[must_use]
    pub const fn frames_read(&self) -> usize {
        self.frames_read
    }

    /// Decode the next frame, or `None` at end of stream.
    ///
    /// `video-rs` surfaces end-of-file as a decode error; any decode failure
    /// after open is treated as end of stream.
    pub fn next_frame(&mut self) -> Option<RgbImage> {
        match self.decoder.decode() {
            Ok((_ts, frame)) => {
                self.frames_read += 1;
                frame_to_image(&frame)
            }
            Err(_) => None,
        }
    }
}

/// Convert a decoded HWC frame array to an `RgbImage`.
#[cfg(feature = "video")]
#[allow(clippy::cast_possible_truncation)]
fn frame_to_image(frame: &video_rs::Frame) -> Option<RgbImage> {
    let shape = frame.shape();
    let (height, width) = (shape[0], shape[1]);

    let mut rgb_data = Vec::with_capacity(height * width * 3);
    for y in 0..height {
        for x in 0..width {
            rgb_data.push(frame[[y, x, 0]]);
            rgb_data.push(frame[[y, x, 1]]);
            rgb_data.push(frame[[y, x, 2]]);
        }
    }

    RgbImage::from_raw(width as u32, height as u32, rgb_data)
}

#[cfg(not(feature = "video"))]
/// Placeholder when compiled without the `video` feature.
pub struct VideoSource;

#[cfg(not(feature = "video"))]
impl VideoSource {
    /// Always fails: video decoding requires the `video` feature.
    ///
    /// # Errors
    ///
    /// Returns [`AnnotatorError::FeatureNotEnabled`].
    pub fn open<P: AsRef<Path>>(_path: P) -> Result<Self> {
        Err(AnnotatorError::FeatureNotEnabled(
            "Video decoding requires the 'video' feature".to_string(),
        ))
    }
}

#[cfg(all(test, feature = "video"))]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_file_is_fatal() {
        let result = VideoSource::open("definitely/not/a/video.mp4");
        assert!(matches!(result, Err(AnnotatorError::SourceError(_))));
    }
}
