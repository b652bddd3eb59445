// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Stick-figure overlay rendering.
//!
//! Maps an accepted pose to a fixed set of line segments plus a head circle
//! and draws them onto a target frame buffer, optionally with an identity
//! label. Rendering is pure buffer mutation; it never fails and tolerates
//! any subset of landmarks having zero visibility.

use ab_glyph::{FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_circle_mut, draw_line_segment_mut, draw_text_mut};
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::landmark::{
    LEFT_EAR, LEFT_EYE, LEFT_SHOULDER, NOSE, Pose, RIGHT_EAR, RIGHT_EYE, RIGHT_SHOULDER, SKELETON,
};

/// Assets URL for downloading fonts.
const ASSETS_URL: &str = "https://github.com/ultralytics/assets/releases/download/v0.0.0";

/// Font used for identity labels.
const LABEL_FONT: &str = "Arial.ttf";

/// Skeleton line color (orange, from the pose palette).
pub const SKELETON_COLOR: Rgb<u8> = Rgb([255, 128, 0]);

/// Identity label color, distinct from the skeleton lines.
pub const LABEL_COLOR: Rgb<u8> = Rgb([0, 255, 255]);

/// Floor for the head circle radius, in pixels.
pub const MIN_HEAD_RADIUS: f32 = 8.0;

/// Minimum margin from the frame edges for label placement, in pixels.
const LABEL_MARGIN: i32 = 5;

/// Renders stick-figure overlays onto frame buffers.
pub struct SkeletonRenderer {
    font: Option<FontVec>,
}

impl SkeletonRenderer {
    /// Create a renderer, resolving the label font once up front.
    ///
    /// A missing or unparseable font degrades to skeleton-only rendering;
    /// it is never an error.
    #[must_use]
    pub fn new() -> Self {
        Self {
            font: load_label_font(),
        }
    }

    /// Draw a pose's skeleton onto the frame, with an optional identity label.
    ///
    /// The pose's normalized landmarks are scaled by the frame dimensions.
    /// All 16 skeleton segments, the head approximation, and the neck line
    /// are drawn unconditionally; only the head branching and the label
    /// position depend on landmark visibility.
    pub fn draw(&self, frame: &mut RgbImage, pose: &Pose, label: Option<&str>) {
        let (width, height) = frame.dimensions();

        for [a, b] in SKELETON {
            draw_line_segment_mut(
                frame,
                pose.point(a, width, height),
                pose.point(b, width, height),
                SKELETON_COLOR,
            );
        }

        let (head_center, radius) = head_circle(pose, width, height);

        // Neck: shoulder midpoint to head center, in every head branch.
        let (lsx, lsy) = pose.point(LEFT_SHOULDER, width, height);
        let (rsx, rsy) = pose.point(RIGHT_SHOULDER, width, height);
        let shoulder_mid = ((lsx + rsx) / 2.0, (lsy + rsy) / 2.0);
        draw_line_segment_mut(frame, shoulder_mid, head_center, SKELETON_COLOR);

        #[allow(clippy::cast_possible_truncation)]
        draw_hollow_circle_mut(
            frame,
            (head_center.0.round() as i32, head_center.1.round() as i32),
            radius.round() as i32,
            SKELETON_COLOR,
        );

        if let (Some(text), Some(font)) = (label, self.font.as_ref()) {
            #[allow(clippy::cast_possible_truncation)]
            let text_x = ((head_center.0 - 30.0).round() as i32).max(LABEL_MARGIN);
            #[allow(clippy::cast_possible_truncation)]
            let text_y = ((head_center.1 - radius - 10.0).round() as i32).max(LABEL_MARGIN);
            draw_text_mut(
                frame,
                LABEL_COLOR,
                text_x,
                text_y,
                PxScale::from(16.0),
                font,
                text,
            );
        }
    }
}

impl Default for SkeletonRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Head circle approximation from face landmarks.
///
/// Prefers the inter-ear span, then the inter-eye span, then an upward
/// offset from the nose scaled by the shoulder span. The radius floor keeps
/// the circle drawable when the chosen landmark pair is degenerate.
fn head_circle(pose: &Pose, width: u32, height: u32) -> ((f32, f32), f32) {
    let left_ear = pose.landmark(LEFT_EAR);
    let right_ear = pose.landmark(RIGHT_EAR);
    if left_ear.visibility > 0.0 && right_ear.visibility > 0.0 {
        let a = pose.point(LEFT_EAR, width, height);
        let b = pose.point(RIGHT_EAR, width, height);
        return (midpoint(a, b), (0.7 * dist(a, b)).max(MIN_HEAD_RADIUS));
    }

    let left_eye = pose.landmark(LEFT_EYE);
    let right_eye = pose.landmark(RIGHT_EYE);
    if left_eye.visibility > 0.0 && right_eye.visibility > 0.0 {
        let a = pose.point(LEFT_EYE, width, height);
        let b = pose.point(RIGHT_EYE, width, height);
        return (midpoint(a, b), (1.2 * dist(a, b)).max(MIN_HEAD_RADIUS));
    }

    // Fallback: offset upward from the nose by a fraction of the shoulder
    // span. Holds for the all-zero degenerate case via the radius floor.
    let shoulder_span = dist(
        pose.point(LEFT_SHOULDER, width, height),
        pose.point(RIGHT_SHOULDER, width, height),
    );
    let (nx, ny) = pose.point(NOSE, width, height);
    (
        (nx, ny - 0.4 * shoulder_span),
        (0.35 * shoulder_span).max(MIN_HEAD_RADIUS),
    )
}

const fn midpoint(a: (f32, f32), b: (f32, f32)) -> (f32, f32) {
    ((a.0 + b.0) / 2.0, (a.1 + b.1) / 2.0)
}

fn dist(a: (f32, f32), b: (f32, f32)) -> f32 {
    (a.0 - b.0).hypot(a.1 - b.1)
}

/// Check if the label font exists locally or download it.
fn check_font(font: &str) -> Option<PathBuf> {
    let font_name = Path::new(font).file_name()?.to_string_lossy();
    let config_dir = dirs::config_dir()?.join("pose-annotator");
    let font_path = config_dir.join(font_name.as_ref());

    if font_path.exists() {
        return Some(font_path);
    }

    if let Err(e) = fs::create_dir_all(&config_dir) {
        eprintln!("Failed to create config directory: {e}");
        return None;
    }

    let url = format!("{ASSETS_URL}/{font_name}");
    match ureq::get(&url).call() {
        Ok(response) => {
            let mut file = match File::create(&font_path) {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("Failed to create font file: {e}");
                    return None;
                }
            };

            let mut reader = response.into_body().into_reader();
            if let Err(e) = io::copy(&mut reader, &mut file) {
                eprintln!("Failed to download font: {e}");
                let _ = fs::remove_file(&font_path);
                return None;
            }

            Some(font_path)
        }
        Err(e) => {
            eprintln!("Failed to download font from {url}: {e}");
            None
        }
    }
}

fn load_label_font() -> Option<FontVec> {
    let path = check_font(LABEL_FONT)?;
    let mut buffer = Vec::new();
    File::open(path).ok()?.read_to_end(&mut buffer).ok()?;
    FontVec::try_from_vec(buffer).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::{Landmark, NUM_LANDMARKS};

    fn renderer_without_font() -> SkeletonRenderer {
        SkeletonRenderer { font: None }
    }

    fn visible(x: f32, y: f32) -> Landmark {
        Landmark::new(x, y, 1.0, 1.0)
    }

    #[test]
    fn test_head_circle_prefers_ears() {
        let mut landmarks = [Landmark::default(); NUM_LANDMARKS];
        landmarks[LEFT_EAR] = visible(0.4, 0.2);
        landmarks[RIGHT_EAR] = visible(0.6, 0.2);
        let pose = Pose::new(landmarks);

        let ((cx, cy), radius) = head_circle(&pose, 100, 100);
        assert!((cx - 50.0).abs() < 1e-4);
        assert!((cy - 20.0).abs() < 1e-4);
        assert!((radius - 14.0).abs() < 1e-4); // 0.7 * 20 px
    }

    #[test]
    fn test_head_circle_falls_back_to_eyes() {
        let mut landmarks = [Landmark::default(); NUM_LANDMARKS];
        landmarks[LEFT_EYE] = visible(0.45, 0.15);
        landmarks[RIGHT_EYE] = visible(0.55, 0.15);
        let pose = Pose::new(landmarks);

        let ((cx, _), radius) = head_circle(&pose, 100, 100);
        assert!((cx - 50.0).abs() < 1e-4);
        assert!((radius - 12.0).abs() < 1e-4); // 1.2 * 10 px
    }

    #[test]
    fn test_head_circle_nose_offset_fallback() {
        let mut landmarks = [Landmark::default(); NUM_LANDMARKS];
        landmarks[NOSE] = visible(0.5, 0.3);
        landmarks[LEFT_SHOULDER] = visible(0.4, 0.5);
        landmarks[RIGHT_SHOULDER] = visible(0.6, 0.5);
        let pose = Pose::new(landmarks);

        let ((cx, cy), radius) = head_circle(&pose, 100, 100);
        assert!((cx - 50.0).abs() < 1e-4);
        assert!((cy - 22.0).abs() < 1e-4); // nose y - 0.4 * 20 px span
        assert!((radius - MIN_HEAD_RADIUS).abs() < 1e-4); // 0.35 * 20 = 7, floored
    }

    #[test]
    fn test_draw_tolerates_all_zero_pose() {
        let renderer = renderer_without_font();
        let mut frame = RgbImage::new(64, 64);
        // Degenerate case: every landmark at the origin with zero visibility.
        renderer.draw(&mut frame, &Pose::default(), Some("Person 1"));
    }

    #[test]
    fn test_draw_mutates_frame() {
        let renderer = renderer_without_font();
        let mut landmarks = [Landmark::default(); NUM_LANDMARKS];
        for lm in &mut landmarks {
            *lm = visible(0.5, 0.5);
        }
        landmarks[LEFT_SHOULDER] = visible(0.3, 0.3);
        landmarks[RIGHT_SHOULDER] = visible(0.7, 0.3);
        let pose = Pose::new(landmarks);

        let mut frame = RgbImage::new(64, 64);
        renderer.draw(&mut frame, &pose, None);
        assert!(frame.pixels().any(|p| *p != Rgb([0, 0, 0])));
    }
}
