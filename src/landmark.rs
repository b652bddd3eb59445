// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Pose landmark data model.
//!
//! A detected pose is a fixed-length sequence of exactly 33 body landmarks
//! whose index semantics are set by the external detector's contract and are
//! never reordered. Landmark coordinates are normalized to `[0, 1]` relative
//! to the frame dimensions; each landmark additionally carries two independent
//! per-point confidence signals supplied by the detector (`presence` and
//! `visibility`).

/// Number of landmarks in a full pose.
pub const NUM_LANDMARKS: usize = 33;

// Landmark indices (detector contract, fixed).
pub const NOSE: usize = 0;
pub const LEFT_EYE: usize = 2;
pub const RIGHT_EYE: usize = 5;
pub const LEFT_EAR: usize = 7;
pub const RIGHT_EAR: usize = 8;
pub const LEFT_SHOULDER: usize = 11;
pub const RIGHT_SHOULDER: usize = 12;
pub const LEFT_ELBOW: usize = 13;
pub const RIGHT_ELBOW: usize = 14;
pub const LEFT_WRIST: usize = 15;
pub const RIGHT_WRIST: usize = 16;
pub const LEFT_HIP: usize = 23;
pub const RIGHT_HIP: usize = 24;
pub const LEFT_KNEE: usize = 25;
pub const RIGHT_KNEE: usize = 26;
pub const LEFT_ANKLE: usize = 27;
pub const RIGHT_ANKLE: usize = 28;
pub const LEFT_HEEL: usize = 29;
pub const RIGHT_HEEL: usize = 30;
pub const LEFT_FOOT_INDEX: usize = 31;
pub const RIGHT_FOOT_INDEX: usize = 32;

/// Skeleton structure (pairs of landmark indices).
///
/// Defines which landmarks connect to form the stick figure: torso, arms,
/// legs, and foot hints. The set and order are part of the visual contract.
pub const SKELETON: [[usize; 2]; 16] = [
    [LEFT_SHOULDER, RIGHT_SHOULDER],
    [LEFT_HIP, RIGHT_HIP],
    [LEFT_SHOULDER, LEFT_HIP],
    [RIGHT_SHOULDER, RIGHT_HIP],
    [LEFT_SHOULDER, LEFT_ELBOW],
    [LEFT_ELBOW, LEFT_WRIST],
    [RIGHT_SHOULDER, RIGHT_ELBOW],
    [RIGHT_ELBOW, RIGHT_WRIST],
    [LEFT_HIP, LEFT_KNEE],
    [LEFT_KNEE, LEFT_ANKLE],
    [RIGHT_HIP, RIGHT_KNEE],
    [RIGHT_KNEE, RIGHT_ANKLE],
    [LEFT_ANKLE, LEFT_HEEL],
    [LEFT_HEEL, LEFT_FOOT_INDEX],
    [RIGHT_ANKLE, RIGHT_HEEL],
    [RIGHT_HEEL, RIGHT_FOOT_INDEX],
];

/// A single body keypoint.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Landmark {
    /// Normalized x position in `[0, 1]` relative to frame width.
    pub x: f32,
    /// Normalized y position in `[0, 1]` relative to frame height.
    pub y: f32,
    /// Likelihood that this keypoint belongs to a detected body at all.
    pub presence: f32,
    /// Likelihood that this keypoint is unoccluded in this frame.
    pub visibility: f32,
}

impl Landmark {
    /// Create a new landmark.
    #[must_use]
    pub const fn new(x: f32, y: f32, presence: f32, visibility: f32) -> Self {
        Self {
            x,
            y,
            presence,
            visibility,
        }
    }
}

/// One detected person's full set of 33 body landmarks in one frame.
///
/// Only meaningful as a full sequence from a single detection call.
#[derive(Debug, Clone)]
pub struct Pose {
    landmarks: [Landmark; NUM_LANDMARKS],
}

impl Pose {
    /// Create a pose from a full landmark array.
    #[must_use]
    pub const fn new(landmarks: [Landmark; NUM_LANDMARKS]) -> Self {
        Self { landmarks }
    }

    /// Get a landmark by index.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= NUM_LANDMARKS`. Indices come from the fixed schema
    /// constants in this module, so in-range access is structural.
    #[must_use]
    pub const fn landmark(&self, idx: usize) -> &Landmark {
        &self.landmarks[idx]
    }

    /// All 33 landmarks in schema order.
    #[must_use]
    pub const fn landmarks(&self) -> &[Landmark; NUM_LANDMARKS] {
        &self.landmarks
    }

    /// Landmark position in pixel space for the given frame dimensions.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn point(&self, idx: usize, width: u32, height: u32) -> (f32, f32) {
        let lm = &self.landmarks[idx];
        (lm.x * width as f32, lm.y * height as f32)
    }

    /// Tracking centroid in pixel space.
    ///
    /// The midpoint of (shoulder-midpoint, hip-midpoint); a torso-centered
    /// anchor that is stable against limb motion.
    #[must_use]
    pub const fn centroid(&self, width: u32, height: u32) -> (f32, f32) {
        let (lsx, lsy) = self.point(LEFT_SHOULDER, width, height);
        let (rsx, rsy) = self.point(RIGHT_SHOULDER, width, height);
        let (lhx, lhy) = self.point(LEFT_HIP, width, height);
        let (rhx, rhy) = self.point(RIGHT_HIP, width, height);

        let shoulder_mid = ((lsx + rsx) / 2.0, (lsy + rsy) / 2.0);
        let hip_mid = ((lhx + rhx) / 2.0, (lhy + rhy) / 2.0);

        (
            (shoulder_mid.0 + hip_mid.0) / 2.0,
            (shoulder_mid.1 + hip_mid.1) / 2.0,
        )
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            landmarks: [Landmark::default(); NUM_LANDMARKS],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skeleton_segment_count() {
        assert_eq!(SKELETON.len(), 16);
        for [a, b] in SKELETON {
            assert!(a < NUM_LANDMARKS);
            assert!(b < NUM_LANDMARKS);
        }
    }

    #[test]
    fn test_point_scales_to_pixels() {
        let mut landmarks = [Landmark::default(); NUM_LANDMARKS];
        landmarks[NOSE] = Landmark::new(0.5, 0.25, 1.0, 1.0);
        let pose = Pose::new(landmarks);

        assert_eq!(pose.point(NOSE, 640, 480), (320.0, 120.0));
    }

    #[test]
    fn test_centroid_is_torso_midpoint() {
        let mut landmarks = [Landmark::default(); NUM_LANDMARKS];
        landmarks[LEFT_SHOULDER] = Landmark::new(0.4, 0.2, 1.0, 1.0);
        landmarks[RIGHT_SHOULDER] = Landmark::new(0.6, 0.2, 1.0, 1.0);
        landmarks[LEFT_HIP] = Landmark::new(0.4, 0.6, 1.0, 1.0);
        landmarks[RIGHT_HIP] = Landmark::new(0.6, 0.6, 1.0, 1.0);
        let pose = Pose::new(landmarks);

        let (cx, cy) = pose.centroid(100, 100);
        assert!((cx - 50.0).abs() < 1e-4);
        assert!((cy - 40.0).abs() < 1e-4);
    }
}
