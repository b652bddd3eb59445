// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Confidence gating for detected poses.
//!
//! A pose is scored over a fixed subset of semantically core landmarks
//! (nose, shoulders, elbows, wrists, hips). Requiring both presence and
//! visibility to be jointly high across the torso/arm skeleton suppresses
//! partial detections as well as occluded ones.

use crate::landmark::{
    LEFT_ELBOW, LEFT_HIP, LEFT_SHOULDER, LEFT_WRIST, NOSE, Pose, RIGHT_ELBOW, RIGHT_HIP,
    RIGHT_SHOULDER, RIGHT_WRIST,
};

/// Landmarks scored by the confidence gate.
pub const CORE_LANDMARKS: [usize; 9] = [
    NOSE,
    LEFT_SHOULDER,
    RIGHT_SHOULDER,
    LEFT_ELBOW,
    RIGHT_ELBOW,
    LEFT_WRIST,
    RIGHT_WRIST,
    LEFT_HIP,
    RIGHT_HIP,
];

/// Minimum pose confidence for a detection to be drawn and tracked.
///
/// Fixed policy constant: biases toward missed people over stick figures
/// drawn on noise or background objects. Not a tunable default.
pub const CONFIDENCE_THRESHOLD: f32 = 0.8;

/// Scalar confidence for a detected pose, in `[0, 1]`.
///
/// The smaller of (mean presence, mean visibility) over the core landmarks.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn confidence(pose: &Pose) -> f32 {
    let mut presence_sum = 0.0;
    let mut visibility_sum = 0.0;
    for &idx in &CORE_LANDMARKS {
        let lm = pose.landmark(idx);
        presence_sum += lm.presence;
        visibility_sum += lm.visibility;
    }

    let n = CORE_LANDMARKS.len() as f32;
    (presence_sum / n).min(visibility_sum / n)
}

/// Whether a detected pose passes the confidence gate.
///
/// The threshold boundary is inclusive: a pose scoring exactly
/// [`CONFIDENCE_THRESHOLD`] is accepted.
#[must_use]
pub fn accept(pose: &Pose) -> bool {
    confidence(pose) >= CONFIDENCE_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::{Landmark, NUM_LANDMARKS};

    fn pose_with_core(presence: f32, visibility: f32) -> Pose {
        let mut landmarks = [Landmark::default(); NUM_LANDMARKS];
        for &idx in &CORE_LANDMARKS {
            landmarks[idx] = Landmark::new(0.5, 0.5, presence, visibility);
        }
        Pose::new(landmarks)
    }

    #[test]
    fn test_confidence_is_min_of_means() {
        let pose = pose_with_core(1.0, 0.6);
        assert!((confidence(&pose) - 0.6).abs() < 1e-6);

        let pose = pose_with_core(0.4, 0.9);
        assert!((confidence(&pose) - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_threshold_boundary_inclusive() {
        assert!(accept(&pose_with_core(0.8, 0.8)));
        assert!(accept(&pose_with_core(1.0, 0.8)));
        assert!(!accept(&pose_with_core(0.79, 1.0)));
    }

    #[test]
    fn test_single_weak_core_landmark_drags_mean() {
        let mut landmarks = [Landmark::default(); NUM_LANDMARKS];
        for &idx in &CORE_LANDMARKS {
            landmarks[idx] = Landmark::new(0.5, 0.5, 1.0, 1.0);
        }
        // One occluded wrist: visibility mean drops to 8.1/9 = 0.9.
        landmarks[LEFT_WRIST].visibility = 0.1;
        let pose = Pose::new(landmarks);

        assert!((confidence(&pose) - 0.9).abs() < 1e-6);
        assert!(accept(&pose));
    }

    #[test]
    fn test_all_zero_pose_rejected() {
        assert!(!accept(&Pose::default()));
    }
}
