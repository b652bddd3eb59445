// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Frame-to-frame identity tracking by centroid.
//!
//! Greedy nearest-neighbor matching between active tracks and current-frame
//! detections. Deliberately not a globally optimal assignment: ties and
//! near-ties resolve by iteration order over existing tracks (creation
//! order), which is the canonical tie-break for reproducibility. Swapping in
//! a bipartite matcher would change which identity survives in crossing
//! scenarios and is a behavioral change, not a fix.

/// Default number of frames a track may go unmatched before it is removed.
pub const DEFAULT_MAX_AGE: u64 = 25;

/// Floor for the matching distance threshold, in pixels.
const MIN_DIST_THRESH: f32 = 40.0;

/// Identity state for one tracked person.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Track {
    /// Unique track id, strictly increasing within a job, never reused.
    pub id: u64,
    /// Last-known centroid in pixel space.
    pub centroid: (f32, f32),
    /// Index of the last frame in which this track was matched.
    pub last_seen: u64,
}

/// Multi-object tracker scoped to a single video job.
///
/// Owns its track set exclusively; construct one per job and discard it
/// afterward. Never a process-wide singleton.
#[derive(Debug)]
pub struct IdentityTracker {
    tracks: Vec<Track>,
    next_id: u64,
    dist_thresh: f32,
    max_age: u64,
}

impl IdentityTracker {
    /// Create a tracker with an explicit matching distance threshold.
    #[must_use]
    pub const fn new(dist_thresh: f32, max_age: u64) -> Self {
        Self {
            tracks: Vec::new(),
            next_id: 1,
            dist_thresh,
            max_age,
        }
    }

    /// Create a tracker with the default threshold for a frame size.
    #[must_use]
    pub fn for_frame_size(width: u32, height: u32, max_age: u64) -> Self {
        Self::new(Self::default_dist_thresh(width, height), max_age)
    }

    /// Default matching distance threshold for a frame size:
    /// `max(40, 0.05 * max(width, height))` pixels.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn default_dist_thresh(width: u32, height: u32) -> f32 {
        (0.05 * width.max(height) as f32).max(MIN_DIST_THRESH)
    }

    /// Assign identities to the current frame's detection centroids.
    ///
    /// Returns one track id per input detection, in the caller's detection
    /// order. Cannot fail: every detection either claims an existing track
    /// or mints a fresh id; empty input ages out all active tracks.
    ///
    /// # Arguments
    ///
    /// * `detections` - Confidence-accepted pose centroids in pixel space.
    /// * `frame_index` - Monotonically increasing frame counter for the job.
    pub fn update(&mut self, detections: &[(f32, f32)], frame_index: u64) -> Vec<u64> {
        let mut assigned: Vec<Option<u64>> = vec![None; detections.len()];

        // Existing tracks claim their nearest unclaimed detection, in
        // creation order. Strictly below the threshold; at-threshold
        // detections spawn new identities instead.
        for track in &mut self.tracks {
            let mut best: Option<(usize, f32)> = None;
            for (j, &centroid) in detections.iter().enumerate() {
                if assigned[j].is_some() {
                    continue;
                }
                let d = dist(track.centroid, centroid);
                if d < self.dist_thresh && best.is_none_or(|(_, best_d)| d < best_d) {
                    best = Some((j, d));
                }
            }

            if let Some((j, _)) = best {
                track.centroid = detections[j];
                track.last_seen = frame_index;
                assigned[j] = Some(track.id);
            }
        }

        // Unclaimed detections become brand-new identities, appended after
        // the existing tracks so creation order stays the tie-break order.
        for (j, &centroid) in detections.iter().enumerate() {
            if assigned[j].is_none() {
                let id = self.next_id;
                self.next_id += 1;
                self.tracks.push(Track {
                    id,
                    centroid,
                    last_seen: frame_index,
                });
                assigned[j] = Some(id);
            }
        }

        // Expire tracks unmatched for more than max_age frames. Expired ids
        // are never reused.
        self.tracks
            .retain(|t| frame_index - t.last_seen <= self.max_age);

        debug_assert!(assigned.iter().all(Option::is_some));
        assigned.into_iter().flatten().collect()
    }

    /// Currently active tracks, in creation order.
    #[must_use]
    pub fn active_tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Total number of identities created over the tracker's lifetime.
    #[must_use]
    pub const fn tracks_created(&self) -> u64 {
        self.next_id - 1
    }

    /// The matching distance threshold in use, in pixels.
    #[must_use]
    pub const fn dist_thresh(&self) -> f32 {
        self.dist_thresh
    }
}

fn dist(a: (f32, f32), b: (f32, f32)) -> f32 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    dx.hypot(dy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dist_thresh() {
        // 5% of the larger dimension, floored at 40 px.
        assert!((IdentityTracker::default_dist_thresh(1920, 1080) - 96.0).abs() < 1e-4);
        assert!((IdentityTracker::default_dist_thresh(640, 480) - 40.0).abs() < 1e-4);
    }

    #[test]
    fn test_new_detections_mint_increasing_ids() {
        let mut tracker = IdentityTracker::new(50.0, DEFAULT_MAX_AGE);
        let ids = tracker.update(&[(100.0, 100.0), (500.0, 500.0)], 0);
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(tracker.tracks_created(), 2);
    }

    #[test]
    fn test_two_object_identity_persistence() {
        let mut tracker = IdentityTracker::new(50.0, DEFAULT_MAX_AGE);
        let first = tracker.update(&[(100.0, 100.0), (500.0, 500.0)], 0);
        let second = tracker.update(&[(110.0, 105.0), (505.0, 510.0)], 1);
        assert_eq!(first, vec![1, 2]);
        assert_eq!(second, vec![1, 2]);
    }

    #[test]
    fn test_update_is_order_preserving() {
        let mut tracker = IdentityTracker::new(50.0, DEFAULT_MAX_AGE);
        tracker.update(&[(100.0, 100.0), (500.0, 500.0)], 0);
        // Caller order flipped: identities must follow the detections.
        let ids = tracker.update(&[(505.0, 510.0), (110.0, 105.0)], 1);
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_threshold_is_strict() {
        let mut tracker = IdentityTracker::new(20.0, DEFAULT_MAX_AGE);
        tracker.update(&[(100.0, 100.0)], 0);
        // Exactly at the threshold: not a match, new identity.
        let ids = tracker.update(&[(120.0, 100.0)], 1);
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_greedy_claims_nearest_in_creation_order() {
        let mut tracker = IdentityTracker::new(100.0, DEFAULT_MAX_AGE);
        tracker.update(&[(0.0, 0.0), (60.0, 0.0)], 0);
        // Both tracks are within range of detection (30, 0); track 1 claims
        // it first, leaving track 2 the farther detection.
        let ids = tracker.update(&[(30.0, 0.0), (90.0, 0.0)], 1);
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_stale_track_expires_and_id_is_not_reused() {
        let mut tracker = IdentityTracker::new(50.0, 3);
        tracker.update(&[(100.0, 100.0)], 0);

        // Age out over empty frames; the track survives through age == max_age.
        for frame in 1..=3 {
            assert!(tracker.update(&[], frame).is_empty());
            assert_eq!(tracker.active_tracks().len(), 1);
        }
        tracker.update(&[], 4);
        assert!(tracker.active_tracks().is_empty());

        // A detection at the old location gets a fresh, larger id.
        let ids = tracker.update(&[(100.0, 100.0)], 5);
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_empty_input_yields_empty_result() {
        let mut tracker = IdentityTracker::new(50.0, DEFAULT_MAX_AGE);
        assert!(tracker.update(&[], 0).is_empty());
    }
}
