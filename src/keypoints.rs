//! Keypoint data model shared by every estimator backend.
//!
//! The classifier, projector, and renderer never see estimator-specific output.
//! Each supported estimator gets one adapter that decodes its raw keypoint layout
//! into a [`KeypointFrame`]; downstream code only consults the frame's
//! [`PoseSchema`] for landmark indices and skeleton edges.

use crate::{
    constants::{BLAZEPOSE_LANDMARK_COUNT, COCO_LANDMARK_COUNT},
    Error, Result,
};
use serde::{Deserialize, Serialize};

/// One estimated anatomical landmark
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keypoint {
    /// Horizontal coordinate in estimator-native units
    pub x: f32,
    /// Vertical coordinate in estimator-native units
    pub y: f32,
    /// Depth channel, when the estimator provides one
    pub z: Option<f32>,
    /// Estimator confidence in [0, 1]
    pub confidence: f32,
}

impl Keypoint {
    /// Whether this keypoint clears the visibility threshold
    #[must_use]
    pub fn is_visible(&self, threshold: f32) -> bool {
        self.confidence > threshold
    }
}

/// Fixed anatomical landmark schema of an estimator backend.
///
/// Landmark indices are schema-defined and never renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoseSchema {
    /// 17-point COCO layout (YOLO-pose style), no depth channel
    #[serde(rename = "coco17")]
    Coco17,
    /// 33-point BlazePose layout (MediaPipe style) with a real z channel
    #[serde(rename = "blazepose33")]
    BlazePose33,
}

// COCO indices: 5/6 shoulders, 11/12 hips.
const COCO_EDGES: [(usize, usize); 12] = [
    (5, 7),
    (7, 9),
    (6, 8),
    (8, 10),
    (11, 13),
    (13, 15),
    (12, 14),
    (14, 16),
    (5, 6),
    (11, 12),
    (5, 11),
    (6, 12),
];

// BlazePose indices: 11/12 shoulders, 23/24 hips.
const BLAZEPOSE_EDGES: [(usize, usize); 35] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 7),
    (0, 4),
    (4, 5),
    (5, 6),
    (6, 8),
    (9, 10),
    (11, 12),
    (11, 13),
    (13, 15),
    (15, 17),
    (15, 19),
    (15, 21),
    (17, 19),
    (12, 14),
    (14, 16),
    (16, 18),
    (16, 20),
    (16, 22),
    (18, 20),
    (11, 23),
    (12, 24),
    (23, 24),
    (23, 25),
    (24, 26),
    (25, 27),
    (26, 28),
    (27, 29),
    (28, 30),
    (29, 31),
    (30, 32),
    (27, 31),
    (28, 32),
];

impl PoseSchema {
    /// Number of landmarks the schema defines
    #[must_use]
    pub const fn landmark_count(self) -> usize {
        match self {
            Self::Coco17 => COCO_LANDMARK_COUNT,
            Self::BlazePose33 => BLAZEPOSE_LANDMARK_COUNT,
        }
    }

    /// Whether the schema carries a real depth channel
    #[must_use]
    pub const fn has_depth(self) -> bool {
        matches!(self, Self::BlazePose33)
    }

    /// Anatomically adjacent landmark pairs for skeleton rendering
    #[must_use]
    pub fn edges(self) -> &'static [(usize, usize)] {
        match self {
            Self::Coco17 => &COCO_EDGES,
            Self::BlazePose33 => &BLAZEPOSE_EDGES,
        }
    }

    /// Indices of left shoulder, right shoulder, left hip, right hip
    #[must_use]
    pub const fn torso_indices(self) -> [usize; 4] {
        match self {
            Self::Coco17 => [5, 6, 11, 12],
            Self::BlazePose33 => [11, 12, 23, 24],
        }
    }
}

/// All keypoints of one tracked person in one frame.
///
/// A frame with zero visible keypoints is valid input everywhere and classifies
/// as "no person".
#[derive(Debug, Clone, PartialEq)]
pub struct KeypointFrame {
    schema: PoseSchema,
    points: Vec<Keypoint>,
}

impl KeypointFrame {
    /// Build a frame from YOLO-pose output: one `[x, y, confidence]` row per
    /// COCO landmark.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] when the row count does not match the
    /// COCO schema.
    pub fn from_coco(keypoints: &[[f32; 3]]) -> Result<Self> {
        if keypoints.len() != COCO_LANDMARK_COUNT {
            return Err(Error::InvalidInput(format!(
                "Expected {} COCO keypoints, got {}",
                COCO_LANDMARK_COUNT,
                keypoints.len()
            )));
        }

        let points = keypoints
            .iter()
            .map(|&[x, y, confidence]| Keypoint {
                x,
                y,
                z: None,
                confidence,
            })
            .collect();

        Ok(Self {
            schema: PoseSchema::Coco17,
            points,
        })
    }

    /// Build a frame from BlazePose output: one `[x, y, z, visibility]` row per
    /// landmark.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] when the row count does not match the
    /// BlazePose schema.
    pub fn from_blazepose(keypoints: &[[f32; 4]]) -> Result<Self> {
        if keypoints.len() != BLAZEPOSE_LANDMARK_COUNT {
            return Err(Error::InvalidInput(format!(
                "Expected {} BlazePose keypoints, got {}",
                BLAZEPOSE_LANDMARK_COUNT,
                keypoints.len()
            )));
        }

        let points = keypoints
            .iter()
            .map(|&[x, y, z, confidence]| Keypoint {
                x,
                y,
                z: Some(z),
                confidence,
            })
            .collect();

        Ok(Self {
            schema: PoseSchema::BlazePose33,
            points,
        })
    }

    /// Schema the frame was decoded with
    #[must_use]
    pub fn schema(&self) -> PoseSchema {
        self.schema
    }

    /// All landmarks, in schema order
    #[must_use]
    pub fn points(&self) -> &[Keypoint] {
        &self.points
    }

    /// Landmarks that clear the visibility threshold
    pub fn visible(&self, threshold: f32) -> impl Iterator<Item = &Keypoint> {
        self.points.iter().filter(move |kp| kp.is_visible(threshold))
    }

    /// Number of landmarks that clear the visibility threshold
    #[must_use]
    pub fn visible_count(&self, threshold: f32) -> usize {
        self.visible(threshold).count()
    }

    /// The four torso landmarks: left shoulder, right shoulder, left hip, right hip.
    ///
    /// Always present since adapters validate the landmark count; visibility is
    /// the caller's concern.
    #[must_use]
    pub fn torso(&self) -> [&Keypoint; 4] {
        let [ls, rs, lh, rh] = self.schema.torso_indices();
        [&self.points[ls], &self.points[rs], &self.points[lh], &self.points[rh]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coco_rows(confidence: f32) -> Vec<[f32; 3]> {
        (0..COCO_LANDMARK_COUNT)
            .map(|i| [i as f32, i as f32 * 2.0, confidence])
            .collect()
    }

    #[test]
    fn test_coco_adapter_roundtrip() {
        let frame = KeypointFrame::from_coco(&coco_rows(0.9)).unwrap();
        assert_eq!(frame.schema(), PoseSchema::Coco17);
        assert_eq!(frame.points().len(), COCO_LANDMARK_COUNT);
        assert_eq!(frame.points()[3].x, 3.0);
        assert_eq!(frame.points()[3].z, None);
    }

    #[test]
    fn test_coco_adapter_rejects_wrong_length() {
        let rows = vec![[0.0, 0.0, 1.0]; 16];
        assert!(KeypointFrame::from_coco(&rows).is_err());
    }

    #[test]
    fn test_blazepose_adapter_carries_depth() {
        let rows = vec![[0.5, 0.5, -0.2, 0.99]; BLAZEPOSE_LANDMARK_COUNT];
        let frame = KeypointFrame::from_blazepose(&rows).unwrap();
        assert_eq!(frame.schema(), PoseSchema::BlazePose33);
        assert_eq!(frame.points()[0].z, Some(-0.2));
    }

    #[test]
    fn test_visibility_threshold_is_strict() {
        let mut rows = coco_rows(0.5);
        rows[0][2] = 0.51;
        let frame = KeypointFrame::from_coco(&rows).unwrap();
        // Exactly 0.5 does not count as visible
        assert_eq!(frame.visible_count(0.5), 1);
    }

    #[test]
    fn test_edges_stay_within_schema() {
        for schema in [PoseSchema::Coco17, PoseSchema::BlazePose33] {
            for &(a, b) in schema.edges() {
                assert!(a < schema.landmark_count());
                assert!(b < schema.landmark_count());
            }
            for idx in schema.torso_indices() {
                assert!(idx < schema.landmark_count());
            }
        }
    }
}
