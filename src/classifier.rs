//! Posture classification from a single keypoint frame.
//!
//! Three binary indicators vote on a lying posture: silhouette aspect ratio,
//! torso tilt, and depth spread. The verdict is the configured majority over
//! those votes; no state is carried between frames.

use crate::{config::ClassifierConfig, keypoints::KeypointFrame};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Posture verdict for one person in one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostureVerdict {
    /// No visible keypoints
    NoPerson,
    /// Standing or sitting
    Ok,
    /// Lying or collapsed
    NotOk,
}

impl fmt::Display for PostureVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPerson => write!(f, "No Person Detected"),
            Self::Ok => write!(f, "Person OK"),
            Self::NotOk => write!(f, "Person NOT OK"),
        }
    }
}

/// Which channel feeds the depth-spread vote.
///
/// An explicit configuration choice; the classifier never falls back from one
/// source to the other on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthSource {
    /// Use the vertical coordinate as a depth stand-in (pixel-space estimators)
    YProxy,
    /// Use the estimator's real z channel (normalized units)
    TrueZ,
}

/// Verdicts of every person observed in one frame.
///
/// Only the presence of a NOT OK verdict matters for alerting; order and
/// multiplicity are irrelevant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SceneState {
    verdicts: Vec<PostureVerdict>,
}

impl SceneState {
    /// Aggregate per-person verdicts
    #[must_use]
    pub fn from_verdicts(verdicts: &[PostureVerdict]) -> Self {
        Self {
            verdicts: verdicts.to_vec(),
        }
    }

    /// Whether any person in the frame is NOT OK
    #[must_use]
    pub fn any_not_ok(&self) -> bool {
        self.verdicts.contains(&PostureVerdict::NotOk)
    }

    /// Whether the frame held no classifiable person at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.verdicts
            .iter()
            .all(|v| *v == PostureVerdict::NoPerson)
    }

    /// Per-person verdicts in observation order
    #[must_use]
    pub fn verdicts(&self) -> &[PostureVerdict] {
        &self.verdicts
    }
}

impl fmt::Display for SceneState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "No Person Detected");
        }
        let labels: Vec<String> = self
            .verdicts
            .iter()
            .filter(|v| **v != PostureVerdict::NoPerson)
            .map(ToString::to_string)
            .collect();
        write!(f, "{}", labels.join(" | "))
    }
}

/// Stateless posture classifier
#[derive(Debug, Clone)]
pub struct PostureClassifier {
    visibility_threshold: f32,
    tilt_threshold_degrees: f32,
    depth_source: DepthSource,
    depth_threshold: f32,
    vote_majority: u8,
}

impl PostureClassifier {
    /// Create a classifier from configuration
    #[must_use]
    pub fn new(config: &ClassifierConfig) -> Self {
        Self {
            visibility_threshold: config.visibility_threshold,
            tilt_threshold_degrees: config.tilt_threshold_degrees,
            depth_source: config.depth_source,
            depth_threshold: config.depth_threshold,
            vote_majority: config.vote_majority,
        }
    }

    /// Classify one person's posture.
    ///
    /// Pure and total: identical input yields identical output, missing
    /// landmarks degrade to the conservative branch, and no well-formed frame
    /// can fail.
    #[must_use]
    pub fn classify(&self, frame: &KeypointFrame) -> PostureVerdict {
        let visible: Vec<_> = frame.visible(self.visibility_threshold).collect();
        if visible.is_empty() {
            return PostureVerdict::NoPerson;
        }

        let (min_x, max_x) = min_max(visible.iter().map(|kp| kp.x));
        let (min_y, max_y) = min_max(visible.iter().map(|kp| kp.y));
        let box_width = max_x - min_x;
        let box_height = max_y - min_y;

        let angle = self.torso_tilt_degrees(frame);
        let depth_spread = self.depth_spread(frame);

        let mut votes = 0u8;
        if box_width > box_height {
            votes += 1;
        }
        if angle > self.tilt_threshold_degrees {
            votes += 1;
        }
        if let Some(spread) = depth_spread {
            if spread < self.depth_threshold {
                votes += 1;
            }
        }

        log::debug!(
            "posture votes: {votes} (box {box_width:.1}x{box_height:.1}, tilt {angle:.1} deg, depth spread {depth_spread:?})"
        );

        if votes >= self.vote_majority {
            PostureVerdict::NotOk
        } else {
            PostureVerdict::Ok
        }
    }

    /// Torso tilt from vertical, folded into [0, 90] degrees.
    ///
    /// When any of the four torso landmarks is invisible the tilt is 0: a
    /// conservative "upright" default, not a measurement.
    fn torso_tilt_degrees(&self, frame: &KeypointFrame) -> f32 {
        let [ls, rs, lh, rh] = frame.torso();
        let all_visible = [ls, rs, lh, rh]
            .iter()
            .all(|kp| kp.is_visible(self.visibility_threshold));
        if !all_visible {
            return 0.0;
        }

        let torso_x = (lh.x + rh.x) / 2.0 - (ls.x + rs.x) / 2.0;
        let torso_y = (lh.y + rh.y) / 2.0 - (ls.y + rs.y) / 2.0;

        let mut angle = torso_x.atan2(torso_y).to_degrees().abs();
        if angle > 90.0 {
            angle = 180.0 - angle;
        }
        angle
    }

    /// Dispersion of the configured depth channel over visible keypoints.
    ///
    /// Returns `None` when the configured source yields no samples (a true-z
    /// configuration over a depthless schema); the depth vote then abstains.
    fn depth_spread(&self, frame: &KeypointFrame) -> Option<f32> {
        let values: Vec<f32> = match self.depth_source {
            DepthSource::YProxy => frame
                .visible(self.visibility_threshold)
                .map(|kp| kp.y)
                .collect(),
            DepthSource::TrueZ => frame
                .visible(self.visibility_threshold)
                .filter_map(|kp| kp.z)
                .collect(),
        };

        if values.is_empty() {
            return None;
        }
        Some(population_std_dev(&values))
    }
}

/// Population standard deviation of a sample window
fn population_std_dev(values: &[f32]) -> f32 {
    let n = values.len() as f32;
    let mean = values.iter().sum::<f32>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f32>() / n;
    variance.sqrt()
}

fn min_max(values: impl Iterator<Item = f32>) -> (f32, f32) {
    values.fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}
