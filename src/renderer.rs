//! Stick-figure rendering as backend-agnostic draw primitives.
//!
//! The output is built purely from keypoint geometry and the classifier's
//! verdict; no pixel data from the source image ever enters it, so nothing in
//! the render can reconstruct the source frame.

use crate::{
    classifier::PostureVerdict,
    constants::FALLBACK_LABEL_ANCHOR,
    keypoints::KeypointFrame,
    projection::Projection,
};

/// Color role of a draw primitive, resolved to real colors by the paint backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawColor {
    /// A person in an OK posture
    Ok,
    /// A person in a NOT OK posture
    Alert,
    /// Informational text
    Neutral,
}

impl DrawColor {
    /// Label color for a verdict
    #[must_use]
    pub fn for_verdict(verdict: PostureVerdict) -> Self {
        match verdict {
            PostureVerdict::NotOk => Self::Alert,
            PostureVerdict::Ok => Self::Ok,
            PostureVerdict::NoPerson => Self::Neutral,
        }
    }
}

/// One instruction for an external drawing surface, in canvas coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum DrawPrimitive {
    /// A joint marker
    Point { x: f32, y: f32 },
    /// A bone between two visible joints
    Line { x1: f32, y1: f32, x2: f32, y2: f32 },
    /// A text label anchored near the torso
    Label {
        x: f32,
        y: f32,
        text: String,
        color: DrawColor,
    },
}

/// Emits draw primitives for one person's skeleton
#[derive(Debug, Clone)]
pub struct SkeletonRenderer {
    visibility_threshold: f32,
}

impl SkeletonRenderer {
    /// Create a renderer using the shared visibility threshold
    #[must_use]
    pub fn new(visibility_threshold: f32) -> Self {
        Self { visibility_threshold }
    }

    /// Render one person: a point per visible joint, a line per skeleton edge
    /// with both endpoints visible, and a verdict label at the torso centroid
    /// (or the fixed fallback anchor when the torso is not fully visible).
    #[must_use]
    pub fn render(
        &self,
        frame: &KeypointFrame,
        projection: &Projection,
        verdict: PostureVerdict,
    ) -> Vec<DrawPrimitive> {
        let mut primitives = Vec::new();
        let points = frame.points();

        for &(a, b) in frame.schema().edges() {
            let (start, end) = (&points[a], &points[b]);
            if start.is_visible(self.visibility_threshold) && end.is_visible(self.visibility_threshold) {
                let (x1, y1) = projection.apply(start.x, start.y);
                let (x2, y2) = projection.apply(end.x, end.y);
                primitives.push(DrawPrimitive::Line { x1, y1, x2, y2 });
            }
        }

        for kp in frame.visible(self.visibility_threshold) {
            let (x, y) = projection.apply(kp.x, kp.y);
            primitives.push(DrawPrimitive::Point { x, y });
        }

        let (label_x, label_y) = self.label_anchor(frame, projection);
        primitives.push(DrawPrimitive::Label {
            x: label_x,
            y: label_y,
            text: verdict.to_string(),
            color: DrawColor::for_verdict(verdict),
        });

        primitives
    }

    /// Projected centroid of the four torso landmarks, when all are visible
    fn label_anchor(&self, frame: &KeypointFrame, projection: &Projection) -> (f32, f32) {
        let torso = frame.torso();
        if torso.iter().all(|kp| kp.is_visible(self.visibility_threshold)) {
            let cx = torso.iter().map(|kp| kp.x).sum::<f32>() / 4.0;
            let cy = torso.iter().map(|kp| kp.y).sum::<f32>() / 4.0;
            let (x, y) = projection.apply(cx, cy);
            // Lift the text just above the centroid
            (x, y - 10.0)
        } else {
            FALLBACK_LABEL_ANCHOR
        }
    }
}
