//! Coordinate normalization onto the stick-figure canvas.

use crate::constants::PROJECTION_EPSILON;
use serde::{Deserialize, Serialize};

/// Uniform scale and translation mapping estimator coordinates into the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Uniform scale factor
    pub scale: f32,
    /// Horizontal translation, canvas units
    pub offset_x: f32,
    /// Vertical translation, canvas units
    pub offset_y: f32,
}

impl Projection {
    /// Map one estimator-space point into canvas space
    #[must_use]
    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (x * self.scale + self.offset_x, y * self.scale + self.offset_y)
    }
}

/// Bounding-box policy when a frame holds several persons.
///
/// The two modes never mix within one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionMode {
    /// One bounding box across every person, preserving relative scale
    Shared,
    /// Each person scaled to fill the canvas on their own
    PerPerson,
}

/// Computes scale/offset transforms that center a point set in the canvas
#[derive(Debug, Clone)]
pub struct CanvasProjector {
    canvas_size: f32,
    margin_fraction: f32,
}

impl CanvasProjector {
    /// Create a projector for a square canvas of the given side length
    #[must_use]
    pub fn new(canvas_size: u32, margin_fraction: f32) -> Self {
        Self {
            canvas_size: canvas_size as f32,
            margin_fraction,
        }
    }

    /// Derive the transform placing the points' bounding box centered in the
    /// canvas at `margin_fraction` of its side length.
    ///
    /// Total over any input: a degenerate (collinear or single-point) box is
    /// guarded by an epsilon, and an empty point set maps to the identity-like
    /// transform centered on the canvas.
    #[must_use]
    pub fn compute(&self, points: &[(f32, f32)]) -> Projection {
        if points.is_empty() {
            return Projection {
                scale: 1.0,
                offset_x: self.canvas_size / 2.0,
                offset_y: self.canvas_size / 2.0,
            };
        }

        let (mut min_x, mut max_x) = (f32::INFINITY, f32::NEG_INFINITY);
        let (mut min_y, mut max_y) = (f32::INFINITY, f32::NEG_INFINITY);
        for &(x, y) in points {
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }

        let box_width = max_x - min_x;
        let box_height = max_y - min_y;

        let scale =
            self.margin_fraction * self.canvas_size / box_width.max(box_height).max(PROJECTION_EPSILON);
        let offset_x = (self.canvas_size - scale * (min_x + max_x)) / 2.0;
        let offset_y = (self.canvas_size - scale * (min_y + max_y)) / 2.0;

        Projection {
            scale,
            offset_x,
            offset_y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constrained_axis_fills_margin() {
        let projector = CanvasProjector::new(512, 0.8);
        let points = [(0.0, 0.0), (10.0, 5.0)];
        let projection = projector.compute(&points);

        let (x0, _) = projection.apply(0.0, 0.0);
        let (x1, _) = projection.apply(10.0, 5.0);
        // Width is the constrained axis: its mapped extent is exactly 0.8 * 512
        assert!((x1 - x0 - 0.8 * 512.0).abs() < 1e-3);
    }

    #[test]
    fn test_mapped_box_is_centered() {
        let projector = CanvasProjector::new(512, 0.8);
        let points = [(3.0, 7.0), (13.0, 12.0)];
        let projection = projector.compute(&points);

        let (x0, y0) = projection.apply(3.0, 7.0);
        let (x1, y1) = projection.apply(13.0, 12.0);
        assert!(((x0 + x1) / 2.0 - 256.0).abs() < 1e-3);
        assert!(((y0 + y1) / 2.0 - 256.0).abs() < 1e-3);
    }

    #[test]
    fn test_degenerate_box_stays_finite() {
        let projector = CanvasProjector::new(512, 0.8);

        // All points on one vertical line
        let collinear = [(4.0, 0.0), (4.0, 10.0)];
        let projection = projector.compute(&collinear);
        assert!(projection.scale.is_finite());
        let (x, _) = projection.apply(4.0, 5.0);
        assert!((x - 256.0).abs() < 1e-3);

        // Single point
        let single = [(2.0, 2.0)];
        let projection = projector.compute(&single);
        assert!(projection.scale.is_finite());
        assert!(projection.offset_x.is_finite());
        assert!(projection.offset_y.is_finite());
    }

    #[test]
    fn test_empty_point_set() {
        let projector = CanvasProjector::new(512, 0.8);
        let projection = projector.compute(&[]);
        assert!(projection.scale.is_finite());
        assert_eq!(projection.apply(0.0, 0.0), (256.0, 256.0));
    }
}
