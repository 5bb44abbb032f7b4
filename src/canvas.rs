//! Rasterization of draw primitives onto an `OpenCV` canvas.
//!
//! This is the downstream half of the visual boundary: it consumes primitives
//! only, never the source video frame.

use crate::{
    renderer::{DrawColor, DrawPrimitive},
    Result,
};
use opencv::{
    core::{Mat, Point, Scalar, CV_8UC3},
    imgproc::{self, FONT_HERSHEY_SIMPLEX, LINE_8},
    prelude::*,
};

const JOINT_RADIUS: i32 = 3;
const BONE_THICKNESS: i32 = 2;
const LABEL_SCALE: f64 = 0.6;
const LABEL_THICKNESS: i32 = 2;

fn joint_color() -> Scalar {
    // BGR red
    Scalar::new(0.0, 0.0, 255.0, 0.0)
}

fn bone_color() -> Scalar {
    // BGR green
    Scalar::new(0.0, 255.0, 0.0, 0.0)
}

fn label_color(color: DrawColor) -> Scalar {
    match color {
        DrawColor::Ok => Scalar::new(0.0, 255.0, 0.0, 0.0),
        DrawColor::Alert => Scalar::new(0.0, 0.0, 255.0, 0.0),
        DrawColor::Neutral => Scalar::new(0.0, 0.0, 0.0, 0.0),
    }
}

/// Paints primitives onto a fresh white square canvas
pub struct CanvasPainter {
    size: i32,
}

impl CanvasPainter {
    /// Create a painter for a square canvas of the given side length
    #[must_use]
    pub fn new(size: u32) -> Self {
        Self {
            size: i32::try_from(size).unwrap_or(i32::MAX),
        }
    }

    /// Rasterize one frame's primitives
    ///
    /// # Errors
    ///
    /// Returns an error when an `OpenCV` drawing operation fails
    pub fn paint(&self, primitives: &[DrawPrimitive]) -> Result<Mat> {
        let mut canvas = Mat::new_rows_cols_with_default(
            self.size,
            self.size,
            CV_8UC3,
            Scalar::new(255.0, 255.0, 255.0, 0.0),
        )?;

        // Bones under joints, joints under labels
        for primitive in primitives {
            if let DrawPrimitive::Line { x1, y1, x2, y2 } = primitive {
                imgproc::line(
                    &mut canvas,
                    self.to_pixel(*x1, *y1),
                    self.to_pixel(*x2, *y2),
                    bone_color(),
                    BONE_THICKNESS,
                    LINE_8,
                    0,
                )?;
            }
        }

        for primitive in primitives {
            if let DrawPrimitive::Point { x, y } = primitive {
                imgproc::circle(
                    &mut canvas,
                    self.to_pixel(*x, *y),
                    JOINT_RADIUS,
                    joint_color(),
                    -1,
                    LINE_8,
                    0,
                )?;
            }
        }

        for primitive in primitives {
            if let DrawPrimitive::Label { x, y, text, color } = primitive {
                imgproc::put_text(
                    &mut canvas,
                    text,
                    self.to_pixel(*x, *y),
                    FONT_HERSHEY_SIMPLEX,
                    LABEL_SCALE,
                    label_color(*color),
                    LABEL_THICKNESS,
                    LINE_8,
                    false,
                )?;
            }
        }

        Ok(canvas)
    }

    fn to_pixel(&self, x: f32, y: f32) -> Point {
        Point::new(clamp_coord(x, self.size), clamp_coord(y, self.size))
    }
}

/// Clamp a canvas coordinate into [0, size - 1]; non-finite values land at 0
fn clamp_coord(value: f32, size: i32) -> i32 {
    if !value.is_finite() {
        return 0;
    }
    (value as i32).clamp(0, size - 1)
}
