//! Constants used throughout the application

/// Minimum confidence for a keypoint to be used in any computation
pub const DEFAULT_VISIBILITY_THRESHOLD: f32 = 0.5;

/// Side length of the square stick-figure canvas
pub const DEFAULT_CANVAS_SIZE: u32 = 512;

/// Fraction of the canvas the projected bounding box fills
pub const DEFAULT_MARGIN_FRACTION: f32 = 0.8;

/// Torso tilt (degrees from vertical) above which a person counts as lying
pub const DEFAULT_TILT_THRESHOLD_DEGREES: f32 = 30.0;

/// Number of abnormal-posture votes required for a NOT OK verdict
pub const DEFAULT_VOTE_MAJORITY: u8 = 2;

/// Depth-spread threshold when the vertical coordinate stands in for depth (pixel units)
pub const PIXEL_DEPTH_SPREAD_THRESHOLD: f32 = 20.0;

/// Depth-spread threshold for a normalized [0, 1] depth channel
pub const NORMALIZED_DEPTH_SPREAD_THRESHOLD: f32 = 0.1;

/// Guard against division by zero for degenerate bounding boxes
pub const PROJECTION_EPSILON: f32 = 1e-6;

/// Number of landmarks in the COCO keypoint schema
pub const COCO_LANDMARK_COUNT: usize = 17;

/// Number of landmarks in the BlazePose keypoint schema
pub const BLAZEPOSE_LANDMARK_COUNT: usize = 33;

/// Spoken message for the collapse alert
pub const DEFAULT_ALERT_MESSAGE: &str = "Alert. Person not okay.";

/// Canvas anchor for labels when the torso centroid is unavailable
pub const FALLBACK_LABEL_ANCHOR: (f32, f32) = (20.0, 20.0);
