//! Helper fixtures shared across integration tests
#![allow(dead_code)]

use scene_detect::keypoints::KeypointFrame;

/// 17 COCO rows, all below the visibility threshold
pub fn blank_rows() -> Vec<[f32; 3]> {
    vec![[0.0, 0.0, 0.0]; 17]
}

/// Pixel-space standing person: tall silhouette, vertical torso, wide vertical
/// spread. Classifies OK under the default configuration.
pub fn standing_rows() -> Vec<[f32; 3]> {
    let mut rows = blank_rows();
    rows[0] = [100.0, 0.0, 0.9]; // nose
    rows[5] = [90.0, 40.0, 0.9]; // left shoulder
    rows[6] = [110.0, 40.0, 0.9]; // right shoulder
    rows[11] = [95.0, 100.0, 0.9]; // left hip
    rows[12] = [105.0, 100.0, 0.9]; // right hip
    rows[13] = [95.0, 150.0, 0.9]; // left knee
    rows[14] = [105.0, 150.0, 0.9]; // right knee
    rows[15] = [95.0, 190.0, 0.9]; // left ankle
    rows[16] = [105.0, 190.0, 0.9]; // right ankle
    rows
}

/// The standing person rotated onto the floor: wide silhouette, horizontal
/// torso, flat vertical spread. Classifies NOT OK under the default
/// configuration.
pub fn lying_rows() -> Vec<[f32; 3]> {
    let mut rows = blank_rows();
    rows[0] = [0.0, 100.0, 0.9];
    rows[5] = [40.0, 90.0, 0.9];
    rows[6] = [40.0, 110.0, 0.9];
    rows[11] = [100.0, 95.0, 0.9];
    rows[12] = [100.0, 105.0, 0.9];
    rows[13] = [150.0, 95.0, 0.9];
    rows[14] = [150.0, 105.0, 0.9];
    rows[15] = [190.0, 95.0, 0.9];
    rows[16] = [190.0, 105.0, 0.9];
    rows
}

/// Shift every visible keypoint by a fixed offset
pub fn translate(rows: &[[f32; 3]], dx: f32, dy: f32) -> Vec<[f32; 3]> {
    rows.iter().map(|&[x, y, c]| [x + dx, y + dy, c]).collect()
}

pub fn frame(rows: &[[f32; 3]]) -> KeypointFrame {
    KeypointFrame::from_coco(rows).unwrap()
}

pub fn standing_person() -> KeypointFrame {
    frame(&standing_rows())
}

pub fn lying_person() -> KeypointFrame {
    frame(&lying_rows())
}
