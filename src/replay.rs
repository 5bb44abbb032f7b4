//! JSON-lines replay of recorded pose-estimator output.
//!
//! One JSON object per line, one line per video frame:
//!
//! ```json
//! {"persons": [{"schema": "coco17", "keypoints": [[312.0, 80.5, 0.93], ...]}]}
//! ```
//!
//! This is the upstream boundary usable without a live estimator: the decoded
//! keypoint stream of any backend, captured to a file.

use crate::{
    keypoints::{KeypointFrame, PoseSchema},
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};

/// One detected person in one recorded frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonRecord {
    /// Keypoint schema the row layout follows
    pub schema: PoseSchema,
    /// One row per landmark: `[x, y, confidence]` for COCO,
    /// `[x, y, z, visibility]` for BlazePose
    pub keypoints: Vec<Vec<f32>>,
}

/// One recorded frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameRecord {
    /// All persons detected in the frame; may be empty
    #[serde(default)]
    pub persons: Vec<PersonRecord>,
}

impl PersonRecord {
    /// Decode the record through the schema's adapter
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] when a row's width or the row count does
    /// not match the schema.
    pub fn to_frame(&self) -> Result<KeypointFrame> {
        match self.schema {
            PoseSchema::Coco17 => {
                let rows = self.rows::<3>()?;
                KeypointFrame::from_coco(&rows)
            }
            PoseSchema::BlazePose33 => {
                let rows = self.rows::<4>()?;
                KeypointFrame::from_blazepose(&rows)
            }
        }
    }

    fn rows<const N: usize>(&self) -> Result<Vec<[f32; N]>> {
        self.keypoints
            .iter()
            .map(|row| {
                <[f32; N]>::try_from(row.as_slice()).map_err(|_| {
                    Error::InvalidInput(format!(
                        "Expected {N}-value keypoint rows, got {}",
                        row.len()
                    ))
                })
            })
            .collect()
    }
}

impl FrameRecord {
    /// Decode every person in the frame
    ///
    /// # Errors
    ///
    /// Propagates the first adapter failure
    pub fn to_frames(&self) -> Result<Vec<KeypointFrame>> {
        self.persons.iter().map(PersonRecord::to_frame).collect()
    }
}

/// Streaming reader over a JSON-lines pose recording
pub struct ReplayReader {
    lines: io::Lines<BufReader<Box<dyn Read>>>,
}

impl ReplayReader {
    /// Open a recording; `"-"` reads from stdin
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be opened
    pub fn open(path: &str) -> Result<Self> {
        let source: Box<dyn Read> = if path == "-" {
            Box::new(io::stdin())
        } else {
            Box::new(File::open(path)?)
        };
        Ok(Self {
            lines: BufReader::new(source).lines(),
        })
    }
}

impl Iterator for ReplayReader {
    type Item = Result<Vec<KeypointFrame>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.lines.next()? {
                Err(e) => return Some(Err(e.into())),
                Ok(line) if line.trim().is_empty() => {}
                Ok(line) => {
                    return Some(
                        serde_json::from_str::<FrameRecord>(&line)
                            .map_err(Error::from)
                            .and_then(|record| record.to_frames()),
                    );
                }
            }
        }
    }
}
