//! Configuration management for the scene detection pipeline

use crate::{
    classifier::DepthSource,
    constants::{
        DEFAULT_ALERT_MESSAGE, DEFAULT_CANVAS_SIZE, DEFAULT_MARGIN_FRACTION,
        DEFAULT_TILT_THRESHOLD_DEGREES, DEFAULT_VISIBILITY_THRESHOLD, DEFAULT_VOTE_MAJORITY,
        NORMALIZED_DEPTH_SPREAD_THRESHOLD, PIXEL_DEPTH_SPREAD_THRESHOLD,
    },
    projection::ProjectionMode,
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Posture classifier configuration
    pub classifier: ClassifierConfig,

    /// Canvas and projection configuration
    pub canvas: CanvasConfig,

    /// Alert configuration
    pub alert: AlertConfig,
}

/// Posture classifier parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Minimum confidence for a keypoint to count as visible (0.0-1.0)
    pub visibility_threshold: f32,

    /// Channel feeding the depth-spread vote
    pub depth_source: DepthSource,

    /// Depth-spread threshold, in the depth source's units
    pub depth_threshold: f32,

    /// Torso tilt from vertical counting as lying, degrees (0-90)
    pub tilt_threshold_degrees: f32,

    /// Votes required for a NOT OK verdict (1-3)
    pub vote_majority: u8,
}

/// Canvas and projection parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Side length of the square canvas, pixels
    pub size: u32,

    /// Fraction of the canvas the skeleton bounding box fills (0.0-1.0)
    pub margin_fraction: f32,

    /// Bounding-box policy for multi-person frames
    pub projection: ProjectionMode,
}

/// Alert parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Whether audible alerts fire at all
    pub enabled: bool,

    /// Message handed to the speech collaborator
    pub message: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            classifier: ClassifierConfig::default(),
            canvas: CanvasConfig::default(),
            alert: AlertConfig::default(),
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
            depth_source: DepthSource::YProxy,
            depth_threshold: PIXEL_DEPTH_SPREAD_THRESHOLD,
            tilt_threshold_degrees: DEFAULT_TILT_THRESHOLD_DEGREES,
            vote_majority: DEFAULT_VOTE_MAJORITY,
        }
    }
}

impl ClassifierConfig {
    /// Defaults for a backend with a real, normalized depth channel
    #[must_use]
    pub fn for_true_depth() -> Self {
        Self {
            depth_source: DepthSource::TrueZ,
            depth_threshold: NORMALIZED_DEPTH_SPREAD_THRESHOLD,
            ..Self::default()
        }
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_CANVAS_SIZE,
            margin_fraction: DEFAULT_MARGIN_FRACTION,
            projection: ProjectionMode::Shared,
        }
    }
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            message: DEFAULT_ALERT_MESSAGE.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| Error::Config(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns an error describing the first out-of-range field
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.classifier.visibility_threshold) {
            return Err(Error::Config(
                "Visibility threshold must be between 0.0 and 1.0".to_string(),
            ));
        }
        if !(0.0..=90.0).contains(&self.classifier.tilt_threshold_degrees) {
            return Err(Error::Config(
                "Tilt threshold must be between 0 and 90 degrees".to_string(),
            ));
        }
        if !self.classifier.depth_threshold.is_finite() || self.classifier.depth_threshold <= 0.0 {
            return Err(Error::Config(
                "Depth-spread threshold must be a positive finite value".to_string(),
            ));
        }
        if !(1..=3).contains(&self.classifier.vote_majority) {
            return Err(Error::Config(
                "Vote majority must be between 1 and 3".to_string(),
            ));
        }
        if self.canvas.size == 0 {
            return Err(Error::Config("Canvas size must be greater than 0".to_string()));
        }
        if !(self.canvas.margin_fraction > 0.0 && self.canvas.margin_fraction <= 1.0) {
            return Err(Error::Config(
                "Margin fraction must be in (0.0, 1.0]".to_string(),
            ));
        }
        if self.alert.message.is_empty() {
            return Err(Error::Config("Alert message must not be empty".to_string()));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Scene-Detect Configuration

# Posture classifier
classifier:
  visibility_threshold: 0.5
  # y_proxy for pixel-space estimators without depth, true_z for BlazePose-style output.
  # The depth threshold is in the source's units: ~20 for y_proxy pixels, ~0.1 for
  # a normalized z channel.
  depth_source: y_proxy
  depth_threshold: 20.0
  tilt_threshold_degrees: 30.0
  vote_majority: 2

# Stick-figure canvas
canvas:
  size: 512
  margin_fraction: 0.8
  projection: shared

# Audible alert
alert:
  enabled: true
  message: "Alert. Person not okay."
"#;
