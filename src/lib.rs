//! Privacy-preserving posture monitoring from human-pose keypoints.
//!
//! This library consumes the decoded keypoint output of a pose estimator and,
//! per frame:
//! 1. Classifies each person's posture (OK / NOT OK / no person) with a
//!    three-vote heuristic over silhouette shape, torso tilt, and depth spread
//! 2. Projects the skeleton into a fixed square canvas and emits anonymized
//!    stick-figure draw primitives (never any source pixels)
//! 3. Debounces an audible alert so one sustained collapse announces once
//!
//! Estimator backends are abstracted behind [`keypoints::KeypointFrame`]: one
//! adapter per schema (17-point COCO, 33-point BlazePose) and everything
//! downstream is backend-agnostic.
//!
//! # Examples
//!
//! ## Classifying a single person
//!
//! ```no_run
//! use scene_detect::classifier::PostureClassifier;
//! use scene_detect::config::ClassifierConfig;
//! use scene_detect::keypoints::KeypointFrame;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // 17 rows of [x, y, confidence] straight from a YOLO-pose head
//! let rows: Vec<[f32; 3]> = vec![[0.0, 0.0, 0.0]; 17];
//! let person = KeypointFrame::from_coco(&rows)?;
//!
//! let classifier = PostureClassifier::new(&ClassifierConfig::default());
//! let verdict = classifier.classify(&person);
//! println!("{verdict}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Full per-frame pipeline with alerting
//!
//! ```no_run
//! use scene_detect::alert::{AlertWorker, LogSink};
//! use scene_detect::canvas::CanvasPainter;
//! use scene_detect::config::Config;
//! use scene_detect::pipeline::FramePipeline;
//! use scene_detect::replay::ReplayReader;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! config.validate()?;
//!
//! let worker = AlertWorker::spawn(LogSink);
//! let mut pipeline = FramePipeline::with_alert_worker(&config, worker);
//! let painter = CanvasPainter::new(config.canvas.size);
//!
//! for frame in ReplayReader::open("poses.jsonl")? {
//!     let persons = frame?;
//!     let output = pipeline.process(&persons);
//!     let canvas = painter.paint(&output.primitives)?;
//!     println!("{}: alert={}", output.scene, output.alert_fired);
//!     let _ = canvas;
//! }
//! # Ok(())
//! # }
//! ```

/// Keypoint data model and estimator-schema adapters
pub mod keypoints;

/// Posture classification heuristic
pub mod classifier;

/// Canvas projection transform
pub mod projection;

/// Stick-figure draw-primitive emission
pub mod renderer;

/// Alert debouncing and the fire-and-forget audio worker
pub mod alert;

/// Per-frame orchestration
pub mod pipeline;

/// `OpenCV` rasterization of draw primitives
pub mod canvas;

/// JSON-lines replay of recorded estimator output
pub mod replay;

/// Error types and result handling
pub mod error;

/// Configuration management
pub mod config;

/// Constants used throughout the application
pub mod constants;

pub use error::{Error, Result};
