//! Per-frame orchestration: classify, project, render, alert.

use crate::{
    alert::{AlertDebouncer, AlertState, AlertWorker},
    classifier::{PostureClassifier, PostureVerdict, SceneState},
    config::Config,
    constants::FALLBACK_LABEL_ANCHOR,
    keypoints::KeypointFrame,
    projection::{CanvasProjector, ProjectionMode},
    renderer::{DrawColor, DrawPrimitive, SkeletonRenderer},
};
use log::info;

/// Everything the pipeline decides about one frame
#[derive(Debug)]
pub struct FrameOutput {
    /// Draw instructions for the external surface
    pub primitives: Vec<DrawPrimitive>,
    /// Per-person verdicts, in input order
    pub verdicts: Vec<PostureVerdict>,
    /// Aggregated scene state
    pub scene: SceneState,
    /// Whether the debouncer fired an alert on this frame
    pub alert_fired: bool,
}

/// Frame-synchronous driver from decoded pose output to render and alert
/// decisions.
///
/// One frame is fully processed before the next is accepted; the only
/// background work is alert playback inside the optional [`AlertWorker`].
pub struct FramePipeline {
    classifier: PostureClassifier,
    projector: CanvasProjector,
    renderer: SkeletonRenderer,
    projection_mode: ProjectionMode,
    visibility_threshold: f32,
    alert_state: AlertState,
    alert_worker: Option<AlertWorker>,
    alert_message: String,
}

impl FramePipeline {
    /// Build a pipeline without an audio collaborator; alerts are still
    /// decided and reported in [`FrameOutput::alert_fired`].
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            classifier: PostureClassifier::new(&config.classifier),
            projector: CanvasProjector::new(config.canvas.size, config.canvas.margin_fraction),
            renderer: SkeletonRenderer::new(config.classifier.visibility_threshold),
            projection_mode: config.canvas.projection,
            visibility_threshold: config.classifier.visibility_threshold,
            alert_state: AlertState::default(),
            alert_worker: None,
            alert_message: config.alert.message.clone(),
        }
    }

    /// Build a pipeline that delivers fired alerts to the given worker
    #[must_use]
    pub fn with_alert_worker(config: &Config, worker: AlertWorker) -> Self {
        let mut pipeline = Self::new(config);
        pipeline.alert_worker = Some(worker);
        pipeline
    }

    /// Process one frame's worth of detected persons.
    ///
    /// Persons with zero visible keypoints classify as NoPerson and are skipped
    /// for rendering; a frame with nobody visible renders only the
    /// "No Person Detected" label.
    pub fn process(&mut self, persons: &[KeypointFrame]) -> FrameOutput {
        let all_points: Vec<(f32, f32)> = persons
            .iter()
            .flat_map(|frame| {
                frame
                    .visible(self.visibility_threshold)
                    .map(|kp| (kp.x, kp.y))
            })
            .collect();

        let mut primitives = Vec::new();
        let mut verdicts = Vec::with_capacity(persons.len());

        if all_points.is_empty() {
            verdicts.extend(persons.iter().map(|_| PostureVerdict::NoPerson));
            let (x, y) = FALLBACK_LABEL_ANCHOR;
            primitives.push(DrawPrimitive::Label {
                x,
                y,
                text: PostureVerdict::NoPerson.to_string(),
                color: DrawColor::Neutral,
            });
        } else {
            let shared = self.projector.compute(&all_points);

            for frame in persons {
                let verdict = self.classifier.classify(frame);
                verdicts.push(verdict);
                if verdict == PostureVerdict::NoPerson {
                    continue;
                }

                let projection = match self.projection_mode {
                    ProjectionMode::Shared => shared,
                    ProjectionMode::PerPerson => {
                        let points: Vec<(f32, f32)> = frame
                            .visible(self.visibility_threshold)
                            .map(|kp| (kp.x, kp.y))
                            .collect();
                        self.projector.compute(&points)
                    }
                };

                primitives.extend(self.renderer.render(frame, &projection, verdict));
            }
        }

        let scene = SceneState::from_verdicts(&verdicts);
        let (next_state, alert_fired) = AlertDebouncer::run(self.alert_state, &scene);
        self.alert_state = next_state;

        if alert_fired {
            info!("scene turned NOT OK, firing alert");
            if let Some(worker) = &self.alert_worker {
                worker.trigger(&self.alert_message);
            }
        }

        FrameOutput {
            primitives,
            verdicts,
            scene,
            alert_fired,
        }
    }
}
