//! Debounced audible alerting.
//!
//! The debounce step is a pure state machine owned by the orchestrator; the
//! side effect goes through a fire-and-forget worker so the frame loop never
//! waits on playback.

use crate::classifier::{PostureVerdict, SceneState};
use log::{debug, warn};
use std::sync::mpsc::{self, SyncSender, TrySendError};
use std::thread::{self, JoinHandle};

/// Last verdict announced to the audio collaborator.
///
/// Passed into and returned from [`AlertDebouncer::run`]; nothing else reads or
/// mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertState {
    last_announced: PostureVerdict,
}

impl Default for AlertState {
    fn default() -> Self {
        Self {
            last_announced: PostureVerdict::Ok,
        }
    }
}

/// Two-state debouncer deciding when a new audible alert fires
pub struct AlertDebouncer;

impl AlertDebouncer {
    /// Advance the alert state for one frame.
    ///
    /// Returns the next state and whether an alert fires now. At most one alert
    /// fires per contiguous run of NOT OK frames; any frame without a NOT OK
    /// person (including an empty scene) re-arms the debouncer.
    #[must_use]
    pub fn run(state: AlertState, scene: &SceneState) -> (AlertState, bool) {
        let current = if scene.any_not_ok() {
            PostureVerdict::NotOk
        } else {
            PostureVerdict::Ok
        };

        let fire = current == PostureVerdict::NotOk && state.last_announced != PostureVerdict::NotOk;

        (
            AlertState {
                last_announced: current,
            },
            fire,
        )
    }
}

/// External audio/notification collaborator.
///
/// `announce` may block for the duration of playback; the worker thread absorbs
/// that so the pipeline does not.
pub trait AlertSink: Send {
    /// Play or deliver one alert message
    fn announce(&mut self, message: &str);
}

/// Sink that announces through the logger; the default when no speech
/// collaborator is wired up.
pub struct LogSink;

impl AlertSink for LogSink {
    fn announce(&mut self, message: &str) {
        warn!("ALERT: {message}");
    }
}

/// Background worker delivering alerts to a sink without blocking the caller.
///
/// The channel holds at most one pending alert; a trigger arriving while the
/// sink is busy and one alert is already queued is dropped.
pub struct AlertWorker {
    sender: Option<SyncSender<String>>,
    handle: Option<JoinHandle<()>>,
}

impl AlertWorker {
    /// Spawn the worker thread around a sink
    #[must_use]
    pub fn spawn<S: AlertSink + 'static>(mut sink: S) -> Self {
        let (sender, receiver) = mpsc::sync_channel::<String>(1);
        let handle = thread::spawn(move || {
            while let Ok(message) = receiver.recv() {
                sink.announce(&message);
            }
        });

        Self {
            sender: Some(sender),
            handle: Some(handle),
        }
    }

    /// Request one alert, never blocking
    pub fn trigger(&self, message: &str) {
        let Some(sender) = &self.sender else {
            return;
        };
        match sender.try_send(message.to_string()) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                debug!("alert sink busy, dropping announcement");
            }
            Err(TrySendError::Disconnected(_)) => {
                warn!("alert worker has exited");
            }
        }
    }
}

impl Drop for AlertWorker {
    fn drop(&mut self) {
        // Closing the channel stops the worker loop
        drop(self.sender.take());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn scene(verdicts: &[PostureVerdict]) -> SceneState {
        SceneState::from_verdicts(verdicts)
    }

    #[test]
    fn test_fires_once_per_not_ok_run() {
        use PostureVerdict::{NotOk, Ok};

        let sequence = [Ok, NotOk, NotOk, Ok, NotOk];
        let mut state = AlertState::default();
        let mut fired = Vec::new();

        for verdict in sequence {
            let (next, fire) = AlertDebouncer::run(state, &scene(&[verdict]));
            state = next;
            fired.push(fire);
        }

        assert_eq!(fired, vec![false, true, false, false, true]);
    }

    #[test]
    fn test_empty_scene_rearms() {
        let (state, fire) =
            AlertDebouncer::run(AlertState::default(), &scene(&[PostureVerdict::NotOk]));
        assert!(fire);

        // Everyone leaves the frame
        let (state, fire) = AlertDebouncer::run(state, &scene(&[]));
        assert!(!fire);

        // The next collapse is a new run
        let (_, fire) = AlertDebouncer::run(state, &scene(&[PostureVerdict::NotOk]));
        assert!(fire);
    }

    #[test]
    fn test_any_person_not_ok_triggers() {
        let mixed = scene(&[PostureVerdict::Ok, PostureVerdict::NotOk, PostureVerdict::Ok]);
        let (_, fire) = AlertDebouncer::run(AlertState::default(), &mixed);
        assert!(fire);
    }

    struct RecordingSink(Arc<Mutex<Vec<String>>>);

    impl AlertSink for RecordingSink {
        fn announce(&mut self, message: &str) {
            self.0.lock().unwrap().push(message.to_string());
        }
    }

    #[test]
    fn test_worker_delivers_then_joins() {
        let received = Arc::new(Mutex::new(Vec::new()));
        let worker = AlertWorker::spawn(RecordingSink(Arc::clone(&received)));

        worker.trigger("person down");
        // Dropping joins the worker, so delivery is complete afterwards
        drop(worker);

        assert_eq!(received.lock().unwrap().as_slice(), ["person down"]);
    }
}
