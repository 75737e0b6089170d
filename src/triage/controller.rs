//! Async host around the triage model.
//!
//! The controller owns the prediction client and the currently attached
//! file, drives the pure reducer, and executes its effects on the tokio
//! runtime. Completions re-enter the reducer tagged with their sequence
//! number; the model discards anything overtaken by a newer request.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::Notify;

use super::model::{Action, Effect, Model, Phase};
use super::verdict::Verdict;
use crate::api::PredictClient;
use crate::overlay::{self, OverlayBox};
use crate::preview::Preview;
use crate::types::DisplayGeometry;

pub struct TriageController {
    model: Arc<Mutex<Model>>,
    client: PredictClient,
    preview: Arc<Mutex<Option<Preview>>>,
    completed: Arc<Notify>,
}

impl TriageController {
    pub fn new(client: PredictClient) -> Self {
        Self {
            model: Arc::new(Mutex::new(Model::new())),
            client,
            preview: Arc::new(Mutex::new(None)),
            completed: Arc::new(Notify::new()),
        }
    }

    /// Attach the file to analyze. Any previous preview is dropped here,
    /// releasing its memory; only one preview is ever alive.
    pub fn attach_file(&self, preview: Preview) {
        *self.preview.lock() = Some(preview);
        self.apply(Action::SetFilePresent { present: true });
    }

    /// Current preview, if a file is attached.
    pub fn preview(&self) -> Option<Preview> {
        self.preview.lock().clone()
    }

    /// Activate the controller. Auto-runs the first analysis when a file is
    /// already attached.
    pub fn activate(&self) {
        self.apply(Action::Activate);
    }

    /// Explicit refresh.
    pub fn refresh(&self) {
        self.apply(Action::Submit);
    }

    /// Change the confidence threshold. Re-submits automatically when a file
    /// is attached, superseding any in-flight request.
    pub fn set_threshold(&self, value: f64) {
        self.apply(Action::SetThreshold(value));
    }

    pub fn phase(&self) -> Phase {
        self.model.lock().phase().clone()
    }

    pub fn threshold(&self) -> f64 {
        self.model.lock().threshold()
    }

    pub fn verdict(&self) -> Verdict {
        self.model.lock().verdict()
    }

    pub fn status_label(&self) -> &'static str {
        self.model.lock().status_label()
    }

    pub fn display_confidence(&self) -> Option<u32> {
        self.model.lock().display_confidence()
    }

    /// Overlay rectangles for the current result at the given display
    /// geometry, filtered by the effective minimum score.
    ///
    /// The host calls this again after every load/resize notification, so
    /// stale rectangles are never shown. Returns nothing until the overlay
    /// can be aligned with the rendered image.
    pub fn overlay_boxes(&self, geometry: DisplayGeometry) -> Vec<OverlayBox> {
        let model = self.model.lock();
        match model.phase() {
            Phase::Succeeded(result)
                if overlay::is_positionable(result.width, result.height, geometry) =>
            {
                overlay::map_detections(
                    geometry,
                    result.width,
                    result.height,
                    &result.detections,
                    model.min_score(),
                )
            }
            _ => Vec::new(),
        }
    }

    /// Wait until no request is outstanding, returning the settled phase.
    pub async fn settled(&self) -> Phase {
        loop {
            // Register before checking, so a completion between the check
            // and the await is not missed.
            let notified = self.completed.notified();
            let phase = self.phase();
            if !matches!(phase, Phase::Loading) {
                return phase;
            }
            notified.await;
        }
    }

    fn apply(&self, action: Action) {
        let effects = self.model.lock().reduce(action);
        for effect in effects {
            self.run_effect(effect);
        }
    }

    fn run_effect(&self, effect: Effect) {
        match effect {
            Effect::StartRequest { seq, confidence } => self.start_request(seq, confidence),
        }
    }

    fn start_request(&self, seq: u64, confidence: f64) {
        let Some((name, bytes)) = self
            .preview
            .lock()
            .as_ref()
            .map(|p| (p.name().to_string(), p.bytes().to_vec()))
        else {
            // The model only issues requests while a file is present, but the
            // preview could have been cleared in between; fail the request
            // instead of hanging in Loading.
            self.complete(Action::RequestFailed {
                seq,
                message: "no file attached".to_string(),
            });
            return;
        };

        log::debug!("starting prediction request seq={seq} conf={confidence:.2}");

        let model = Arc::clone(&self.model);
        let completed = Arc::clone(&self.completed);
        let client = self.client.clone();

        tokio::spawn(async move {
            let action = match client.predict(&name, bytes, confidence).await {
                Ok(result) => Action::RequestSucceeded { seq, result },
                Err(err) => {
                    log::warn!("prediction request seq={seq} failed: {err}");
                    Action::RequestFailed {
                        seq,
                        message: err.to_string(),
                    }
                }
            };

            let mut model = model.lock();
            if !model.is_current(seq) {
                log::debug!("discarding stale response seq={seq}");
            }
            let _ = model.reduce(action);
            drop(model);
            completed.notify_waiters();
        });
    }

    fn complete(&self, action: Action) {
        let _ = self.model.lock().reduce(action);
        self.completed.notify_waiters();
    }
}
