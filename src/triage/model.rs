//! Request-lifecycle state machine for triage analysis.
//!
//! Pure reducer in the same shape as the rest of the core models: the host
//! feeds [`Action`]s in and executes the returned [`Effect`]s. All network
//! work happens outside; completions come back as actions tagged with the
//! sequence number of the request that produced them.

use super::verdict::{self, Verdict};
use crate::types::AnalysisResult;

/// Default confidence threshold (25%).
pub const DEFAULT_THRESHOLD: f64 = 0.25;

/// Request lifecycle phase. Exactly one is current at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Phase {
    /// No file submitted yet.
    #[default]
    Idle,
    /// A prediction request is outstanding.
    Loading,
    Succeeded(AnalysisResult),
    Failed(String),
}

/// Input actions (pure).
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Host attached or cleared the file to analyze.
    SetFilePresent { present: bool },

    /// Controller became active. Auto-submits once when a file is already
    /// present, so the first analysis needs no explicit user action.
    Activate,

    /// Explicit refresh.
    Submit,

    /// Threshold changed. Clamped to `[0, 1]`; re-submits automatically when
    /// a file is present, superseding any in-flight request.
    SetThreshold(f64),

    /// A request completed successfully.
    RequestSucceeded { seq: u64, result: AnalysisResult },

    /// A request failed (transport error or non-success status).
    RequestFailed { seq: u64, message: String },
}

/// Effects requested by the model (executed by the async host).
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Start a prediction request tagged with `seq` at `confidence`.
    StartRequest { seq: u64, confidence: f64 },
}

/// Triage state machine model.
#[derive(Debug)]
pub struct Model {
    phase: Phase,
    threshold: f64,
    has_file: bool,
    latest_seq: u64,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            phase: Phase::default(),
            threshold: DEFAULT_THRESHOLD,
            has_file: false,
            latest_seq: 0,
        }
    }
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading)
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.phase {
            Phase::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// True when `seq` belongs to the most recently issued request.
    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.latest_seq
    }

    /// Derived triage verdict ([`Verdict::Awaiting`] unless succeeded).
    pub fn verdict(&self) -> Verdict {
        match &self.phase {
            Phase::Succeeded(result) => verdict::derive(&result.summary),
            _ => Verdict::Awaiting,
        }
    }

    pub fn status_label(&self) -> &'static str {
        self.verdict().label()
    }

    /// Display confidence for the current result, as integer percent.
    pub fn display_confidence(&self) -> Option<u32> {
        self.result()
            .map(|result| verdict::display_confidence(result, self.threshold))
    }

    /// Effective minimum score for the overlay mapper. The threshold sent to
    /// the API is re-applied client-side, so detections the API returned
    /// below the requested cutoff are still suppressed.
    pub fn min_score(&self) -> f64 {
        self.threshold
    }

    /// Enter Loading and issue a fresh request.
    ///
    /// Prior result or error is cleared immediately; the preview persists on
    /// the host side since it reflects the input file, not the response.
    /// Bumping the sequence number supersedes any in-flight request:
    /// last-request-wins by issuance order.
    fn begin_request(&mut self) -> Vec<Effect> {
        if !self.has_file {
            return Vec::new();
        }

        self.latest_seq += 1;
        self.phase = Phase::Loading;
        vec![Effect::StartRequest {
            seq: self.latest_seq,
            confidence: self.threshold,
        }]
    }

    pub fn reduce(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::SetFilePresent { present } => {
                self.has_file = present;
                Vec::new()
            }

            Action::Activate => {
                // Auto-run only from Idle; re-activation after a completed
                // analysis must not re-submit behind the operator's back.
                if matches!(self.phase, Phase::Idle) {
                    self.begin_request()
                } else {
                    Vec::new()
                }
            }

            Action::Submit => self.begin_request(),

            Action::SetThreshold(value) => {
                self.threshold = value.clamp(0.0, 1.0);
                self.begin_request()
            }

            Action::RequestSucceeded { seq, result } => {
                if !self.is_current(seq) {
                    // Overtaken by a newer request; discard silently.
                    return Vec::new();
                }
                self.phase = Phase::Succeeded(result);
                Vec::new()
            }

            Action::RequestFailed { seq, message } => {
                if !self.is_current(seq) {
                    return Vec::new();
                }
                self.phase = Phase::Failed(message);
                Vec::new()
            }
        }
    }
}
