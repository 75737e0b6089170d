//! Triage & refresh control: request lifecycle, verdict derivation, and
//! re-submission policy.

pub mod controller;
pub mod model;
pub mod verdict;

pub use controller::TriageController;
pub use model::{Action, DEFAULT_THRESHOLD, Effect, Model, Phase};
pub use verdict::Verdict;
