//! Verdict derivation from a completed analysis.

use crate::types::{AnalysisResult, Summary};

/// Label substrings that mark a negative/normal finding.
///
/// Some model exports label healthy studies with a class of their own, in
/// which case the summary still reports `fractured: true` because the
/// detection list is non-empty. The alias check overrides that raw flag.
const HEALTHY_ALIASES: [&str; 5] = ["healthy", "normal", "no fracture", "no_fracture", "negative"];

/// Tri-state triage conclusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verdict {
    /// No completed analysis yet.
    #[default]
    Awaiting,
    Fractured,
    Clear,
}

impl Verdict {
    /// Status label shown to the operator.
    pub fn label(self) -> &'static str {
        match self {
            Verdict::Awaiting => "Awaiting Analysis",
            Verdict::Fractured => "Fracture Detected",
            Verdict::Clear => "No Fracture Detected",
        }
    }

    /// `None` while awaiting, otherwise whether a fracture was concluded.
    pub fn fractured(self) -> Option<bool> {
        match self {
            Verdict::Awaiting => None,
            Verdict::Fractured => Some(true),
            Verdict::Clear => Some(false),
        }
    }
}

/// True iff `types` is non-empty and every label, case-insensitively,
/// contains one of the healthy aliases (substring, not exact match).
pub fn is_healthy_only(types: &[String]) -> bool {
    !types.is_empty()
        && types.iter().all(|t| {
            let t = t.to_lowercase();
            HEALTHY_ALIASES.iter().any(|alias| t.contains(alias))
        })
}

/// Derive the verdict from a completed summary.
///
/// A purely healthy type list wins over the raw `fractured` flag; otherwise
/// the flag passes through.
pub fn derive(summary: &Summary) -> Verdict {
    if is_healthy_only(&summary.types) {
        Verdict::Clear
    } else if summary.fractured {
        Verdict::Fractured
    } else {
        Verdict::Clear
    }
}

/// Display confidence as an integer percentage.
///
/// Uses the maximum detection score when any detection exists. With no
/// detections there is no real confidence to show; `100 - threshold%` is a
/// deliberately distinct placeholder meaning "nothing found above the chosen
/// bar".
pub fn display_confidence(result: &AnalysisResult, threshold: f64) -> u32 {
    let max_score = result.detections.iter().map(|d| d.score).reduce(f64::max);

    match max_score {
        Some(score) => (score * 100.0).round() as u32,
        None => 100 - (threshold * 100.0).round() as u32,
    }
}
