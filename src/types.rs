//! Shared data model: API response shapes and display geometry.

use serde::{Deserialize, Serialize};

/// One model-reported candidate finding, in original-image pixel space.
///
/// Immutable once received; owned by the [`AnalysisResult`] that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Bounding box `[x1, y1, x2, y2]` in absolute pixels (`x2 >= x1`, `y2 >= y1`).
    #[serde(rename = "box")]
    pub bbox: [f64; 4],
    /// Numeric class index.
    pub cls: i64,
    /// Human-readable class label.
    pub class_name: String,
    /// Score in `[0, 1]`.
    pub score: f64,
}

impl Detection {
    #[inline]
    pub fn box_width(&self) -> f64 {
        self.bbox[2] - self.bbox[0]
    }

    #[inline]
    pub fn box_height(&self) -> f64 {
        self.bbox[3] - self.bbox[1]
    }
}

/// Aggregate summary attached to a prediction response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub fractured: bool,
    /// Distinct class labels seen across the detections.
    pub types: Vec<String>,
}

/// One completed prediction.
///
/// Superseded whole by the next successful call, never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub filename: String,
    /// Source image width in pixels.
    pub width: u32,
    /// Source image height in pixels.
    pub height: u32,
    pub detections: Vec<Detection>,
    pub summary: Summary,
}

/// Measured size of the rendered surface, in device-independent pixels.
///
/// Purely derived state: the host re-measures it on image load and on every
/// resize, and re-invokes the overlay mapper with the fresh value. Never
/// persisted.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DisplayGeometry {
    pub width: f64,
    pub height: f64,
}

impl DisplayGeometry {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True once the rendered surface has a measurable size.
    #[inline]
    pub fn is_measured(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}
