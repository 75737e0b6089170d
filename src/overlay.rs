//! Overlay coordinate mapping.
//!
//! Detections arrive in original-image pixel space; the host renders the
//! image at whatever size layout gives it. The mapper converts boxes into
//! display space for the current [`DisplayGeometry`]. It is a pure function
//! of its inputs: the host re-invokes it on every load/resize notification
//! and must never cache rectangles across geometry changes.

use crate::types::{Detection, DisplayGeometry};

/// A detection rectangle mapped into display coordinates, ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    /// Class name plus score percentage, e.g. `"Radial Fracture (92.3%)"`.
    pub label: String,
}

/// Per-axis scale factors from original-image space to display space.
///
/// The rendered image is not assumed to preserve aspect ratio, so the axes
/// scale independently. Unknown (zero) original dimensions fall back to
/// `1.0`; callers should gate drawing on [`is_positionable`] in that case
/// rather than show misaligned boxes.
pub fn scale_factors(original_w: u32, original_h: u32, geometry: DisplayGeometry) -> (f64, f64) {
    let scale_x = if original_w > 0 {
        geometry.width / original_w as f64
    } else {
        1.0
    };
    let scale_y = if original_h > 0 {
        geometry.height / original_h as f64
    } else {
        1.0
    };
    (scale_x, scale_y)
}

/// True when the overlay can be meaningfully aligned with the rendered image.
#[inline]
pub fn is_positionable(original_w: u32, original_h: u32, geometry: DisplayGeometry) -> bool {
    original_w > 0 && original_h > 0 && geometry.is_measured()
}

/// Display label for a detection: class name plus score as a percentage with
/// one decimal place.
pub fn format_label(detection: &Detection) -> String {
    format!(
        "{} ({:.1}%)",
        detection.class_name,
        detection.score * 100.0
    )
}

/// Map every detection with `score >= min_score` into a display-space
/// rectangle, preserving input order.
///
/// Degenerate boxes (zero width/height) map to zero-size rectangles.
pub fn map_detections(
    geometry: DisplayGeometry,
    original_w: u32,
    original_h: u32,
    detections: &[Detection],
    min_score: f64,
) -> Vec<OverlayBox> {
    let (scale_x, scale_y) = scale_factors(original_w, original_h, geometry);

    detections
        .iter()
        .filter(|d| d.score >= min_score)
        .map(|d| {
            let [x1, y1, _, _] = d.bbox;
            OverlayBox {
                left: x1 * scale_x,
                top: y1 * scale_y,
                width: d.box_width() * scale_x,
                height: d.box_height() * scale_y,
                label: format_label(d),
            }
        })
        .collect()
}
