//! Millimetre helpers
//!
//! All layout geometry is expressed in millimetres. Conversion to screen
//! pixels happens outside the engine with a fixed ratio.

/// Rounds to the nearest whole millimetre, halves going towards +∞.
///
/// `-0.5` rounds to `0`, `0.5` to `1`, so a value dragged back and forth
/// across a half-millimetre boundary always lands on the same side.
pub fn round_mm(value: f64) -> f64 {
    let rounded = (value + 0.5).floor();
    // Keep -0.0 out of stored geometry
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Rounds `value` to the nearest multiple of `step`; a non-positive or
/// non-finite step falls back to whole millimetres.
pub fn round_to_step(value: f64, step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return round_mm(value);
    }
    round_mm(round_mm(value / step) * step)
}

/// Formats a length as a whole-millimetre label, e.g. `1000mm`.
pub fn format_mm(value_mm: f64) -> String {
    format!("{}mm", round_mm(value_mm) as i64)
}

/// Converts a length in millimetres to screen pixels.
pub fn mm_to_px(value_mm: f64, pixels_per_mm: f64) -> f64 {
    value_mm * pixels_per_mm
}

/// Converts a screen distance in pixels to millimetres.
pub fn px_to_mm(value_px: f64, pixels_per_mm: f64) -> f64 {
    if pixels_per_mm == 0.0 {
        return 0.0;
    }
    value_px / pixels_per_mm
}
