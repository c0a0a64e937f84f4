use ndarray::{Array4, Axis};

use super::model::MAX_INTENSITY;

// ---------------------------------------------------------------------------
// Intensity highlighting driven by the threshold slider
// ---------------------------------------------------------------------------

/// Threshold value at which the display volume equals the original.
pub const THRESHOLD_MAX: u8 = u8::MAX;

/// Build the display volume for a threshold in `0..=255`.
///
/// At [`THRESHOLD_MAX`] the result is an unmodified copy. Below it:
/// * channel 0 is zeroed over the whole volume
/// * the cutoff is `t / 255 * max` of the zeroed volume
/// * every value above the cutoff (any channel) is raised to full intensity
///
/// Values at or below the cutoff keep their original intensity; this is a
/// highlight, not a binary mask.
pub fn apply_threshold(original: &Array4<f32>, threshold: u8) -> Array4<f32> {
    let mut display = original.clone();
    if threshold == THRESHOLD_MAX {
        return display;
    }

    display.index_axis_mut(Axis(3), 0).fill(0.0);

    let max = display.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let cutoff = f64::from(threshold) / f64::from(THRESHOLD_MAX) * f64::from(max);
    display.mapv_inplace(|v| {
        if f64::from(v) > cutoff {
            MAX_INTENSITY
        } else {
            v
        }
    });
    display
}
