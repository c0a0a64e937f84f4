use eframe::egui::{Color32, ColorImage};

use crate::data::model::{Slice, DISPLAY_CHANNELS, MAX_INTENSITY};

/// Yellow at 20 % opacity (premultiplied) for the cursor guide lines.
pub const GUIDE_COLOR: Color32 = Color32::from_rgba_premultiplied(51, 51, 0, 51);

/// Background of the window, a light grey.
pub const BACKGROUND: Color32 = Color32::from_gray(230);

// ---------------------------------------------------------------------------
// Slice → RGB image
// ---------------------------------------------------------------------------

/// Render a slice as an RGB image, one pixel per voxel.
///
/// The first three channels map to red, green and blue; missing channels are
/// black. Values are clamped to `0..=255`.
pub fn slice_to_image(slice: &Slice) -> ColorImage {
    let (rows, columns, channels) = slice.pixels.dim();
    let mut rgb = Vec::with_capacity(rows * columns * DISPLAY_CHANNELS);
    for row in 0..rows {
        for column in 0..columns {
            for channel in 0..DISPLAY_CHANNELS {
                let value = if channel < channels {
                    slice.pixels[[row, column, channel]]
                } else {
                    0.0
                };
                rgb.push(to_byte(value));
            }
        }
    }
    ColorImage::from_rgb([columns, rows], &rgb)
}

fn to_byte(value: f32) -> u8 {
    // NaN maps to 0.
    value.clamp(0.0, MAX_INTENSITY) as u8
}
