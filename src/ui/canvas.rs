use eframe::egui::{self, ColorImage, TextureHandle, TextureOptions};

use crate::color::slice_to_image;
use crate::data::model::{Slice, SliceAxis};
use crate::surface::DisplaySurface;

// ---------------------------------------------------------------------------
// Canvas – egui-backed display surface
// ---------------------------------------------------------------------------

/// Retained content of the window: what each panel currently shows.
///
/// The viewer draws into it synchronously; textures are uploaded lazily on
/// the next frame, once an egui context is at hand.
pub struct Canvas {
    title: String,
    panels: [SlicePanel; 3],
    volume_panel_visible: bool,
    redraw_requested: bool,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            title: String::new(),
            panels: Default::default(),
            volume_panel_visible: true,
            redraw_requested: false,
        }
    }
}

impl Canvas {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn panel_mut(&mut self, axis: SliceAxis) -> &mut SlicePanel {
        &mut self.panels[axis.index()]
    }

    pub fn volume_panel_visible(&self) -> bool {
        self.volume_panel_visible
    }

    /// Returns whether a redraw was requested since the last call.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }
}

impl DisplaySurface for Canvas {
    fn set_title(&mut self, title: &str) {
        self.title = title.to_owned();
    }

    fn draw_slice(&mut self, slice: Slice) {
        let panel = self.panel_mut(slice.axis);
        panel.pending = Some(slice_to_image(&slice));
        panel.columns = slice.columns();
        panel.rows = slice.rows();
        panel.vertical_guide = slice.vertical_guide;
        panel.horizontal_guide = slice.horizontal_guide;
    }

    fn clear_volume_panel(&mut self) {
        self.volume_panel_visible = false;
    }

    fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }
}

// ---------------------------------------------------------------------------
// SlicePanel – one cross-section view
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct SlicePanel {
    /// Image drawn since the last frame, not yet uploaded.
    pending: Option<ColorImage>,
    texture: Option<TextureHandle>,
    pub columns: usize,
    pub rows: usize,
    pub vertical_guide: usize,
    pub horizontal_guide: usize,
}

impl SlicePanel {
    /// Upload any pending image and return the texture to show, if any.
    pub fn texture(&mut self, ctx: &egui::Context, name: &str) -> Option<&TextureHandle> {
        if let Some(image) = self.pending.take() {
            match &mut self.texture {
                Some(texture) => texture.set(image, TextureOptions::NEAREST),
                None => {
                    self.texture = Some(ctx.load_texture(name, image, TextureOptions::NEAREST));
                }
            }
        }
        self.texture.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use ndarray::Array3;

    use super::*;

    #[test]
    fn draw_slice_stores_image_and_guides() {
        let mut canvas = Canvas::default();
        canvas.draw_slice(Slice {
            axis: SliceAxis::X,
            pixels: Array3::zeros((4, 7, 3)),
            vertical_guide: 2,
            horizontal_guide: 3,
        });

        let panel = canvas.panel_mut(SliceAxis::X);
        assert_eq!((panel.columns, panel.rows), (7, 4));
        assert_eq!((panel.vertical_guide, panel.horizontal_guide), (2, 3));
        assert_eq!(panel.pending.as_ref().map(|image| image.size), Some([7, 4]));
        assert!(canvas.panel_mut(SliceAxis::Z).pending.is_none());
    }

    #[test]
    fn redraw_request_is_consumed_once() {
        let mut canvas = Canvas::default();
        assert!(!canvas.take_redraw_request());
        canvas.request_redraw();
        assert!(canvas.take_redraw_request());
        assert!(!canvas.take_redraw_request());
    }

    #[test]
    fn volume_panel_hides_after_clear() {
        let mut canvas = Canvas::default();
        canvas.set_title("scan_01");
        assert!(canvas.volume_panel_visible());
        canvas.clear_volume_panel();
        assert!(!canvas.volume_panel_visible());
        assert_eq!(canvas.title(), "scan_01");
    }
}
