use crate::data::model::Slice;

/// Drawing capabilities the viewer needs from a window toolkit.
pub trait DisplaySurface {
    /// Label shown above the panels (current volume name).
    fn set_title(&mut self, title: &str);

    /// Replace the content of the slice's panel: clear it, hide axis
    /// decorations, show the image and its two guide lines.
    fn draw_slice(&mut self, slice: Slice);

    /// Clear and hide the 3-D volume panel.
    fn clear_volume_panel(&mut self);

    /// Ask for a repaint without blocking.
    fn request_redraw(&mut self);
}
