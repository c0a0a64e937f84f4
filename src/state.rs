use crate::data::catalog::Catalog;
use crate::data::error::VolumeError;
use crate::data::loader::load_volume;
use crate::data::model::{Cursor, Slice, SliceAxis, Volume};
use crate::data::threshold::{apply_threshold, THRESHOLD_MAX};
use crate::events::{Key, PointerButton, Step, ViewerEvents};
use crate::surface::DisplaySurface;

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

/// The full viewer state and behavior, independent of any window toolkit.
///
/// All drawing goes through the [`DisplaySurface`] it owns.
pub struct Viewer<S> {
    catalog: Catalog,

    /// Position in the catalog, always within `0..=catalog.last_index()`.
    catalog_index: usize,

    /// Where the three cross-sections meet. Not clamped when the volume changes.
    cursor: Cursor,

    /// Slider value; `THRESHOLD_MAX` shows the original volume.
    threshold: u8,

    /// Volume as loaded from disk.
    original: Volume,

    /// Volume as shown, derived from `original` and `threshold`.
    display: Volume,

    surface: S,
}

impl<S: DisplaySurface> Viewer<S> {
    /// Load the first catalog entry and draw it with the cursor centred.
    pub fn open(catalog: Catalog, surface: S) -> Result<Self, VolumeError> {
        let original = load_volume(catalog.path(0))?;
        let mut viewer = Self {
            catalog,
            catalog_index: 0,
            cursor: Cursor::centered(original.extent()),
            threshold: THRESHOLD_MAX,
            display: original.clone(),
            original,
            surface,
        };
        viewer.surface.set_title(&viewer.original.name);
        viewer.apply_threshold(THRESHOLD_MAX, false);
        viewer.render_volume_scatter();
        viewer.render_slices();
        Ok(viewer)
    }

    /// Read the current catalog entry from disk and rebuild the display volume.
    ///
    /// The cursor is kept as-is, even if it no longer fits the new volume.
    pub fn load_current(&mut self) -> Result<(), VolumeError> {
        let original = load_volume(self.catalog.path(self.catalog_index))?;
        self.surface.set_title(&original.name);
        self.original = original;
        self.apply_threshold(self.threshold, false);
        Ok(())
    }

    pub fn next_volume(&mut self) -> Result<(), VolumeError> {
        self.navigate(Step::Next)
    }

    pub fn prev_volume(&mut self) -> Result<(), VolumeError> {
        self.navigate(Step::Previous)
    }

    /// Move one step through the catalog, saturating at both ends, and reload.
    fn navigate(&mut self, step: Step) -> Result<(), VolumeError> {
        self.catalog_index = match step {
            Step::Next => (self.catalog_index + 1).min(self.catalog.last_index()),
            Step::Previous => self.catalog_index.saturating_sub(1),
        };
        log::debug!(
            "Showing volume {}/{}",
            self.catalog_index + 1,
            self.catalog.len()
        );
        self.load_current()?;
        self.render_volume_scatter();
        self.render_slices();
        Ok(())
    }

    /// Set the threshold and recompute the display volume from the original.
    pub fn apply_threshold(&mut self, threshold: u8, redraw: bool) {
        self.threshold = threshold;
        self.display = Volume {
            name: self.original.name.clone(),
            data: apply_threshold(&self.original.data, threshold),
        };
        log::debug!("Threshold set to {threshold}");
        if redraw {
            self.render_slices();
        }
    }

    /// Draw the three cross-sections at the cursor and request a repaint.
    ///
    /// If the cursor lies outside the display volume nothing is drawn and the
    /// previous panels stay on screen.
    pub fn render_slices(&mut self) {
        let slices: Result<Vec<Slice>, VolumeError> = SliceAxis::ALL
            .iter()
            .map(|&axis| self.display.slice(axis, &self.cursor))
            .collect();

        match slices {
            Ok(slices) => {
                for slice in slices {
                    self.surface.draw_slice(slice);
                }
                self.surface.request_redraw();
            }
            Err(err) => log::warn!("Cannot draw '{}' at {}: {err}", self.display.name, self.cursor),
        }
    }

    /// The 3-D panel is cleared and hidden; no scatter is drawn into it.
    pub fn render_volume_scatter(&mut self) {
        self.surface.clear_volume_panel();
    }

    // -- Accessors --

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn catalog_index(&self) -> usize {
        self.catalog_index
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

// ---------------------------------------------------------------------------
// Event handling
// ---------------------------------------------------------------------------

impl<S: DisplaySurface> ViewerEvents for Viewer<S> {
    fn on_navigate(&mut self, step: Step) -> Result<(), VolumeError> {
        match step {
            Step::Next => self.next_volume(),
            Step::Previous => self.prev_volume(),
        }
    }

    fn on_threshold_change(&mut self, value: u8) {
        self.apply_threshold(value, true);
    }

    /// Coordinates are truncated toward zero; negative values become 0.
    fn on_pointer_drag(&mut self, button: PointerButton, view: SliceAxis, x: f64, y: f64) {
        if button != PointerButton::Primary {
            return;
        }
        let (column, row) = (x as usize, y as usize);
        match view {
            SliceAxis::Z => {
                self.cursor.x = column;
                self.cursor.y = row;
            }
            SliceAxis::X => {
                self.cursor.x = column;
                self.cursor.z = row;
            }
            SliceAxis::Y => {
                self.cursor.y = column;
                self.cursor.z = row;
            }
        }
        log::debug!("Cursor moved to {}", self.cursor);
        self.render_slices();
    }

    fn on_key_press(&mut self, key: Key) -> Result<(), VolumeError> {
        match key {
            Key::Right => self.next_volume(),
            Key::Left => self.prev_volume(),
            Key::Other => Ok(()),
        }
    }
}
