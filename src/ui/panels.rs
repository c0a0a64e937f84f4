use eframe::egui::{self, vec2, Button, Color32, RichText, Slider, Ui};

use crate::data::error::VolumeError;
use crate::data::threshold::THRESHOLD_MAX;
use crate::events::{Step, ViewerEvents};
use crate::state::Viewer;
use crate::ui::canvas::Canvas;

const BUTTON_SIZE: egui::Vec2 = vec2(56.0, 28.0);

// ---------------------------------------------------------------------------
// Title bar
// ---------------------------------------------------------------------------

/// Name of the volume on screen, centred above the panels, with its position
/// in the catalog and the cursor underneath.
pub fn title_bar(ui: &mut Ui, viewer: &Viewer<Canvas>) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(viewer.surface().title());
        ui.label(
            RichText::new(format!(
                "volume {}/{}   cursor {}",
                viewer.catalog_index() + 1,
                viewer.catalog().len(),
                viewer.cursor()
            ))
            .small()
            .weak(),
        );
    });
}

// ---------------------------------------------------------------------------
// Bottom controls – threshold slider and navigation buttons
// ---------------------------------------------------------------------------

/// Render the slider and the `<<` / `>>` buttons and dispatch their events.
pub fn controls(ui: &mut Ui, viewer: &mut Viewer<Canvas>) -> Result<(), VolumeError> {
    ui.add_space(4.0);

    let mut threshold = viewer.threshold();
    ui.spacing_mut().slider_width = ui.available_width() * 0.8;
    let slider = Slider::new(&mut threshold, 0..=THRESHOLD_MAX).text("Thres");
    if ui.add(slider).changed() {
        viewer.on_threshold_change(threshold);
    }

    ui.add_space(4.0);

    let mut step = None;
    ui.horizontal(|ui: &mut Ui| {
        let spacing = ui.spacing().item_spacing.x;
        ui.add_space(((ui.available_width() - 2.0 * BUTTON_SIZE.x - spacing) / 2.0).max(0.0));
        if nav_button(ui, "<<").clicked() {
            step = Some(Step::Previous);
        }
        if nav_button(ui, ">>").clicked() {
            step = Some(Step::Next);
        }
    });

    ui.add_space(4.0);

    match step {
        Some(step) => viewer.on_navigate(step),
        None => Ok(()),
    }
}

fn nav_button(ui: &mut Ui, label: &str) -> egui::Response {
    ui.add(Button::new(label).fill(Color32::WHITE).min_size(BUTTON_SIZE))
}
