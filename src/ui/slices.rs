use eframe::egui::{self, vec2, Response, Ui, Vec2};
use egui_plot::{HLine, Plot, PlotImage, PlotPoint, VLine};

use crate::color::GUIDE_COLOR;
use crate::data::model::SliceAxis;
use crate::events::{PointerButton, ViewerEvents};
use crate::state::Viewer;
use crate::ui::canvas::{Canvas, SlicePanel};

// ---------------------------------------------------------------------------
// 2×2 panel grid (central panel)
// ---------------------------------------------------------------------------

/// A drag reported by one of the slice panels, in image coordinates.
struct PointerDrag {
    button: PointerButton,
    view: SliceAxis,
    x: f64,
    y: f64,
}

/// Render the three cross-sections and the (hidden) volume panel, and forward
/// pointer drags to the viewer.
pub fn slice_grid(ui: &mut Ui, viewer: &mut Viewer<Canvas>) {
    let spacing = ui.spacing().item_spacing;
    let available = ui.available_size();
    let cell = vec2(
        ((available.x - spacing.x) / 2.0).max(1.0),
        ((available.y - spacing.y) / 2.0).max(1.0),
    );

    let mut drag = None;
    ui.horizontal(|ui: &mut Ui| {
        for axis in [SliceAxis::Z, SliceAxis::X] {
            let panel = viewer.surface_mut().panel_mut(axis);
            drag = drag.take().or(slice_panel(ui, panel, axis, cell));
        }
    });
    ui.horizontal(|ui: &mut Ui| {
        let panel = viewer.surface_mut().panel_mut(SliceAxis::Y);
        drag = drag.take().or(slice_panel(ui, panel, SliceAxis::Y, cell));
        volume_panel(ui, viewer.surface().volume_panel_visible(), cell);
    });

    if let Some(PointerDrag { button, view, x, y }) = drag {
        viewer.on_pointer_drag(button, view, x, y);
    }
}

/// One cross-section: the image stretched to the cell, plus guide lines.
///
/// Plot coordinates put pixel `(row, column)` at `x ∈ [column, column + 1)`,
/// `y ∈ (-row - 1, -row]`, so row 0 is at the top as in an image viewer.
fn slice_panel(ui: &mut Ui, panel: &mut SlicePanel, axis: SliceAxis, size: Vec2) -> Option<PointerDrag> {
    let ctx = ui.ctx().clone();
    let Some(texture) = panel.texture(&ctx, &format!("slice_{axis}")) else {
        ui.allocate_space(size);
        return None;
    };
    let texture_id = texture.id();

    let width = panel.columns as f64;
    let height = panel.rows as f64;
    let vertical = panel.vertical_guide as f64 + 0.5;
    let horizontal = -(panel.horizontal_guide as f64 + 0.5);

    let plot_response = Plot::new(("slice_panel", axis.index()))
        .width(size.x)
        .height(size.y)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .allow_double_click_reset(false)
        .set_margin_fraction(Vec2::ZERO)
        .include_x(0.0)
        .include_x(width)
        .include_y(0.0)
        .include_y(-height)
        .show(ui, |plot_ui| {
            plot_ui.image(PlotImage::new(
                texture_id,
                PlotPoint::new(width / 2.0, -height / 2.0),
                vec2(panel.columns as f32, panel.rows as f32),
            ));
            plot_ui.vline(VLine::new(vertical).color(GUIDE_COLOR).width(1.0));
            plot_ui.hline(HLine::new(horizontal).color(GUIDE_COLOR).width(1.0));
            plot_ui.pointer_coordinate()
        });

    let pointer = plot_response.inner?;
    let button = dragging_button(&plot_response.response)?;
    let (x, y) = (pointer.x, -pointer.y);
    if !(0.0..width).contains(&x) || !(0.0..height).contains(&y) {
        return None;
    }
    Some(PointerDrag {
        button,
        view: axis,
        x,
        y,
    })
}

/// Reserved space for the 3-D view; it stays empty.
fn volume_panel(ui: &mut Ui, visible: bool, size: Vec2) {
    let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
    if visible {
        ui.painter().rect_stroke(
            rect,
            0.0,
            ui.visuals().widgets.noninteractive.bg_stroke,
            egui::StrokeKind::Inside,
        );
    }
}

fn dragging_button(response: &Response) -> Option<PointerButton> {
    [
        (egui::PointerButton::Primary, PointerButton::Primary),
        (egui::PointerButton::Secondary, PointerButton::Secondary),
        (egui::PointerButton::Middle, PointerButton::Middle),
    ]
    .into_iter()
    .find(|(egui_button, _)| response.dragged_by(*egui_button))
    .map(|(_, button)| button)
}
