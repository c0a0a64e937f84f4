use std::cell::RefCell;
use std::rc::Rc;

use eframe::egui;

use crate::data::error::VolumeError;
use crate::events::{Key, ViewerEvents};
use crate::state::Viewer;
use crate::ui::canvas::Canvas;
use crate::ui::{panels, slices};

/// Where a fatal error is handed back to `main` once the window closes.
pub type FailureSlot = Rc<RefCell<Option<anyhow::Error>>>;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct OctViewerApp {
    viewer: Viewer<Canvas>,
    failure: FailureSlot,
}

impl OctViewerApp {
    pub fn new(viewer: Viewer<Canvas>, failure: FailureSlot) -> Self {
        Self { viewer, failure }
    }

    /// A volume that cannot be loaded ends the session.
    fn check(&mut self, ctx: &egui::Context, result: Result<(), VolumeError>) {
        let Err(err) = result else {
            return;
        };
        let path = self
            .viewer
            .catalog()
            .path(self.viewer.catalog_index())
            .display()
            .to_string();
        log::error!("Failed to load {path}: {err}");
        *self.failure.borrow_mut() = Some(anyhow::Error::new(err).context(format!("loading {path}")));
        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }
}

impl eframe::App for OctViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Keyboard navigation ----
        if let Some(key) = pressed_key(ctx) {
            let result = self.viewer.on_key_press(key);
            self.check(ctx, result);
        }

        // ---- Top panel: volume name and cursor ----
        egui::TopBottomPanel::top("title_bar").show(ctx, |ui| {
            panels::title_bar(ui, &self.viewer);
        });

        // ---- Bottom panel: slider and buttons ----
        let result = egui::TopBottomPanel::bottom("controls")
            .show(ctx, |ui| panels::controls(ui, &mut self.viewer))
            .inner;
        self.check(ctx, result);

        // ---- Central panel: cross-sections ----
        egui::CentralPanel::default().show(ctx, |ui| {
            slices::slice_grid(ui, &mut self.viewer);
        });

        if self.viewer.surface_mut().take_redraw_request() {
            ctx.request_repaint();
        }
    }
}

/// First key pressed this frame, unless a widget has keyboard focus.
fn pressed_key(ctx: &egui::Context) -> Option<Key> {
    if ctx.memory(|mem| mem.focused().is_some()) {
        return None;
    }
    ctx.input(|input| {
        input.events.iter().find_map(|event| match event {
            egui::Event::Key {
                key, pressed: true, ..
            } => Some(match key {
                egui::Key::ArrowRight => Key::Right,
                egui::Key::ArrowLeft => Key::Left,
                _ => Key::Other,
            }),
            _ => None,
        })
    })
}
