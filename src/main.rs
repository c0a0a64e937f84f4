mod app;
mod color;
mod data;
mod events;
mod state;
mod surface;
mod ui;

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Context;
use app::OctViewerApp;
use clap::Parser;
use eframe::egui;

use data::catalog::Catalog;
use state::Viewer;
use ui::canvas::Canvas;

#[derive(Parser, Debug)]
#[command(version, about = "Browse OCT volumes stored as .npy arrays")]
struct Args {
    /// Directory containing the volumes (*.npy).
    #[arg(default_value = ".")]
    data_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let catalog = Catalog::scan(&args.data_dir)?;
    let viewer = Viewer::open(catalog, Canvas::default()).context("loading the first volume")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([700.0, 700.0])
            .with_min_inner_size([400.0, 400.0]),
        ..Default::default()
    };

    let failure = Rc::new(RefCell::new(None));
    let app_failure = Rc::clone(&failure);
    eframe::run_native(
        "OCT Viewer",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::light());
            cc.egui_ctx
                .style_mut(|style| style.visuals.panel_fill = color::BACKGROUND);
            Ok(Box::new(OctViewerApp::new(viewer, app_failure)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("running the viewer window: {e}"))?;

    if let Some(err) = failure.take() {
        return Err(err);
    }
    Ok(())
}
