//! deformview - Deformed music visualizer
//!
//! Draws the bands of the "deformed music" problem and lets you pan, zoom and
//! retype the note counts live.

mod app;

use app::DeformViewApp;
use deformcore::{DeformTheme, VisualizerConfig};
use eframe::NativeOptions;

fn main() -> eframe::Result<()> {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let config = VisualizerConfig::from_env();
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_title(config.title.clone()),
        ..Default::default()
    };

    eframe::run_native(
        "deformview",
        options,
        Box::new(move |cc| {
            let theme = DeformTheme::default();
            theme.apply(&cc.egui_ctx);
            Box::new(DeformViewApp::new(cc, theme, config))
        }),
    )
}
