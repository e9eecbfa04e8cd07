//! Thermoscope - Climate CSV Analysis & Annual Temperature Chart Viewer
//!
//! A Rust application for aggregating historical temperature observations
//! into per-year averages and displaying them as interactive charts.

mod charts;
mod data;
mod gui;

use eframe::egui;
use gui::ThermoscopeApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 700.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Thermoscope"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Thermoscope",
        options,
        Box::new(|cc| Ok(Box::new(ThermoscopeApp::new(cc)))),
    )
}
