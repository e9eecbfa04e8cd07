//! Thermoscope Main Application
//! Main window wiring the loader, control panel, and chart viewer.

use crate::charts::{export, PlotTheme};
use crate::data::{AnnualReport, DataLoader, YearAggregator, YearRange};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::SidePanel;
use polars::prelude::*;
use std::sync::mpsc::{channel, Receiver};
use std::thread;

/// CSV loading result from background thread
enum LoadResult {
    Progress(String),
    Complete {
        df: DataFrame,
        row_count: usize,
        bounds: Option<YearRange>,
    },
    Error(String),
}

/// Aggregation result from background thread
enum PlotResult {
    Complete(AnnualReport),
    Error(String),
}

/// Main application window.
pub struct ThermoscopeApp {
    loader: DataLoader,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
    theme: PlotTheme,

    // Async CSV loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,

    // Async aggregation
    plot_rx: Option<Receiver<PlotResult>>,
    is_plotting: bool,
}

impl ThermoscopeApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            loader: DataLoader::new(),
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
            theme: PlotTheme::default(),
            load_rx: None,
            is_loading: false,
            plot_rx: None,
            is_plotting: false,
        }
    }

    /// Handle CSV file selection - loads on a background thread.
    fn handle_browse_csv(&mut self) {
        if self.is_loading {
            return; // Already loading
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            // Clear the previous chart
            self.chart_viewer.clear();
            self.control_panel.settings.csv_path = Some(path.clone());
            self.control_panel.set_progress(0.0, "Loading CSV file...");
            self.is_loading = true;

            let (tx, rx) = channel();
            self.load_rx = Some(rx);

            let path_str = path.to_string_lossy().to_string();

            // Load CSV in background thread
            thread::spawn(move || {
                let _ = tx.send(LoadResult::Progress("Reading CSV file...".to_string()));

                match DataLoader::read_csv(&path_str) {
                    Ok(df) => {
                        let bounds = match YearAggregator::year_bounds(&df) {
                            Ok(bounds) => bounds,
                            Err(e) => {
                                let _ = tx.send(LoadResult::Error(e.to_string()));
                                return;
                            }
                        };
                        let row_count = df.height();
                        let _ = tx.send(LoadResult::Complete {
                            df,
                            row_count,
                            bounds,
                        });
                    }
                    Err(e) => {
                        let _ = tx.send(LoadResult::Error(e.to_string()));
                    }
                }
            });
        }
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Progress(status) => {
                        self.control_panel.set_progress(0.0, &status);
                    }
                    LoadResult::Complete {
                        df,
                        row_count,
                        bounds,
                    } => {
                        self.loader.set_dataframe(df);
                        self.control_panel.update_bounds(bounds);
                        self.control_panel
                            .set_progress(0.0, &format!("Loaded {} observations", row_count));
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                    LoadResult::Error(error) => {
                        log::error!("CSV load failed: {error}");
                        self.control_panel
                            .set_progress(0.0, &format!("Error: {}", error));
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    /// Start aggregation in background thread
    fn start_plot(&mut self) {
        let Some(df) = self.loader.get_dataframe().cloned() else {
            self.control_panel.set_progress(0.0, "No data loaded");
            return;
        };
        let range = self.control_panel.settings.year_range();

        let (tx, rx) = channel();
        self.plot_rx = Some(rx);
        self.is_plotting = true;
        self.control_panel
            .set_progress(30.0, "Aggregating observations...");

        thread::spawn(move || match YearAggregator::annual_report(&df, range) {
            Ok(report) => {
                let _ = tx.send(PlotResult::Complete(report));
            }
            Err(e) => {
                let _ = tx.send(PlotResult::Error(e.to_string()));
            }
        });
    }

    /// Check for aggregation results
    fn check_plot_results(&mut self) {
        let rx = self.plot_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    PlotResult::Complete(report) => {
                        let years = report.temperature.len();
                        self.chart_viewer.set_report(report);
                        self.control_panel
                            .set_progress(100.0, &format!("Complete! {} years aggregated", years));
                        self.is_plotting = false;
                        should_keep_receiver = false;
                    }
                    PlotResult::Error(error) => {
                        log::error!("aggregation failed: {error}");
                        self.control_panel
                            .set_progress(0.0, &format!("Error: {}", error));
                        self.is_plotting = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.plot_rx = Some(rx);
            }
        }
    }

    /// Handle PNG export - renders the current chart and opens the result
    fn handle_export_png(&mut self) {
        let Some(report) = self.chart_viewer.report() else {
            self.control_panel.set_progress(0.0, "No chart to export");
            return;
        };

        let file_name = self
            .loader
            .get_file_path()
            .and_then(|p| p.file_stem())
            .map(|s| format!("{}_annual.png", s.to_string_lossy()))
            .unwrap_or_else(|| "annual_temperatures.png".to_string());

        // Ask user for output location
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name(file_name)
            .save_file()
        else {
            return; // User cancelled
        };

        let kind = self.control_panel.settings.chart;
        match export::export_png(&path, report, kind, &self.theme) {
            Ok(()) => {
                self.control_panel
                    .set_progress(100.0, &format!("Exported {}", path.display()));
                if let Err(e) = open::that(&path) {
                    log::warn!("could not open {}: {e}", path.display());
                }
            }
            Err(e) => {
                self.control_panel
                    .set_progress(0.0, &format!("Export error: {}", e));
            }
        }
    }
}

impl eframe::App for ThermoscopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_load_results();
        self.check_plot_results();

        // Request repaint while loading or aggregating
        if self.is_loading || self.is_plotting {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(330.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::Plot => {
                            if !self.is_plotting {
                                self.start_plot();
                            }
                        }
                        ControlPanelAction::ExportPng => self.handle_export_png(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer
                .show(ui, self.control_panel.settings.chart, &self.theme);
        });
    }
}
