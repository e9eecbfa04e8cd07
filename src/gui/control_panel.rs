//! Control Panel Widget
//! Left side panel with data selection and chart controls.

use crate::charts::ChartKind;
use crate::data::YearRange;
use egui::{Color32, RichText};
use std::path::PathBuf;

/// User settings for one analysis pass.
#[derive(Clone)]
pub struct UserSettings {
    pub csv_path: Option<PathBuf>,
    pub start_year: i32,
    pub end_year: i32,
    pub chart: ChartKind,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            csv_path: None,
            start_year: 1900,
            end_year: 2000,
            chart: ChartKind::Scatter,
        }
    }
}

impl UserSettings {
    pub fn year_range(&self) -> YearRange {
        YearRange::new(self.start_year, self.end_year)
    }
}

/// Left side control panel with file selection and plotting controls.
pub struct ControlPanel {
    pub settings: UserSettings,
    pub data_bounds: Option<YearRange>,
    pub progress: f32,
    pub status: String,
    pub plot_enabled: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            settings: UserSettings::default(),
            data_bounds: None,
            progress: 0.0,
            status: "Ready".to_string(),
            plot_enabled: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the observed year bounds after CSV load and pre-fill the range.
    pub fn update_bounds(&mut self, bounds: Option<YearRange>) {
        self.data_bounds = bounds;
        if let Some(bounds) = bounds {
            self.settings.start_year = bounds.start;
            self.settings.end_year = bounds.end;
        }
        self.plot_enabled = bounds.is_some();
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🌡 Thermoscope")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Annual Temperature Viewer")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== CSV File Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .settings
                        .csv_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());

                    ui.label(RichText::new(&path_text).size(12.0).color(
                        if self.settings.csv_path.is_some() {
                            Color32::WHITE
                        } else {
                            Color32::GRAY
                        },
                    ));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Browse").clicked() {
                            action = ControlPanelAction::BrowseCsv;
                        }
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Year Range Section =====
        ui.label(RichText::new("📅 Year Range").size(14.0).strong());
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.label("From:");
            ui.add(egui::DragValue::new(&mut self.settings.start_year).speed(1));
            ui.label("to:");
            ui.add(egui::DragValue::new(&mut self.settings.end_year).speed(1));
            ui.label(
                RichText::new(format!("({} years)", self.settings.year_range().span()))
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });

        if let Some(bounds) = self.data_bounds {
            ui.add_space(5.0);
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(format!("Data covers {}..{}", bounds.start, bounds.end))
                        .size(11.0)
                        .color(Color32::GRAY),
                );
                if ui.small_button("Full range").clicked() {
                    self.settings.start_year = bounds.start;
                    self.settings.end_year = bounds.end;
                }
            });
        }

        if self.settings.start_year > self.settings.end_year {
            ui.add_space(3.0);
            ui.label(
                RichText::new("Inverted range selects no observations")
                    .size(11.0)
                    .color(Color32::from_rgb(243, 156, 18)),
            );
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Chart Section =====
        ui.label(RichText::new("📈 Chart").size(14.0).strong());
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.radio_value(
                &mut self.settings.chart,
                ChartKind::Scatter,
                ChartKind::Scatter.label(),
            );
            ui.radio_value(
                &mut self.settings.chart,
                ChartKind::UncertaintyBand,
                ChartKind::UncertaintyBand.label(),
            );
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.plot_enabled, |ui| {
                let button = egui::Button::new(RichText::new("▶ Plot").size(16.0))
                    .min_size(egui::vec2(180.0, 35.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::Plot;
                }
            });

            ui.add_space(8.0);

            // Export button (enabled after a chart is ready)
            let export_enabled = self.progress >= 100.0 && self.status.contains("Complete");
            ui.add_enabled_ui(export_enabled, |ui| {
                let export_button = egui::Button::new(RichText::new("🖼 Export PNG").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(export_button).clicked() {
                    action = ControlPanelAction::ExportPng;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Progress Section =====
        ui.label(RichText::new("📊 Progress").size(14.0).strong());
        ui.add_space(5.0);

        ui.add(
            egui::ProgressBar::new(self.progress / 100.0)
                .show_percentage()
                .animate(self.progress > 0.0 && self.progress < 100.0),
        );

        ui.add_space(5.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Complete") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Set progress and status
    pub fn set_progress(&mut self, progress: f32, status: &str) {
        self.progress = progress;
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    Plot,
    ExportPng,
}
