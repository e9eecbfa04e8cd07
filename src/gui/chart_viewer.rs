//! Chart Viewer Widget
//! Central panel displaying the aggregated annual chart.

use crate::charts::{ChartKind, ChartPlotter, PlotTheme};
use crate::data::AnnualReport;
use egui::RichText;

/// Central chart display area.
#[derive(Default)]
pub struct ChartViewer {
    report: Option<AnnualReport>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the current chart
    pub fn clear(&mut self) {
        self.report = None;
    }

    pub fn set_report(&mut self, report: AnnualReport) {
        self.report = Some(report);
    }

    pub fn report(&self) -> Option<&AnnualReport> {
        self.report.as_ref()
    }

    /// Draw the selected chart for the current report.
    pub fn show(&mut self, ui: &mut egui::Ui, kind: ChartKind, theme: &PlotTheme) {
        let Some(report) = &self.report else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("Load a CSV and press Plot").size(20.0));
            });
            return;
        };

        if report.temperature.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(
                    RichText::new(format!(
                        "No observations in [{}, {}]",
                        report.range.start, report.range.end
                    ))
                    .size(16.0),
                );
            });
            return;
        }

        ui.vertical(|ui| {
            ui.label(RichText::new(kind.title(report.range)).size(18.0).strong());
            ui.add_space(8.0);
            match kind {
                ChartKind::Scatter => ChartPlotter::draw_scatter(ui, report, theme),
                ChartKind::UncertaintyBand => ChartPlotter::draw_band(ui, report, theme),
            }
        });
    }
}
