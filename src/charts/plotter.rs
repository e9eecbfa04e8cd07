//! Chart Plotter Module
//! Creates interactive annual temperature charts using egui_plot.

use egui::{Color32, Stroke};
use egui_plot::{Legend, Line, Plot, Points, Polygon};

use crate::charts::colormap;
use crate::data::{AnnualReport, YearRange};

/// Chart styling, passed explicitly into every render and export call.
#[derive(Debug, Clone)]
pub struct PlotTheme {
    pub point_radius: f32,
    pub point_alpha: f32,
    /// Years of horizontal padding added on each side of the range.
    pub x_padding_years: i32,
    pub line_color: Color32,
    pub line_width: f32,
    pub band_color: Color32,
    pub band_alpha: f32,
}

impl Default for PlotTheme {
    fn default() -> Self {
        Self {
            point_radius: 6.0,
            point_alpha: 0.6,
            x_padding_years: 5,
            line_color: Color32::from_rgb(31, 119, 180),
            line_width: 3.0,
            band_color: Color32::from_rgb(147, 112, 219),
            band_alpha: 0.35,
        }
    }
}

/// Which chart the viewer renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Scatter,
    UncertaintyBand,
}

impl ChartKind {
    pub fn label(&self) -> &'static str {
        match self {
            ChartKind::Scatter => "Annual averages",
            ChartKind::UncertaintyBand => "Uncertainty band",
        }
    }

    pub fn title(&self, range: YearRange) -> String {
        match self {
            ChartKind::Scatter => {
                format!("Average Global Temperatures [{}, {}]", range.start, range.end)
            }
            ChartKind::UncertaintyBand => format!(
                "Average Global Temperatures and Uncertainty Field [{}, {}]",
                range.start, range.end
            ),
        }
    }
}

/// Creates annual temperature visualizations using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Scatter of per-year means, point color mapped to the mean value.
    pub fn draw_scatter(ui: &mut egui::Ui, report: &AnnualReport, theme: &PlotTheme) {
        let series = &report.temperature;
        let bounds = colormap::finite_bounds(&series.means);
        let (x_min, x_max) = Self::x_limits(report.range, theme);
        let alpha = theme.point_alpha;
        let radius = theme.point_radius;

        Plot::new("annual_scatter")
            .x_axis_label("Year")
            .y_axis_label("Temperature (Celsius)")
            .include_x(x_min)
            .include_x(x_max)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                let Some((min, max)) = bounds else { return };

                for (year, mean) in series.iter() {
                    if mean.is_nan() {
                        continue;
                    }
                    let t = colormap::normalize(mean, min, max);
                    let color = colormap::thermal_color(t).gamma_multiply(alpha);
                    plot_ui.points(
                        Points::new(vec![[year as f64, mean]])
                            .radius(radius)
                            .color(color),
                    );
                }
            });
    }

    /// Mean-temperature line with a shaded mean ± uncertainty envelope.
    pub fn draw_band(ui: &mut egui::Ui, report: &AnnualReport, theme: &PlotTheme) {
        let mut upper: Vec<[f64; 2]> = Vec::new();
        let mut lower: Vec<[f64; 2]> = Vec::new();
        let mut center: Vec<[f64; 2]> = Vec::new();

        for ((year, mean), (_, unc)) in report.temperature.iter().zip(report.uncertainty.iter()) {
            if mean.is_nan() || unc.is_nan() {
                continue;
            }
            let x = year as f64;
            upper.push([x, mean + unc]);
            lower.push([x, mean - unc]);
            center.push([x, mean]);
        }

        // Envelope polygon: upper edge left-to-right, lower edge back
        let band: Vec<[f64; 2]> = upper
            .iter()
            .copied()
            .chain(lower.iter().rev().copied())
            .collect();
        let band_fill = theme.band_color.gamma_multiply(theme.band_alpha);
        let (x_min, x_max) = Self::x_limits(report.range, theme);

        let line_color = theme.line_color;
        let line_width = theme.line_width;
        let band_color = theme.band_color;

        Plot::new("uncertainty_band")
            .x_axis_label("Year")
            .y_axis_label("Temperature (Celsius)")
            .include_x(x_min)
            .include_x(x_max)
            .allow_scroll(false)
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                plot_ui.polygon(
                    Polygon::new(band)
                        .fill_color(band_fill)
                        .stroke(Stroke::new(1.0, band_fill)),
                );
                plot_ui.line(
                    Line::new(upper)
                        .color(band_color)
                        .width(1.0)
                        .name("Average Uncertainty Field"),
                );
                plot_ui.line(Line::new(lower).color(band_color).width(1.0));
                plot_ui.line(
                    Line::new(center)
                        .color(line_color)
                        .width(line_width)
                        .name("Average Temperature"),
                );
            });
    }

    fn x_limits(range: YearRange, theme: &PlotTheme) -> (f64, f64) {
        (
            (range.start - theme.x_padding_years) as f64,
            (range.end + theme.x_padding_years) as f64,
        )
    }
}
