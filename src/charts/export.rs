//! Static Chart Export
//! Renders the selected chart to a PNG file using plotters.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use plotters::coord::{cartesian::Cartesian2d, types::RangedCoordf64};
use plotters::prelude::*;

use crate::charts::colormap;
use crate::charts::plotter::{ChartKind, PlotTheme};
use crate::data::AnnualReport;

const EXPORT_SIZE: (u32, u32) = (1200, 600);

type ExportChart<'a, 'b> =
    ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Render `report` as `kind` into a PNG at `path`.
pub fn export_png(
    path: &Path,
    report: &AnnualReport,
    kind: ChartKind,
    theme: &PlotTheme,
) -> Result<()> {
    let (y_min, y_max) =
        y_bounds(report, kind).context("nothing to export: no finite values in range")?;
    let x_min = (report.range.start - theme.x_padding_years) as f64;
    let x_max = (report.range.end + theme.x_padding_years) as f64;

    let root = BitMapBackend::new(path, EXPORT_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| anyhow!("filling background: {e}"))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(kind.title(report.range), ("sans-serif", 28))
        .margin(12)
        .x_label_area_size(44)
        .y_label_area_size(56)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|e| anyhow!("building chart: {e}"))?;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc("Temperature (Celsius)")
        .draw()
        .map_err(|e| anyhow!("drawing mesh: {e}"))?;

    match kind {
        ChartKind::Scatter => draw_scatter(&mut chart, report, theme)?,
        ChartKind::UncertaintyBand => draw_band(&mut chart, report, theme)?,
    }

    root.present()
        .map_err(|e| anyhow!("writing {}: {e}", path.display()))?;
    log::info!("exported {} chart to {}", kind.label(), path.display());
    Ok(())
}

fn draw_scatter(chart: &mut ExportChart, report: &AnnualReport, theme: &PlotTheme) -> Result<()> {
    let series = &report.temperature;
    let Some((min, max)) = colormap::finite_bounds(&series.means) else {
        return Ok(());
    };

    chart
        .draw_series(
            series
                .iter()
                .filter(|(_, mean)| !mean.is_nan())
                .map(|(year, mean)| {
                    let t = colormap::normalize(mean, min, max);
                    let color = to_rgb(colormap::thermal_color(t));
                    Circle::new(
                        (year as f64, mean),
                        theme.point_radius as i32,
                        color.mix(theme.point_alpha as f64).filled(),
                    )
                }),
        )
        .map_err(|e| anyhow!("drawing points: {e}"))?;
    Ok(())
}

fn draw_band<'a>(chart: &mut ExportChart<'a, 'a>, report: &AnnualReport, theme: &PlotTheme) -> Result<()> {
    let mut upper: Vec<(f64, f64)> = Vec::new();
    let mut lower: Vec<(f64, f64)> = Vec::new();
    let mut center: Vec<(f64, f64)> = Vec::new();

    for ((year, mean), (_, unc)) in report.temperature.iter().zip(report.uncertainty.iter()) {
        if mean.is_nan() || unc.is_nan() {
            continue;
        }
        let x = year as f64;
        upper.push((x, mean + unc));
        lower.push((x, mean - unc));
        center.push((x, mean));
    }

    let band: Vec<(f64, f64)> = upper
        .iter()
        .copied()
        .chain(lower.iter().rev().copied())
        .collect();
    let band_color = to_rgb(theme.band_color);
    let line_color = to_rgb(theme.line_color);

    chart
        .draw_series(std::iter::once(plotters::element::Polygon::new(
            band,
            band_color.mix(theme.band_alpha as f64).filled(),
        )))
        .map_err(|e| anyhow!("drawing band: {e}"))?;

    chart
        .draw_series(LineSeries::new(upper, band_color.stroke_width(1)))
        .map_err(|e| anyhow!("drawing upper envelope: {e}"))?
        .label("Average Uncertainty Field")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], band_color));
    chart
        .draw_series(LineSeries::new(lower, band_color.stroke_width(1)))
        .map_err(|e| anyhow!("drawing lower envelope: {e}"))?;

    chart
        .draw_series(LineSeries::new(
            center,
            line_color.stroke_width(theme.line_width as u32),
        ))
        .map_err(|e| anyhow!("drawing mean line: {e}"))?
        .label("Average Temperature")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_color));

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.85))
        .draw()
        .map_err(|e| anyhow!("drawing legend: {e}"))?;
    Ok(())
}

/// Y limits across whatever the chart will draw, with a little headroom.
fn y_bounds(report: &AnnualReport, kind: ChartKind) -> Option<(f64, f64)> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;

    for ((_, mean), (_, unc)) in report.temperature.iter().zip(report.uncertainty.iter()) {
        if mean.is_nan() {
            continue;
        }
        match kind {
            ChartKind::Scatter => {
                lo = lo.min(mean);
                hi = hi.max(mean);
            }
            ChartKind::UncertaintyBand => {
                if unc.is_nan() {
                    continue;
                }
                lo = lo.min(mean - unc);
                hi = hi.max(mean + unc);
            }
        }
    }

    if lo.is_infinite() {
        return None;
    }
    let pad = ((hi - lo) * 0.1).max(0.5);
    Some((lo - pad, hi + pad))
}

fn to_rgb(color: egui::Color32) -> RGBColor {
    RGBColor(color.r(), color.g(), color.b())
}
