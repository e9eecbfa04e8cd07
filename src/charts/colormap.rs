//! Thermal colormap for value-mapped scatter points.

use egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

/// Hue endpoints of the gradient in degrees: cold blue through hot red.
const COLD_HUE: f32 = 240.0;
const HOT_HUE: f32 = 0.0;

/// Map a normalized value in [0, 1] to a thermal color.
pub fn thermal_color(t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let hue = COLD_HUE + (HOT_HUE - COLD_HUE) * t;
    let hsl = Hsl::new(hue, 0.75, 0.55);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Normalize `value` over `[min, max]`; a degenerate range maps to 0.5.
pub fn normalize(value: f64, min: f64, max: f64) -> f32 {
    let span = max - min;
    if span.abs() < f64::EPSILON {
        0.5
    } else {
        (((value - min) / span) as f32).clamp(0.0, 1.0)
    }
}

/// Finite min/max over a slice, skipping NANs. `None` when nothing is finite.
pub fn finite_bounds(values: &[f64]) -> Option<(f64, f64)> {
    let mut bounds: Option<(f64, f64)> = None;
    for &v in values {
        if v.is_nan() {
            continue;
        }
        bounds = Some(match bounds {
            Some((lo, hi)) => (lo.min(v), hi.max(v)),
            None => (v, v),
        });
    }
    bounds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_runs_cold_to_hot() {
        let cold = thermal_color(0.0);
        let hot = thermal_color(1.0);
        assert!(cold.b() > cold.r());
        assert!(hot.r() > hot.b());
    }

    #[test]
    fn out_of_range_input_is_clamped() {
        assert_eq!(thermal_color(-3.0), thermal_color(0.0));
        assert_eq!(thermal_color(42.0), thermal_color(1.0));
    }

    #[test]
    fn normalize_maps_into_unit_interval() {
        assert_eq!(normalize(5.0, 0.0, 10.0), 0.5);
        assert_eq!(normalize(0.0, 0.0, 10.0), 0.0);
        assert_eq!(normalize(10.0, 0.0, 10.0), 1.0);
        // degenerate range
        assert_eq!(normalize(7.0, 7.0, 7.0), 0.5);
    }

    #[test]
    fn finite_bounds_skip_nan() {
        let values = [f64::NAN, 2.0, -1.0, f64::NAN, 4.0];
        assert_eq!(finite_bounds(&values), Some((-1.0, 4.0)));
        assert_eq!(finite_bounds(&[f64::NAN]), None);
        assert_eq!(finite_bounds(&[]), None);
    }
}
