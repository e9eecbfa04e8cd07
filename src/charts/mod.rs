//! Charts module - interactive rendering and static export

mod colormap;
pub mod export;
mod plotter;

pub use plotter::{ChartKind, ChartPlotter, PlotTheme};
