//! Data module - CSV loading and year aggregation

mod aggregator;
mod loader;

pub use aggregator::{AggregateError, AnnualReport, AnnualSeries, YearAggregator, YearRange};
pub use loader::{DataLoader, LoaderError};
