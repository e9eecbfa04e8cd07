//! CSV Data Loader Module
//! Handles climate CSV loading and column validation using Polars.

use polars::prelude::*;
use std::path::PathBuf;
use thiserror::Error;

/// Observation date column of the expected CSV layout.
pub const DATE_COL: &str = "dt";
/// Average temperature column (Celsius).
pub const TEMPERATURE_COL: &str = "AverageTemperature";
/// Uncertainty around the average temperature.
pub const UNCERTAINTY_COL: &str = "AverageTemperatureUncertainty";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("Column '{name}' did not parse as a date (got {dtype})")]
    NotADate {
        name: &'static str,
        dtype: DataType,
    },
    #[error("No data loaded")]
    NoData,
}

/// Handles CSV file loading with Polars for high performance.
pub struct DataLoader {
    df: Option<DataFrame>,
    file_path: Option<PathBuf>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            df: None,
            file_path: None,
        }
    }

    /// Load a climate CSV using Polars.
    pub fn load_csv(&mut self, file_path: &str) -> Result<&DataFrame, LoaderError> {
        self.file_path = Some(PathBuf::from(file_path));

        let df = Self::read_csv(file_path)?;

        self.df = Some(df);
        self.df.as_ref().ok_or(LoaderError::NoData)
    }

    /// Read and validate a climate CSV (also used by the async load path).
    ///
    /// The `dt` column is parsed into date values during the scan; the
    /// temperature and uncertainty columns keep their literal CSV types.
    pub fn read_csv(file_path: &str) -> Result<DataFrame, LoaderError> {
        // Use lazy evaluation for memory efficiency, then collect
        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(10_000))
            .with_try_parse_dates(true)
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        Self::validate(&df)?;
        log::info!("loaded {} observations from {}", df.height(), file_path);
        Ok(df)
    }

    /// Check that the three expected columns exist and that `dt` is a date.
    fn validate(df: &DataFrame) -> Result<(), LoaderError> {
        for name in [TEMPERATURE_COL, UNCERTAINTY_COL] {
            if df.column(name).is_err() {
                return Err(LoaderError::MissingColumn(name));
            }
        }

        let date = df
            .column(DATE_COL)
            .map_err(|_| LoaderError::MissingColumn(DATE_COL))?;
        match date.dtype() {
            DataType::Date | DataType::Datetime(_, _) => Ok(()),
            other => Err(LoaderError::NotADate {
                name: DATE_COL,
                dtype: other.clone(),
            }),
        }
    }

    /// Get the number of rows in the DataFrame.
    pub fn get_row_count(&self) -> usize {
        self.df.as_ref().map(|df| df.height()).unwrap_or(0)
    }

    /// Get a reference to the loaded DataFrame.
    pub fn get_dataframe(&self) -> Option<&DataFrame> {
        self.df.as_ref()
    }

    /// Get file path.
    pub fn get_file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }

    /// Set DataFrame directly (used for async loading)
    pub fn set_dataframe(&mut self, df: DataFrame) {
        self.df = Some(df);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_csv(dir: &tempfile::TempDir, name: &str, content: &str) -> String {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path.to_string_lossy().to_string()
    }

    #[test]
    fn loads_valid_csv_with_parsed_dates() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "valid.csv",
            "dt,AverageTemperature,AverageTemperatureUncertainty\n\
             2000-01-01,10.5,1.0\n\
             2000-02-01,11.5,0.8\n",
        );

        let mut loader = DataLoader::new();
        let df = loader.load_csv(&path).unwrap();

        assert_eq!(df.height(), 2);
        assert_eq!(df.column(DATE_COL).unwrap().dtype(), &DataType::Date);
        assert_eq!(loader.get_row_count(), 2);
        assert!(loader.get_file_path().is_some());
    }

    #[test]
    fn missing_value_cells_load_as_null() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "gaps.csv",
            "dt,AverageTemperature,AverageTemperatureUncertainty\n\
             2000-01-01,,1.0\n\
             2000-02-01,11.5,\n",
        );

        let mut loader = DataLoader::new();
        let df = loader.load_csv(&path).unwrap();

        assert_eq!(df.column(TEMPERATURE_COL).unwrap().null_count(), 1);
        assert_eq!(df.column(UNCERTAINTY_COL).unwrap().null_count(), 1);
    }

    #[test]
    fn rejects_missing_uncertainty_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "partial.csv",
            "dt,AverageTemperature\n2000-01-01,10.5\n",
        );

        let err = DataLoader::new().load_csv(&path).unwrap_err();
        assert!(matches!(err, LoaderError::MissingColumn(UNCERTAINTY_COL)));
    }

    #[test]
    fn rejects_unparseable_date_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "baddates.csv",
            "dt,AverageTemperature,AverageTemperatureUncertainty\n\
             first of January,10.5,1.0\n",
        );

        let err = DataLoader::new().load_csv(&path).unwrap_err();
        assert!(matches!(err, LoaderError::NotADate { name: DATE_COL, .. }));
    }

    #[test]
    fn propagates_read_failure_for_missing_file() {
        let err = DataLoader::new()
            .load_csv("/nonexistent/observations.csv")
            .unwrap_err();
        assert!(matches!(err, LoaderError::CsvError(_)));
    }
}
