//! Column Anomaly Scanner
//!
//! Data-quality diagnostics for column-oriented numeric datasets built on
//! Polars, such as time series of physiological measurements.
//!
//! # Overview
//!
//! For each requested column the scanner counts:
//!
//! - **Negative values**: entries strictly below zero
//! - **Spikes**: entries whose distance from the column mean exceeds four
//!   sample standard deviations
//! - **Zeros**: entries exactly equal to zero
//! - **Missing values**: Polars nulls and NaN
//!
//! The input table is only read. Requested names that are not columns of
//! the table are skipped.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use anomaly_scan::detect_anomalies;
//! use polars::prelude::*;
//!
//! let df = df![
//!     "hr" => [70.0, -5.0, 0.0, 72.0, 71.0],
//! ]?;
//!
//! let report = detect_anomalies(&df, &["hr", "spo2"])?;
//! let hr = report.get("hr").unwrap();
//! assert_eq!(hr.negative_values, 1);
//! assert_eq!(hr.zeros, 1);
//!
//! // Five-column table: column_name, negative_values, spikes, zeros, nan_values
//! println!("{}", report.to_dataframe()?);
//! ```
//!
//! # Missing values and spikes
//!
//! By default the mean and standard deviation are computed over the raw
//! column, so **a single missing value disables spike detection for that
//! column** and it reports zero spikes. Use
//! [`ColumnAnomalies::spike_detection_suppressed`] to tell such columns
//! apart, or opt into [`MissingValuePolicy::Skip`]:
//!
//! ```rust,ignore
//! use anomaly_scan::{AnomalyScanner, MissingValuePolicy, ScanConfig};
//!
//! let config = ScanConfig::builder()
//!     .missing_values(MissingValuePolicy::Skip)
//!     .build()?;
//!
//! let report = AnomalyScanner::new(config)?.scan(&df, &["hr"])?;
//! ```

pub mod config;
pub mod error;
pub mod scanner;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use config::{
    ConfigValidationError, DEFAULT_SPIKE_SIGMA, MissingValuePolicy, ScanConfig, ScanConfigBuilder,
};
pub use error::{Result as ScanResult, ResultExt, ScanError};
pub use scanner::{AnomalyScanner, detect_anomalies};
pub use types::{AnomalyReport, AnomalyTotals, ColumnAnomalies, ColumnStatistics, REPORT_COLUMNS};
pub use utils::{column_values, is_missing, is_numeric_dtype, is_scannable_dtype};
