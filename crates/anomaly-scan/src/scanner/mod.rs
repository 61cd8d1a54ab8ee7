//! Per-column anomaly scan.
//!
//! Each requested column is checked independently for four kinds of
//! anomaly: negative values, spikes (deviation from the mean above
//! `spike_sigma` sample standard deviations), exact zeros, and missing values.

mod detector;
mod stats;

pub use detector::{AnomalyScanner, detect_anomalies};
