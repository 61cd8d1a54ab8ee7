use crate::config::ScanConfig;
use crate::error::{Result, ResultExt};
use crate::scanner::stats;
use crate::types::{AnomalyReport, ColumnAnomalies, ColumnStatistics};
use crate::utils::{column_values, is_missing};
use polars::prelude::*;
use tracing::{debug, trace};

/// Scans DataFrame columns for negative values, spikes, zeros and missing values.
///
/// The scanner holds only its configuration; every call to [`scan`](Self::scan)
/// reads the table and returns a fresh report.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnomalyScanner {
    config: ScanConfig,
}

impl AnomalyScanner {
    /// Create a scanner with a validated configuration.
    pub fn new(config: ScanConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration this scanner applies.
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scan the named columns of `df`, in order.
    ///
    /// Names that are not columns of `df` are skipped without error. A name
    /// given twice is reported twice.
    ///
    /// Numeric and boolean columns are accepted. A requested column of any
    /// other dtype (strings, dates, ...) fails the whole call with
    /// [`ScanError::NonNumericColumn`](crate::ScanError::NonNumericColumn)
    /// and no partial report is returned.
    pub fn scan<S: AsRef<str>>(
        &self,
        df: &DataFrame,
        column_names: &[S],
    ) -> Result<AnomalyReport> {
        let config = self.config();
        debug!(
            "Scanning {} requested column(s) over {} rows (spike_sigma={}, missing_values={:?})",
            column_names.len(),
            df.height(),
            config.spike_sigma,
            config.missing_values
        );

        let mut rows = Vec::with_capacity(column_names.len());
        for name in column_names {
            let name = name.as_ref();
            let Ok(column) = df.column(name) else {
                trace!("Skipping '{}': not a column of the dataset", name);
                continue;
            };

            let values = column_values(column).context(format!("Reading column '{}'", name))?;
            rows.push(self.scan_values(name, &values));
        }

        debug!("Anomaly scan produced {} row(s)", rows.len());
        Ok(AnomalyReport::from_rows(rows))
    }

    /// Apply the four anomaly rules to one column's values.
    ///
    /// Missing entries are NaN. NaN fails every comparison, so it is never
    /// counted as negative, zero or (through a NaN mean or threshold) a spike.
    pub fn scan_values(&self, column_name: &str, values: &[f64]) -> ColumnAnomalies {
        let policy = self.config.missing_values;
        let mean = stats::mean(values, policy);
        let std = stats::sample_std(values, mean, policy);
        let spike_threshold = self.config.spike_sigma * std;

        let negative_values = values.iter().filter(|&&v| v < 0.0).count();
        let spikes = values
            .iter()
            .filter(|&&v| (v - mean).abs() > spike_threshold)
            .count();
        let zeros = values.iter().filter(|&&v| v == 0.0).count();
        let nan_values = values.iter().filter(|&&v| is_missing(v)).count();

        debug!(
            "Column '{}': negative={} spikes={} zeros={} nan={} (mean={:.4}, std={:.4}, threshold={:.4})",
            column_name, negative_values, spikes, zeros, nan_values, mean, std, spike_threshold
        );

        ColumnAnomalies {
            column_name: column_name.to_string(),
            negative_values,
            spikes,
            zeros,
            nan_values,
            statistics: ColumnStatistics {
                len: values.len(),
                mean,
                std,
                spike_threshold,
            },
        }
    }
}

/// Scan `column_names` of `df` with the default configuration.
///
/// Defaults are a 4-sigma spike threshold and missing-value propagation: a
/// column containing any missing value reports zero spikes. See
/// [`MissingValuePolicy`](crate::MissingValuePolicy) to opt out.
///
/// A requested column that is neither numeric nor boolean fails the whole
/// call; see [`AnomalyScanner::scan`].
pub fn detect_anomalies<S: AsRef<str>>(
    df: &DataFrame,
    column_names: &[S],
) -> Result<AnomalyReport> {
    AnomalyScanner::default().scan(df, column_names)
}
