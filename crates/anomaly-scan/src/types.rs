//! Report types produced by the anomaly scanner.

use crate::error::{Result, ResultExt};
use polars::prelude::*;
use serde::{Deserialize, Deserializer, Serialize};

/// Names of the report table columns, in output order.
pub const REPORT_COLUMNS: [&str; 5] = [
    "column_name",
    "negative_values",
    "spikes",
    "zeros",
    "nan_values",
];

/// Statistics behind a column's spike rule.
///
/// `mean`, `std` and `spike_threshold` are NaN whenever they are undefined
/// (missing values under the propagate policy, or fewer than two usable
/// entries). serde_json writes NaN as `null`, and `null` reads back as NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnStatistics {
    /// Total number of entries in the column, missing ones included.
    pub len: usize,
    #[serde(deserialize_with = "nan_from_null")]
    pub mean: f64,
    /// Sample standard deviation (divisor N - 1).
    #[serde(deserialize_with = "nan_from_null")]
    pub std: f64,
    #[serde(deserialize_with = "nan_from_null")]
    pub spike_threshold: f64,
}

fn nan_from_null<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

/// Anomaly counts for a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnAnomalies {
    pub column_name: String,
    pub negative_values: usize,
    pub spikes: usize,
    pub zeros: usize,
    pub nan_values: usize,
    pub statistics: ColumnStatistics,
}

impl ColumnAnomalies {
    /// Sum of the four anomaly counts.
    ///
    /// An entry can only fall in more than one category when it is both a
    /// spike and negative (or zero), so this may exceed the column length.
    pub fn total(&self) -> usize {
        self.negative_values + self.spikes + self.zeros + self.nan_values
    }

    pub fn has_anomalies(&self) -> bool {
        self.total() > 0
    }

    /// True when the spike rule could not run for this column.
    ///
    /// A zero `spikes` count is then no evidence that the column is clean.
    pub fn spike_detection_suppressed(&self) -> bool {
        !self.statistics.spike_threshold.is_finite()
    }
}

/// Per-category sums over all report rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnomalyTotals {
    pub negative_values: usize,
    pub spikes: usize,
    pub zeros: usize,
    pub nan_values: usize,
}

/// Anomaly report: one row per scanned column, in request order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnomalyReport {
    rows: Vec<ColumnAnomalies>,
}

impl AnomalyReport {
    pub(crate) fn from_rows(rows: Vec<ColumnAnomalies>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[ColumnAnomalies] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColumnAnomalies> {
        self.rows.iter()
    }

    /// First row for the given column name, if it was scanned.
    pub fn get(&self, column_name: &str) -> Option<&ColumnAnomalies> {
        self.rows.iter().find(|row| row.column_name == column_name)
    }

    /// Names of the scanned columns with at least one anomaly, in report order.
    pub fn columns_with_anomalies(&self) -> Vec<&str> {
        self.rows
            .iter()
            .filter(|row| row.has_anomalies())
            .map(|row| row.column_name.as_str())
            .collect()
    }

    pub fn totals(&self) -> AnomalyTotals {
        self.rows
            .iter()
            .fold(AnomalyTotals::default(), |acc, row| AnomalyTotals {
                negative_values: acc.negative_values + row.negative_values,
                spikes: acc.spikes + row.spikes,
                zeros: acc.zeros + row.zeros,
                nan_values: acc.nan_values + row.nan_values,
            })
    }

    /// Build the five-column report table.
    ///
    /// Counts are `UInt64`. The spike statistics are not included.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let names: Vec<&str> = self.rows.iter().map(|r| r.column_name.as_str()).collect();

        let df = df![
            REPORT_COLUMNS[0] => names,
            REPORT_COLUMNS[1] => count_column(&self.rows, |r| r.negative_values),
            REPORT_COLUMNS[2] => count_column(&self.rows, |r| r.spikes),
            REPORT_COLUMNS[3] => count_column(&self.rows, |r| r.zeros),
            REPORT_COLUMNS[4] => count_column(&self.rows, |r| r.nan_values),
        ]
        .context("Building anomaly report table")?;

        Ok(df)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a report written by [`to_json`](Self::to_json).
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

fn count_column(rows: &[ColumnAnomalies], count: impl Fn(&ColumnAnomalies) -> usize) -> Vec<u64> {
    rows.iter().map(|r| count(r) as u64).collect()
}

impl<'a> IntoIterator for &'a AnomalyReport {
    type Item = &'a ColumnAnomalies;
    type IntoIter = std::slice::Iter<'a, ColumnAnomalies>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl IntoIterator for AnomalyReport {
    type Item = ColumnAnomalies;
    type IntoIter = std::vec::IntoIter<ColumnAnomalies>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(
        name: &str,
        negative: usize,
        spikes: usize,
        zeros: usize,
        nan: usize,
    ) -> ColumnAnomalies {
        ColumnAnomalies {
            column_name: name.to_string(),
            negative_values: negative,
            spikes,
            zeros,
            nan_values: nan,
            statistics: ColumnStatistics {
                len: 10,
                mean: 1.0,
                std: 0.5,
                spike_threshold: 2.0,
            },
        }
    }

    fn sample_report() -> AnomalyReport {
        AnomalyReport::from_rows(vec![
            row("hr", 1, 0, 2, 0),
            row("spo2", 0, 0, 0, 0),
            row("hr", 0, 1, 0, 3),
        ])
    }

    #[test]
    fn test_get_returns_first_match() {
        let report = sample_report();
        assert_eq!(report.get("hr").unwrap().negative_values, 1);
        assert!(report.get("ghost").is_none());
    }

    #[test]
    fn test_columns_with_anomalies() {
        assert_eq!(sample_report().columns_with_anomalies(), vec!["hr", "hr"]);
    }

    #[test]
    fn test_totals() {
        let totals = sample_report().totals();
        assert_eq!(
            totals,
            AnomalyTotals {
                negative_values: 1,
                spikes: 1,
                zeros: 2,
                nan_values: 3,
            }
        );
    }

    #[test]
    fn test_spike_detection_suppressed() {
        let mut suppressed = row("hr", 0, 0, 0, 1);
        suppressed.statistics.spike_threshold = f64::NAN;
        assert!(suppressed.spike_detection_suppressed());
        assert!(!row("hr", 0, 0, 0, 0).spike_detection_suppressed());
    }

    #[test]
    fn test_to_dataframe_layout() {
        let df = sample_report().to_dataframe().unwrap();

        assert_eq!(df.shape(), (3, 5));
        let names: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
        assert_eq!(names, REPORT_COLUMNS);

        let zeros = df.column("zeros").unwrap().u64().unwrap();
        assert_eq!(zeros.get(0), Some(2));
        let nan_values = df.column("nan_values").unwrap().u64().unwrap();
        assert_eq!(nan_values.get(2), Some(3));
    }

    #[test]
    fn test_empty_report_to_dataframe() {
        let df = AnomalyReport::default().to_dataframe().unwrap();
        assert_eq!(df.shape(), (0, 5));
    }

    #[test]
    fn test_to_json_writes_nan_as_null() {
        let mut r = row("hr", 0, 0, 0, 1);
        r.statistics.mean = f64::NAN;
        let json = AnomalyReport::from_rows(vec![r]).to_json().unwrap();
        assert!(json.contains("\"column_name\": \"hr\""));
        assert!(json.contains("\"mean\": null"));
    }

    #[test]
    fn test_from_json_reads_null_statistics_as_nan() {
        let mut suppressed = row("hr", 0, 0, 0, 1);
        suppressed.statistics.mean = f64::NAN;
        suppressed.statistics.std = f64::NAN;
        suppressed.statistics.spike_threshold = f64::NAN;
        let report = AnomalyReport::from_rows(vec![suppressed, row("spo2", 1, 0, 0, 0)]);

        let restored = AnomalyReport::from_json(&report.to_json().unwrap()).unwrap();

        assert_eq!(restored.len(), 2);
        let hr = restored.get("hr").unwrap();
        assert_eq!(hr.nan_values, 1);
        assert!(hr.statistics.mean.is_nan());
        assert!(hr.statistics.std.is_nan());
        assert!(hr.spike_detection_suppressed());
        assert_eq!(restored.get("spo2"), report.get("spo2"));
    }
}
