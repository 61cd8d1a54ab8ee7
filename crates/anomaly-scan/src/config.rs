//! Configuration types for the anomaly scanner.
//!
//! The defaults reproduce the documented behaviour: a 4-sigma spike rule
//! whose statistics propagate missing values. Use [`ScanConfig::builder()`]
//! to change either knob.

use serde::{Deserialize, Serialize};

/// Default multiple of the sample standard deviation used as spike threshold.
pub const DEFAULT_SPIKE_SIGMA: f64 = 4.0;

/// How missing values take part in the mean/standard-deviation computation.
///
/// Only the spike rule is affected. Negative, zero and missing counts are
/// the same under both policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MissingValuePolicy {
    /// Mean and standard deviation run over the raw column, so a single
    /// missing entry turns both into NaN and the column reports zero spikes.
    #[default]
    Propagate,
    /// Mean and standard deviation run over the non-missing entries only.
    ///
    /// This changes results for any column with missing values and must be
    /// chosen explicitly.
    Skip,
}

/// Configuration for [`AnomalyScanner`](crate::AnomalyScanner).
///
/// # Example
///
/// ```rust,ignore
/// use anomaly_scan::config::{MissingValuePolicy, ScanConfig};
///
/// let config = ScanConfig::builder()
///     .spike_sigma(3.0)
///     .missing_values(MissingValuePolicy::Skip)
///     .build()?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Entries deviating from the column mean by more than this many sample
    /// standard deviations are counted as spikes.
    /// Default: 4.0
    pub spike_sigma: f64,

    /// Missing-value handling for the spike statistics.
    /// Default: Propagate
    pub missing_values: MissingValuePolicy,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            spike_sigma: DEFAULT_SPIKE_SIGMA,
            missing_values: MissingValuePolicy::default(),
        }
    }
}

impl ScanConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !self.spike_sigma.is_finite() || self.spike_sigma <= 0.0 {
            return Err(ConfigValidationError::InvalidSpikeSigma(self.spike_sigma));
        }
        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid spike sigma: {0} (must be a finite number greater than 0)")]
    InvalidSpikeSigma(f64),
}

/// Builder for [`ScanConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct ScanConfigBuilder {
    spike_sigma: Option<f64>,
    missing_values: Option<MissingValuePolicy>,
}

impl ScanConfigBuilder {
    /// Set the spike threshold as a multiple of the sample standard deviation.
    pub fn spike_sigma(mut self, sigma: f64) -> Self {
        self.spike_sigma = Some(sigma);
        self
    }

    /// Set how missing values enter the spike statistics.
    pub fn missing_values(mut self, policy: MissingValuePolicy) -> Self {
        self.missing_values = Some(policy);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `ScanConfig` or an error if validation fails.
    pub fn build(self) -> Result<ScanConfig, ConfigValidationError> {
        let config = ScanConfig {
            spike_sigma: self.spike_sigma.unwrap_or(DEFAULT_SPIKE_SIGMA),
            missing_values: self.missing_values.unwrap_or_default(),
        };

        config.validate()?;
        Ok(config)
    }
}
