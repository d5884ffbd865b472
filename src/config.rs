use thiserror::Error;

use crate::pipeline::analysis::classify::NEAR_BAND_FRACTION;

/// Application-level constants
pub const APP_NAME: &str = "Labsight";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable overriding the near-band fraction.
pub const NEAR_BAND_ENV: &str = "LABSIGHT_NEAR_BAND_FRACTION";

/// Environment variable toggling split-row rejoining ("true"/"false", "1"/"0").
pub const REJOIN_SPLIT_ROWS_ENV: &str = "LABSIGHT_REJOIN_SPLIT_ROWS";

/// Exclusive upper bound for the near-band fraction. At 0.5 the two edge
/// bands would cover the whole range and `Normal` could never be assigned.
const MAX_NEAR_BAND_FRACTION: f64 = 0.5;

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "labsight=info,warn"
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Near band fraction must be finite and within [0, 0.5), got {value}")]
    InvalidNearBand { value: f64 },

    #[error("Cannot parse {key}={value}")]
    UnparseableValue { key: String, value: String },
}

/// Runtime knobs for one extraction pipeline.
///
/// Built once at process start and shared read-only across requests. Fields
/// are only set through the validating builders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractionConfig {
    /// Width of the `Near` band at each edge, as a fraction of the
    /// reference-range width.
    near_band_fraction: f64,
    /// Retry two adjacent unmatched lines as one row.
    rejoin_split_rows: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            near_band_fraction: NEAR_BAND_FRACTION,
            rejoin_split_rows: true,
        }
    }
}

impl ExtractionConfig {
    pub fn near_band_fraction(&self) -> f64 {
        self.near_band_fraction
    }

    pub fn rejoin_split_rows(&self) -> bool {
        self.rejoin_split_rows
    }

    /// Override the near-band fraction, validating the new value.
    pub fn with_near_band_fraction(mut self, fraction: f64) -> Result<Self, ConfigError> {
        validate_near_band(fraction)?;
        self.near_band_fraction = fraction;
        Ok(self)
    }

    pub fn with_rejoin_split_rows(mut self, enabled: bool) -> Self {
        self.rejoin_split_rows = enabled;
        self
    }

    /// Load from the process environment, falling back to defaults for
    /// unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup (environment, map, ...).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(NEAR_BAND_ENV) {
            let fraction: f64 = raw.trim().parse().map_err(|_| ConfigError::UnparseableValue {
                key: NEAR_BAND_ENV.into(),
                value: raw.clone(),
            })?;
            config = config.with_near_band_fraction(fraction)?;
        }

        if let Some(raw) = lookup(REJOIN_SPLIT_ROWS_ENV) {
            let enabled = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(ConfigError::UnparseableValue {
                        key: REJOIN_SPLIT_ROWS_ENV.into(),
                        value: raw,
                    })
                }
            };
            config = config.with_rejoin_split_rows(enabled);
        }

        tracing::debug!(
            near_band_fraction = config.near_band_fraction,
            rejoin_split_rows = config.rejoin_split_rows,
            "Extraction config loaded"
        );

        Ok(config)
    }
}

fn validate_near_band(fraction: f64) -> Result<(), ConfigError> {
    if fraction.is_finite() && (0.0..MAX_NEAR_BAND_FRACTION).contains(&fraction) {
        Ok(())
    } else {
        Err(ConfigError::InvalidNearBand { value: fraction })
    }
}
