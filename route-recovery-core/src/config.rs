//! Tunable parameters for prediction and selection.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    prediction::{BatchConfig, PenaltyConfig, ResourceConstrainedConfig, ViaPathsConfig},
    selection::{DiversityConfig, LocalOptimalityConfig},
};

/// Every section falls back to its defaults, so an empty document is valid.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecoveryConfig {
    pub penalty: PenaltyConfig,
    pub batch: BatchConfig,
    pub resource_constrained: ResourceConstrainedConfig,
    pub via_paths: ViaPathsConfig,
    pub local_optimality: LocalOptimalityConfig,
    pub diversity: DiversityConfig,
}

impl RecoveryConfig {
    /// Batch window as a duration
    pub fn batch_window(&self) -> Duration {
        Duration::minutes(i64::from(self.batch.window_minutes))
    }

    /// Reject values the searches cannot work with.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidData`] naming the offending field.
    pub fn validate(&self) -> Result<(), Error> {
        let fractions = [
            (
                "resource_constrained.duration_lower_bound",
                self.resource_constrained.duration_lower_bound,
            ),
            (
                "resource_constrained.duration_upper_bound",
                self.resource_constrained.duration_upper_bound,
            ),
            ("via_paths.duration_upper_bound", self.via_paths.duration_upper_bound),
            ("local_optimality.alpha", self.local_optimality.alpha),
            ("diversity.similarity_threshold", self.diversity.similarity_threshold),
        ];
        for (name, value) in fractions {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(name, value));
            }
        }

        if !(self.penalty.tolerance.is_finite() && self.penalty.tolerance >= 0.0) {
            return Err(invalid("penalty.tolerance", self.penalty.tolerance));
        }
        if self.batch.window_minutes == 0 {
            return Err(Error::InvalidData(
                "batch.window_minutes must be positive".to_string(),
            ));
        }
        if !self.batch.convergence.is_finite() || self.batch.convergence <= 0.0 {
            return Err(invalid("batch.convergence", self.batch.convergence));
        }
        if !(self.batch.min_multiplier.is_finite() && self.batch.max_multiplier.is_finite())
            || self.batch.min_multiplier > self.batch.max_multiplier
        {
            return Err(Error::InvalidData(format!(
                "batch multipliers out of order: {} > {}",
                self.batch.min_multiplier, self.batch.max_multiplier
            )));
        }
        if self.resource_constrained.max_kept == 0 {
            return Err(Error::InvalidData(
                "resource_constrained.max_kept must be positive".to_string(),
            ));
        }
        // inf disables the filter
        if self.resource_constrained.max_mapped_ratio.is_nan()
            || self.resource_constrained.max_mapped_ratio <= 0.0
        {
            return Err(Error::InvalidData(format!(
                "resource_constrained.max_mapped_ratio must be positive, got {}",
                self.resource_constrained.max_mapped_ratio
            )));
        }
        Ok(())
    }
}

fn invalid(name: &str, value: f64) -> Error {
    Error::InvalidData(format!("{name} must be a non-negative number, got {value}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = RecoveryConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.batch_window(), Duration::minutes(15));
        assert_eq!(config.resource_constrained.max_kept, 1000);
        assert_eq!(config.local_optimality.alpha, 0.45);
        assert_eq!(config.diversity.similarity_threshold, 0.3);
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config: RecoveryConfig =
            serde_json::from_str(r#"{"batch": {"window_minutes": 30}}"#).unwrap();
        assert_eq!(config.batch.window_minutes, 30);
        assert_eq!(config.batch.max_multiplier, 5.0);
        assert_eq!(config.penalty, PenaltyConfig::default());
    }

    #[test]
    fn invalid_values_are_rejected() {
        let mut config = RecoveryConfig::default();
        config.batch.min_multiplier = 6.0;
        assert!(config.validate().is_err());

        let mut config = RecoveryConfig::default();
        config.via_paths.duration_upper_bound = -0.1;
        assert!(config.validate().is_err());

        let mut config = RecoveryConfig::default();
        config.batch.window_minutes = 0;
        assert!(config.validate().is_err());

        let mut config = RecoveryConfig::default();
        config.resource_constrained.max_mapped_ratio = 0.0;
        assert!(config.validate().is_err());
        config.resource_constrained.max_mapped_ratio = f64::INFINITY;
        assert!(config.validate().is_ok());
    }
}
