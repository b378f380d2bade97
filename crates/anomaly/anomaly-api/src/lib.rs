//! Anomaly Scoring API
//!
//! Configuration types and builders for the band classifier, plus the
//! pipeline-type flag shared by every stage.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// Re-export SPI types
pub use anomaly_spi::{
    AnomalyError, AnomalyLabel, AssetPointKey, ClassifiedReading, FittedParameters, Reading,
    Result,
};

/// Band half-width in standard deviations used by the pipeline.
pub const DEFAULT_MULTIPLIER: f64 = 2.0;

// ============================================================================
// Pipeline Type
// ============================================================================

/// Which run of the pipeline an invocation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineType {
    /// Score the latest readings against the stored model.
    Inference,
    /// Refit the model from a longer history window.
    Retrain,
}

impl PipelineType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineType::Inference => "inference",
            PipelineType::Retrain => "retrain",
        }
    }
}

impl fmt::Display for PipelineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PipelineType {
    type Err = AnomalyError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "inference" => Ok(PipelineType::Inference),
            "retrain" => Ok(PipelineType::Retrain),
            other => Err(AnomalyError::InvalidParameter {
                name: "pipeline_type".to_string(),
                reason: format!("expected 'inference' or 'retrain', got '{}'", other),
            }),
        }
    }
}

// ============================================================================
// Classifier Configuration
// ============================================================================

/// What the classifier does with parameters whose `std` is undefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegeneratePolicy {
    /// Label the reading `Indeterminate`.
    #[default]
    Indeterminate,
    /// Fail the batch with `DegenerateModel`.
    Reject,
}

/// Band classifier configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandConfig {
    /// Band half-width in standard deviations (default: 2.0).
    pub multiplier: f64,
    /// Handling of undefined standard deviations.
    #[serde(default)]
    pub degenerate: DegeneratePolicy,
}

impl Default for BandConfig {
    fn default() -> Self {
        Self {
            multiplier: DEFAULT_MULTIPLIER,
            degenerate: DegeneratePolicy::default(),
        }
    }
}

impl BandConfig {
    pub fn new(multiplier: f64) -> Self {
        Self {
            multiplier,
            ..Self::default()
        }
    }

    /// Check that the multiplier is usable.
    pub fn validate(&self) -> Result<()> {
        if !self.multiplier.is_finite() || self.multiplier <= 0.0 {
            return Err(AnomalyError::InvalidParameter {
                name: "multiplier".to_string(),
                reason: format!("must be positive and finite, got {}", self.multiplier),
            });
        }
        Ok(())
    }
}

/// Builder for BandConfig.
#[derive(Debug, Default)]
pub struct BandConfigBuilder {
    multiplier: Option<f64>,
    degenerate: Option<DegeneratePolicy>,
}

impl BandConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the band half-width in standard deviations.
    pub fn multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = Some(multiplier);
        self
    }

    /// Set the degenerate-parameter policy.
    pub fn degenerate(mut self, policy: DegeneratePolicy) -> Self {
        self.degenerate = Some(policy);
        self
    }

    /// Build and validate the configuration.
    pub fn build(self) -> Result<BandConfig> {
        let config = BandConfig {
            multiplier: self.multiplier.unwrap_or(DEFAULT_MULTIPLIER),
            degenerate: self.degenerate.unwrap_or_default(),
        };
        config.validate()?;
        Ok(config)
    }
}
