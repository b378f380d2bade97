//! Band classifier and fitted-parameter lookup.

use std::collections::HashMap;

use anomaly_api::{BandConfig, DegeneratePolicy};
use anomaly_spi::{
    AnomalyError, AnomalyLabel, AssetPointKey, ClassifiedReading, FittedParameters,
    ReadingClassifier, Reading, Result,
};

// ============================================================================
// Parameter Table
// ============================================================================

/// Fitted parameters keyed by (asset, point).
///
/// Construction fails on a repeated key or on statistics no fit produces
/// (negative or infinite). The builder emits one valid row per pair, so
/// either means the table was produced or edited elsewhere.
#[derive(Debug, Clone, Default)]
pub struct ParameterTable {
    rows: HashMap<AssetPointKey, FittedParameters>,
}

impl ParameterTable {
    /// Index `params`, rejecting duplicate keys and invalid statistics.
    pub fn from_params(params: &[FittedParameters]) -> Result<Self> {
        let mut rows = HashMap::with_capacity(params.len());
        for p in params {
            p.validate()?;
            if rows.insert(p.key(), p.clone()).is_some() {
                return Err(AnomalyError::duplicate(&p.asset_name, &p.point_name));
            }
        }
        Ok(Self { rows })
    }

    /// Look up the parameters for a series.
    pub fn get(&self, key: &AssetPointKey) -> Result<&FittedParameters> {
        self.rows
            .get(key)
            .ok_or_else(|| AnomalyError::unknown(&key.asset_name, &key.point_name))
    }

    pub fn contains(&self, key: &AssetPointKey) -> bool {
        self.rows.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ============================================================================
// Band Classifier
// ============================================================================

/// Labels a reading anomalous when it falls strictly outside
/// `[mean - k*std, mean + k*std]`. Values on either bound are normal.
#[derive(Debug, Clone, Copy, Default)]
pub struct BandClassifier {
    config: BandConfig,
}

impl BandClassifier {
    /// Create a classifier with the given band half-width.
    pub fn new(multiplier: f64) -> Result<Self> {
        Self::from_config(BandConfig::new(multiplier))
    }

    /// Create from configuration.
    pub fn from_config(config: BandConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &BandConfig {
        &self.config
    }

    /// Label one value against one parameter row.
    pub fn label(&self, value: f64, params: &FittedParameters) -> Result<AnomalyLabel> {
        let Some((lower, upper)) = params.band(self.config.multiplier) else {
            return match self.config.degenerate {
                DegeneratePolicy::Indeterminate => Ok(AnomalyLabel::Indeterminate),
                DegeneratePolicy::Reject => Err(AnomalyError::degenerate(
                    &params.asset_name,
                    &params.point_name,
                )),
            };
        };

        if value < lower || value > upper {
            Ok(AnomalyLabel::Anomalous)
        } else {
            Ok(AnomalyLabel::Normal)
        }
    }

    /// Classify against an already-built table.
    pub fn classify_with_table(
        &self,
        readings: &[Reading],
        table: &ParameterTable,
    ) -> Result<Vec<ClassifiedReading>> {
        readings
            .iter()
            .enumerate()
            .map(|(row, reading)| {
                if !reading.value.is_finite() {
                    return Err(AnomalyError::InvalidReading {
                        row,
                        reason: "value is not a finite number".to_string(),
                    });
                }
                let params = table.get(&reading.key())?;
                let label = self.label(reading.value, params)?;
                Ok(ClassifiedReading::new(reading.clone(), label))
            })
            .collect()
    }
}

impl ReadingClassifier for BandClassifier {
    fn classify(
        &self,
        readings: &[Reading],
        params: &[FittedParameters],
    ) -> Result<Vec<ClassifiedReading>> {
        let table = ParameterTable::from_params(params)?;
        self.classify_with_table(readings, &table)
    }
}
