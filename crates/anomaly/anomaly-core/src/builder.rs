//! Mean/standard-deviation model builder.

use std::collections::BTreeMap;

use anomaly_spi::{AnomalyError, AssetPointKey, FittedParameters, ModelBuilder, Reading, Result};

// ============================================================================
// Group Statistics
// ============================================================================

/// Arithmetic mean. `NaN` for an empty slice.
///
/// Falls back to summing `x / n` when the plain sum overflows, so finite
/// input always gives a finite mean.
pub fn mean(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let sum = values.iter().sum::<f64>();
    if sum.is_finite() || values.iter().any(|x| !x.is_finite()) {
        return sum / n;
    }
    values.iter().map(|x| x / n).sum()
}

/// Sample standard deviation (ddof = 1).
///
/// Two passes over `values` in slice order, so repeated calls on the same
/// slice are bitwise identical. Fewer than two values yield `NaN`. When the
/// squared deviations overflow, they are recomputed scaled by the largest
/// magnitude in the slice; the result is only infinite if the spread itself
/// exceeds the `f64` range.
pub fn sample_std(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let ddof = (values.len() - 1) as f64;
    let sum_sq = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>();
    let std = (sum_sq / ddof).sqrt();
    if std.is_finite() || !mean.is_finite() {
        return std;
    }

    let scale = values.iter().fold(mean.abs(), |m, x| m.max(x.abs()));
    let scaled_sq = values
        .iter()
        .map(|x| (x / scale - mean / scale).powi(2))
        .sum::<f64>();
    scale * (scaled_sq / ddof).sqrt()
}

fn check_reading(row: usize, reading: &Reading) -> Result<()> {
    let reason = if reading.asset_name.is_empty() {
        "asset_name is empty"
    } else if reading.point_name.is_empty() {
        "point_name is empty"
    } else if !reading.value.is_finite() {
        "value is not a finite number"
    } else {
        return Ok(());
    };
    Err(AnomalyError::InvalidReading {
        row,
        reason: reason.to_string(),
    })
}

// ============================================================================
// Builder
// ============================================================================

/// Fits one (mean, sample std) row per (asset, point) pair.
///
/// Rows come out sorted by key. Callers should treat the output as a set.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanStdBuilder;

impl MeanStdBuilder {
    pub fn new() -> Self {
        Self
    }
}

impl ModelBuilder for MeanStdBuilder {
    fn fit(&self, readings: &[Reading]) -> Result<Vec<FittedParameters>> {
        if readings.is_empty() {
            return Err(AnomalyError::EmptyInput);
        }

        let mut groups: BTreeMap<AssetPointKey, Vec<f64>> = BTreeMap::new();
        for (row, reading) in readings.iter().enumerate() {
            check_reading(row, reading)?;
            groups.entry(reading.key()).or_default().push(reading.value);
        }

        groups
            .into_iter()
            .map(|(key, values)| {
                let mean = mean(&values);
                let std = sample_std(&values, mean);
                let params = FittedParameters {
                    asset_name: key.asset_name,
                    point_name: key.point_name,
                    mean,
                    std,
                };
                params.validate()?;
                Ok(params)
            })
            .collect()
    }
}
