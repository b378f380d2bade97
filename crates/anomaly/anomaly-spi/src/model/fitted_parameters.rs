//! Fitted model parameters.

use serde::{Deserialize, Serialize};

use super::reading::AssetPointKey;
use crate::error::{AnomalyError, Result};

/// Mean and sample standard deviation for one (asset, point) series.
///
/// `std` is NaN when the training group held a single reading. That value
/// is kept as-is: a zero would flag every later reading for the pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedParameters {
    pub asset_name: String,
    pub point_name: String,
    pub mean: f64,
    pub std: f64,
}

impl FittedParameters {
    /// Create a new parameter row.
    pub fn new(
        asset_name: impl Into<String>,
        point_name: impl Into<String>,
        mean: f64,
        std: f64,
    ) -> Self {
        Self {
            asset_name: asset_name.into(),
            point_name: point_name.into(),
            mean,
            std,
        }
    }

    /// The (asset, point) key these parameters describe.
    pub fn key(&self) -> AssetPointKey {
        AssetPointKey::new(self.asset_name.as_str(), self.point_name.as_str())
    }

    /// True when either statistic is undefined.
    pub fn is_degenerate(&self) -> bool {
        self.mean.is_nan() || self.std.is_nan()
    }

    /// Reject statistics no fit can produce: a negative `std`, or an
    /// infinite `mean` or `std`. NaN is allowed and means undefined.
    pub fn validate(&self) -> Result<()> {
        let (name, value, reason) = if self.mean.is_infinite() {
            ("mean", self.mean, "is infinite")
        } else if self.std.is_infinite() {
            ("std", self.std, "is infinite")
        } else if self.std < 0.0 {
            ("std", self.std, "is negative")
        } else {
            return Ok(());
        };
        Err(AnomalyError::InvalidParameter {
            name: name.to_string(),
            reason: format!(
                "{} ({}) for ({}, {})",
                reason, value, self.asset_name, self.point_name
            ),
        })
    }

    /// Normal band `[mean - k*std, mean + k*std]`.
    ///
    /// `None` when either statistic is undefined or a bound overflows, so
    /// the band never degrades into NaN comparisons.
    pub fn band(&self, multiplier: f64) -> Option<(f64, f64)> {
        if self.is_degenerate() {
            return None;
        }
        let half_width = multiplier * self.std;
        let (lower, upper) = (self.mean - half_width, self.mean + half_width);
        (lower.is_finite() && upper.is_finite()).then_some((lower, upper))
    }
}
