//! Sensor reading types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Composite join key: one (asset, point) series.
///
/// Matching is exact and case-sensitive; names are never trimmed or folded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetPointKey {
    pub asset_name: String,
    pub point_name: String,
}

impl AssetPointKey {
    /// Create a new key.
    pub fn new(asset_name: impl Into<String>, point_name: impl Into<String>) -> Self {
        Self {
            asset_name: asset_name.into(),
            point_name: point_name.into(),
        }
    }
}

impl fmt::Display for AssetPointKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.asset_name, self.point_name)
    }
}

/// One sensor observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Physical unit, e.g. a rooftop unit.
    pub asset_name: String,
    /// Measured quantity on that unit.
    pub point_name: String,
    /// Measurement.
    pub value: f64,
    /// Source-defined epoch-derived ordering key.
    pub timestamp: i64,
}

impl Reading {
    /// Create a new Reading.
    pub fn new(
        asset_name: impl Into<String>,
        point_name: impl Into<String>,
        value: f64,
        timestamp: i64,
    ) -> Self {
        Self {
            asset_name: asset_name.into(),
            point_name: point_name.into(),
            value,
            timestamp,
        }
    }

    /// The (asset, point) key this reading belongs to.
    pub fn key(&self) -> AssetPointKey {
        AssetPointKey::new(self.asset_name.as_str(), self.point_name.as_str())
    }

    /// Whether this reading belongs to the given series.
    pub fn matches(&self, key: &AssetPointKey) -> bool {
        self.asset_name == key.asset_name && self.point_name == key.point_name
    }
}
