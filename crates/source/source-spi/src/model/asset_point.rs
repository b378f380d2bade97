//! Catalog references to measured points.

use anomaly_spi::AssetPointKey;
use serde::{Deserialize, Serialize};

/// A point on an asset, with the identifiers the history service knows it by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetPointRef {
    /// Asset label, e.g. `RTU1`.
    pub asset_name: String,
    /// History-service id of the asset.
    pub asset_id: String,
    /// Point label as stored in the catalog, possibly `brick:`-prefixed.
    pub point_name: String,
    /// History-service id of the point's property.
    pub point_id: String,
}

impl AssetPointRef {
    pub fn new(
        asset_name: impl Into<String>,
        asset_id: impl Into<String>,
        point_name: impl Into<String>,
        point_id: impl Into<String>,
    ) -> Self {
        Self {
            asset_name: asset_name.into(),
            asset_id: asset_id.into(),
            point_name: point_name.into(),
            point_id: point_id.into(),
        }
    }

    /// Point label with any `brick:` namespace prefix removed.
    pub fn short_point_name(&self) -> &str {
        strip_brick_prefix(&self.point_name)
    }

    /// Key the readings of this point are grouped under.
    pub fn key(&self) -> AssetPointKey {
        AssetPointKey::new(self.asset_name.as_str(), self.short_point_name())
    }
}

/// Remove a leading `brick:` namespace from a point label.
pub fn strip_brick_prefix(point_name: &str) -> &str {
    point_name.strip_prefix("brick:").unwrap_or(point_name)
}
