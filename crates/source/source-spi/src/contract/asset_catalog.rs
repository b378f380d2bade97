//! Asset catalog trait definition.

use crate::error::Result;
use crate::model::AssetPointRef;

/// Building metadata: which sites exist and which points each one has.
pub trait AssetCatalog: Send + Sync {
    /// All site identifiers.
    fn list_sites(&self) -> Result<Vec<String>>;

    /// Points of every asset at `site_id`. Empty for an unknown site.
    fn asset_points(&self, site_id: &str) -> Result<Vec<AssetPointRef>>;
}
