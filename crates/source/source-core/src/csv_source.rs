//! History and catalog fixtures read from local CSV dumps.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use anomaly_spi::Reading;
use serde::Deserialize;
use source_spi::{AssetCatalog, AssetPointRef, Result, SourceError, TimeSeriesSource, TimeWindow};

fn parse_error(err: csv::Error) -> SourceError {
    SourceError::ParseError(err.to_string())
}

// ============================================================================
// History dump
// ============================================================================

/// Readings loaded up front from a dump with the readings-table columns
/// (`asset_name,point_name,value,timestamp`, timestamps in epoch nanoseconds).
#[derive(Debug, Clone, Default)]
pub struct CsvHistorySource {
    readings: Vec<Reading>,
}

impl CsvHistorySource {
    pub fn from_readings(readings: Vec<Reading>) -> Self {
        Self { readings }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let readings = csv::Reader::from_reader(reader)
            .deserialize::<Reading>()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(parse_error)?;
        Ok(Self { readings })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|e| SourceError::RequestFailed(format!("{}: {}", path.display(), e)))?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

impl TimeSeriesSource for CsvHistorySource {
    fn name(&self) -> &str {
        "csv"
    }

    fn fetch_history(&self, points: &[AssetPointRef], window: &TimeWindow) -> Result<Vec<Reading>> {
        let keys: Vec<_> = points.iter().map(AssetPointRef::key).collect();
        Ok(self
            .readings
            .iter()
            .filter(|r| window.contains_nanos(r.timestamp))
            .filter(|r| keys.iter().any(|k| r.matches(k)))
            .cloned()
            .collect())
    }
}

// ============================================================================
// Catalog
// ============================================================================

#[derive(Debug, Deserialize)]
struct CatalogRow {
    site_id: String,
    asset_name: String,
    asset_id: String,
    point_name: String,
    point_id: String,
}

/// Fixed site → points mapping.
///
/// Loaded from a CSV with columns
/// `site_id,asset_name,asset_id,point_name,point_id`.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    sites: BTreeMap<String, Vec<AssetPointRef>>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a point under a site.
    pub fn with_point(mut self, site_id: impl Into<String>, point: AssetPointRef) -> Self {
        self.sites.entry(site_id.into()).or_default().push(point);
        self
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut catalog = Self::new();
        for row in csv::Reader::from_reader(reader).deserialize::<CatalogRow>() {
            let row = row.map_err(parse_error)?;
            catalog = catalog.with_point(
                row.site_id,
                AssetPointRef::new(row.asset_name, row.asset_id, row.point_name, row.point_id),
            );
        }
        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|e| SourceError::RequestFailed(format!("{}: {}", path.display(), e)))?;
        Self::from_reader(std::io::BufReader::new(file))
    }
}

impl AssetCatalog for StaticCatalog {
    fn list_sites(&self) -> Result<Vec<String>> {
        Ok(self.sites.keys().cloned().collect())
    }

    fn asset_points(&self, site_id: &str) -> Result<Vec<AssetPointRef>> {
        Ok(self.sites.get(site_id).cloned().unwrap_or_default())
    }
}
