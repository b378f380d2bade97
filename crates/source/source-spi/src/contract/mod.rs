//! Contract definitions for history sources and the asset catalog.

mod asset_catalog;
mod time_series_source;

pub use asset_catalog::AssetCatalog;
pub use time_series_source::{HistoryPager, TimeSeriesSource};
