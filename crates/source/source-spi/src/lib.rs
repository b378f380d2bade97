//! Time-Series Source Service Provider Interface
//!
//! Defines traits and types for the building asset catalog and the
//! historical readings service.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{AssetCatalog, HistoryPager, TimeSeriesSource};
pub use error::{Result, SourceError};
pub use model::{
    strip_brick_prefix, AssetPointRef, HistoryPage, HistoryRequest, HistoryValue, PropertyValue,
    TimeWindow,
};
