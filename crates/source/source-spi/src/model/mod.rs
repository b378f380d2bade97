//! Data models for history sources.

mod asset_point;
mod history;
mod window;

pub use asset_point::{strip_brick_prefix, AssetPointRef};
pub use history::{HistoryPage, HistoryRequest, HistoryValue, PropertyValue};
pub use window::TimeWindow;
