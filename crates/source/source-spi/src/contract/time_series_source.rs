//! Time-series source trait definitions.

use anomaly_spi::Reading;

use crate::error::Result;
use crate::model::{AssetPointRef, HistoryPage, HistoryRequest, TimeWindow};

/// Source of historical readings.
///
/// Implementations return every reading in the window: any paging is
/// drained before `fetch_history` returns.
pub trait TimeSeriesSource: Send + Sync {
    /// Source name.
    fn name(&self) -> &str;

    /// Fetch the readings of `points` inside `window`.
    fn fetch_history(&self, points: &[AssetPointRef], window: &TimeWindow) -> Result<Vec<Reading>>;
}

/// Single-page access to a paged history service.
pub trait HistoryPager: Send + Sync {
    /// Fetch one page; `next_token` is `None` for the first page.
    fn fetch_page(&self, request: &HistoryRequest, next_token: Option<&str>) -> Result<HistoryPage>;
}
