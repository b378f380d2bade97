//! Draining a paged history service.

use anomaly_spi::Reading;
use source_spi::{
    AssetPointRef, HistoryPager, HistoryRequest, Result, SourceError, TimeSeriesSource, TimeWindow,
};
use tracing::debug;

use crate::entry_id::{decode_entry_id, encode_entry_id};
use crate::window::compose_timestamp;

/// Upper bound on pages fetched per point before giving up.
pub const DEFAULT_PAGE_LIMIT: usize = 10_000;

/// `TimeSeriesSource` over a `HistoryPager`: one request per point, each
/// followed through every page.
#[derive(Debug)]
pub struct PagedHistorySource<P> {
    pager: P,
    page_limit: usize,
}

impl<P: HistoryPager> PagedHistorySource<P> {
    pub fn new(pager: P) -> Self {
        Self {
            pager,
            page_limit: DEFAULT_PAGE_LIMIT,
        }
    }

    /// Cap the number of pages followed per point.
    pub fn with_page_limit(mut self, page_limit: usize) -> Self {
        self.page_limit = page_limit;
        self
    }

    pub fn pager(&self) -> &P {
        &self.pager
    }

    fn drain_point(&self, point: &AssetPointRef, window: &TimeWindow, out: &mut Vec<Reading>) -> Result<()> {
        let request = HistoryRequest {
            entry_id: encode_entry_id(point),
            asset_id: point.asset_id.clone(),
            property_id: point.point_id.clone(),
            window: *window,
        };

        let mut token: Option<String> = None;
        for page_no in 0..self.page_limit {
            let page = self.pager.fetch_page(&request, token.as_deref())?;
            let (asset, point_name) = decode_entry_id(&page.entry_id)?;
            debug!(entry_id = %page.entry_id, page = page_no, values = page.values.len(), "history page");

            for sample in &page.values {
                out.push(Reading {
                    asset_name: asset.to_string(),
                    point_name: point_name.to_string(),
                    value: sample.value.as_f64()?,
                    timestamp: compose_timestamp(sample.time_in_seconds, sample.offset_in_nanos),
                });
            }

            match page.next_token {
                Some(next) => token = Some(next),
                None => return Ok(()),
            }
        }

        Err(SourceError::PageLimitExceeded {
            entry_id: request.entry_id,
            limit: self.page_limit,
        })
    }
}

impl<P: HistoryPager> TimeSeriesSource for PagedHistorySource<P> {
    fn name(&self) -> &str {
        "paged"
    }

    fn fetch_history(&self, points: &[AssetPointRef], window: &TimeWindow) -> Result<Vec<Reading>> {
        let mut readings = Vec::new();
        for point in points {
            self.drain_point(point, window, &mut readings)?;
        }
        Ok(readings)
    }
}
