//! Fetching a site's history into the data bucket.

use serde::Serialize;
use source_core::window_for;
use source_spi::{AssetCatalog, TimeSeriesSource, TimeWindow};
use storage_core::put_readings;
use storage_spi::ObjectStore;
use tracing::info;

use crate::context::InvocationContext;
use crate::error::{OrchestratorError, Result};
use crate::settings::PipelineSettings;

/// What an ingest run wrote.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestSummary {
    pub key: String,
    pub points: usize,
    pub readings: usize,
    pub window: TimeWindow,
}

/// Pull the site's readings for the window ending at `end_time` (epoch
/// seconds) and store them as the run's raw table.
///
/// Nothing is written when the catalog has no points for the site or the
/// window holds no readings.
pub fn ingest_site(
    ctx: &InvocationContext,
    end_time: i64,
    catalog: &dyn AssetCatalog,
    source: &dyn TimeSeriesSource,
    store: &dyn ObjectStore,
    settings: &PipelineSettings,
) -> Result<IngestSummary> {
    let key = ctx.raw_key()?;
    let window = window_for(ctx.pipeline_type, end_time)?;

    let points = catalog.asset_points(&ctx.site_id)?;
    if points.is_empty() {
        return Err(OrchestratorError::NoAssetPoints {
            site_id: ctx.site_id.clone(),
        });
    }

    let readings = source.fetch_history(&points, &window)?;
    if readings.is_empty() {
        return Err(OrchestratorError::NoReadings {
            site_id: ctx.site_id.clone(),
            start: window.start(),
            end: window.end(),
        });
    }

    put_readings(store, &settings.data_bucket, &key, &readings)?;
    info!(
        site_id = %ctx.site_id,
        event_id = %ctx.event_id,
        source = source.name(),
        points = points.len(),
        readings = readings.len(),
        "ingested history"
    );

    Ok(IngestSummary {
        key,
        points: points.len(),
        readings: readings.len(),
        window,
    })
}
