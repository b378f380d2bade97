//! Scoring a site's latest readings, one (asset, point) series at a time.

use std::collections::HashSet;

use anomaly_api::PipelineType;
use anomaly_core::{group_by_series, BandClassifier, ParameterTable};
use anomaly_spi::{anomaly_count, AssetPointKey};
use serde::Serialize;
use storage_core::{get_parameters, get_readings, put_classified};
use storage_spi::{classified_key, ObjectStore};
use tracing::{info, warn};

use crate::context::InvocationContext;
use crate::error::{OrchestratorError, Result};
use crate::settings::PipelineSettings;

/// A series that was scored and written.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredSeries {
    pub key: AssetPointKey,
    pub object_key: String,
    pub rows: usize,
    pub anomalies: usize,
}

/// A series that could not be scored or written.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedSeries {
    pub key: AssetPointKey,
    pub error: String,
}

/// Per-series outcome of an inference run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InferenceReport {
    pub succeeded: Vec<ScoredSeries>,
    pub failed: Vec<FailedSeries>,
}

impl InferenceReport {
    /// True when every series was written.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn anomaly_total(&self) -> usize {
        self.succeeded.iter().map(|s| s.anomalies).sum()
    }
}

/// Classify the run's raw table against the site model.
///
/// The raw table and model are loaded once; failing to load either fails the
/// run. After that each series is scored and written on its own, and a
/// series that fails is recorded in the report without stopping the rest.
/// Output keys join site, asset and point with `_`, so two series can map to
/// the same object; the later one is recorded as failed instead of
/// overwriting the first.
pub fn infer_site(
    ctx: &InvocationContext,
    classifier: &BandClassifier,
    store: &dyn ObjectStore,
    settings: &PipelineSettings,
) -> Result<InferenceReport> {
    ctx.require(PipelineType::Inference)?;
    let readings = get_readings(store, &settings.data_bucket, &ctx.raw_key()?)?;
    let params = get_parameters(store, &settings.model_artifact_bucket, &ctx.model_key()?)?;
    let table = ParameterTable::from_params(&params)?;

    let mut report = InferenceReport::default();
    let mut written: HashSet<String> = HashSet::new();
    for group in group_by_series(&readings) {
        let outcome: Result<ScoredSeries> = classifier
            .classify_with_table(&group.readings, &table)
            .map_err(Into::into)
            .and_then(|classified| {
                let object_key = classified_key(
                    &ctx.event_id,
                    &ctx.site_id,
                    &group.key.asset_name,
                    &group.key.point_name,
                )?;
                if written.contains(&object_key) {
                    return Err(OrchestratorError::OutputKeyCollision { object_key });
                }
                put_classified(store, &settings.output_bucket, &object_key, &classified)?;
                Ok(ScoredSeries {
                    key: group.key.clone(),
                    object_key,
                    rows: classified.len(),
                    anomalies: anomaly_count(&classified),
                })
            });

        match outcome {
            Ok(scored) => {
                written.insert(scored.object_key.clone());
                report.succeeded.push(scored);
            }
            Err(err) => {
                warn!(
                    site_id = %ctx.site_id,
                    asset = %group.key.asset_name,
                    point = %group.key.point_name,
                    error = %err,
                    "series not scored"
                );
                report.failed.push(FailedSeries {
                    key: group.key,
                    error: err.to_string(),
                });
            }
        }
    }

    info!(
        site_id = %ctx.site_id,
        event_id = %ctx.event_id,
        scored = report.succeeded.len(),
        failed = report.failed.len(),
        anomalies = report.anomaly_total(),
        "inference finished"
    );
    Ok(report)
}
