//! Refitting a site's model from its raw table.

use anomaly_api::PipelineType;
use anomaly_core::ensure_non_degenerate;
use anomaly_spi::ModelBuilder;
use storage_core::{get_readings, put_parameters};
use storage_spi::ObjectStore;
use tracing::info;

use crate::context::InvocationContext;
use crate::error::Result;
use crate::settings::PipelineSettings;

/// Retrain options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetrainOptions {
    /// Refuse to store a model containing single-sample pairs.
    pub reject_degenerate: bool,
}

/// Fit the site's retrain raw table and replace its stored model.
///
/// `ctx` must be a retrain context; an inference context is rejected rather
/// than fitting the short inference window.
///
/// The model object is only written once the fit (and the optional
/// degeneracy check) has succeeded; a failing run leaves the previous model
/// in place. Returns the number of (asset, point) pairs in the new model.
pub fn retrain_site(
    ctx: &InvocationContext,
    builder: &dyn ModelBuilder,
    store: &dyn ObjectStore,
    settings: &PipelineSettings,
    options: RetrainOptions,
) -> Result<usize> {
    ctx.require(PipelineType::Retrain)?;
    let readings = get_readings(store, &settings.data_bucket, &ctx.raw_key()?)?;
    let params = builder.fit(&readings)?;
    if options.reject_degenerate {
        ensure_non_degenerate(&params)?;
    }

    let key = ctx.model_key()?;
    put_parameters(store, &settings.model_artifact_bucket, &key, &params)?;
    info!(
        site_id = %ctx.site_id,
        event_id = %ctx.event_id,
        readings = readings.len(),
        pairs = params.len(),
        %key,
        "stored model"
    );
    Ok(params.len())
}
