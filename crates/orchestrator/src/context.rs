//! Scheduled events and the per-site invocations derived from them.

use anomaly_api::PipelineType;
use serde::{Deserialize, Serialize};
use source_spi::AssetCatalog;
use storage_spi::{model_key, raw_readings_key};
use tracing::info;

use crate::error::{OrchestratorError, Result};

/// Substring identifying the hourly scoring rule.
pub const INFERENCE_RULE_MARKER: &str = "inferrule";
/// Substring identifying the retraining rule.
pub const RETRAIN_RULE_MARKER: &str = "retrainrule";

/// A timer event from the scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledEvent {
    /// Unique id of this firing; becomes the run's `event_id`.
    pub id: String,
    /// Identifiers of the rules that fired; the first one decides the pipeline.
    #[serde(default)]
    pub resources: Vec<String>,
}

impl ScheduledEvent {
    pub fn new(id: impl Into<String>, resources: Vec<String>) -> Self {
        Self {
            id: id.into(),
            resources,
        }
    }

    /// Pipeline selected by the rule that fired.
    pub fn pipeline_type(&self) -> Result<PipelineType> {
        let rule = self.resources.first().map(String::as_str).unwrap_or_default();
        if rule.contains(INFERENCE_RULE_MARKER) {
            Ok(PipelineType::Inference)
        } else if rule.contains(RETRAIN_RULE_MARKER) {
            Ok(PipelineType::Retrain)
        } else {
            Err(OrchestratorError::UnknownRule {
                event_id: self.id.clone(),
            })
        }
    }
}

/// One site's share of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvocationContext {
    pub site_id: String,
    pub event_id: String,
    pub pipeline_type: PipelineType,
}

impl InvocationContext {
    pub fn new(site_id: impl Into<String>, event_id: impl Into<String>, pipeline_type: PipelineType) -> Self {
        Self {
            site_id: site_id.into(),
            event_id: event_id.into(),
            pipeline_type,
        }
    }

    /// Fail unless this context belongs to `expected`.
    pub fn require(&self, expected: PipelineType) -> Result<()> {
        if self.pipeline_type == expected {
            Ok(())
        } else {
            Err(OrchestratorError::WrongPipeline {
                expected,
                found: self.pipeline_type,
            })
        }
    }

    /// Key of this run's raw readings table.
    pub fn raw_key(&self) -> Result<String> {
        Ok(raw_readings_key(self.pipeline_type, &self.event_id, &self.site_id)?)
    }

    /// Key of the site's fitted parameter table.
    pub fn model_key(&self) -> Result<String> {
        Ok(model_key(&self.site_id)?)
    }
}

/// Expand an event into one invocation per catalogued site.
pub fn plan_sites<C: AssetCatalog + ?Sized>(
    event: &ScheduledEvent,
    catalog: &C,
) -> Result<Vec<InvocationContext>> {
    let pipeline_type = event.pipeline_type()?;
    let sites = catalog.list_sites()?;
    info!(event_id = %event.id, %pipeline_type, sites = sites.len(), "planned pipeline run");

    Ok(sites
        .into_iter()
        .map(|site_id| InvocationContext::new(site_id, event.id.as_str(), pipeline_type))
        .collect())
}
