//! Orchestration error types.

use anomaly_api::PipelineType;
use anomaly_spi::AnomalyError;
use source_spi::SourceError;
use storage_spi::StorageError;
use thiserror::Error;

/// Errors raised while running a pipeline stage.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// Missing or unusable settings
    #[error("Configuration error: {0}")]
    Config(String),

    /// The scheduling event names neither pipeline rule
    #[error("Event '{event_id}' does not come from an inference or retrain rule")]
    UnknownRule { event_id: String },

    /// A stage was handed a context for the other pipeline
    #[error("Expected a {expected} context, got {found}")]
    WrongPipeline { expected: PipelineType, found: PipelineType },

    /// Two series map to the same output object
    #[error("Output object '{object_key}' was already written for another series in this run")]
    OutputKeyCollision { object_key: String },

    /// The catalog has nothing to fetch for a site
    #[error("No asset points registered for site '{site_id}'")]
    NoAssetPoints { site_id: String },

    /// The history window came back empty
    #[error("No readings for site '{site_id}' in window ({start}, {end}]")]
    NoReadings { site_id: String, start: i64, end: i64 },

    /// A build reached a terminal status other than success
    #[error("Build '{build_id}' did not succeed: {status}")]
    BuildFailed { build_id: String, status: String },

    /// A build was still running when polling gave up
    #[error("Build '{build_id}' still running after {attempts} status checks")]
    PollLimitExceeded { build_id: String, attempts: u32 },

    #[error(transparent)]
    Anomaly(#[from] AnomalyError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Result type for orchestration.
pub type Result<T> = std::result::Result<T, OrchestratorError>;
