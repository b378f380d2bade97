//! Pipeline Orchestration
//!
//! Turns a scheduled event into per-site invocations and runs the ingest,
//! retrain and inference stages against an object store.
//!
//! ```text
//! event ──plan_sites──► [site ctx] ──ingest_site──► raw table
//!                                    ├─retrain_site──► models/{site}/model.csv
//!                                    └─infer_site────► {event}/{site}_{asset}_{point}.csv
//! ```

pub mod build;
pub mod context;
pub mod error;
pub mod inference;
pub mod ingest;
pub mod retrain;
pub mod settings;

pub use build::{await_build, BuildStatus, BuildTrigger, PollConfig};
pub use context::{plan_sites, InvocationContext, ScheduledEvent};
pub use error::{OrchestratorError, Result};
pub use inference::{infer_site, FailedSeries, InferenceReport, ScoredSeries};
pub use ingest::{ingest_site, IngestSummary};
pub use retrain::{retrain_site, RetrainOptions};
pub use settings::PipelineSettings;
