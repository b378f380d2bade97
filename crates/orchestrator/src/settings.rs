//! Bucket layout and store location read from the environment.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::{OrchestratorError, Result};

pub const DATA_BUCKET_VAR: &str = "DATA_BUCKET";
pub const MODEL_ARTIFACT_BUCKET_VAR: &str = "MODEL_ARTIFACT_BUCKET";
pub const OUTPUT_BUCKET_VAR: &str = "OUTPUT_BUCKET";
pub const STORE_ROOT_VAR: &str = "STORE_ROOT";

/// Where each stage reads and writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineSettings {
    /// Raw readings tables.
    pub data_bucket: String,
    /// Fitted parameter tables.
    pub model_artifact_bucket: String,
    /// Classified readings tables.
    pub output_bucket: String,
    /// Root directory of the local object store.
    pub store_root: PathBuf,
}

impl PipelineSettings {
    /// Load from the process environment, reading a `.env` file first if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| -> Result<String> {
            match lookup(name) {
                Some(value) if !value.trim().is_empty() => Ok(value),
                Some(_) => Err(OrchestratorError::Config(format!("{} may not be empty", name))),
                None => Err(OrchestratorError::Config(format!(
                    "{} environment variable is required",
                    name
                ))),
            }
        };

        Ok(Self {
            data_bucket: required(DATA_BUCKET_VAR)?,
            model_artifact_bucket: required(MODEL_ARTIFACT_BUCKET_VAR)?,
            output_bucket: required(OUTPUT_BUCKET_VAR)?,
            store_root: PathBuf::from(required(STORE_ROOT_VAR)?),
        })
    }
}
