//! Data models for anomaly scoring.
//!
//! This module contains data structures used throughout the pipeline.

mod anomaly_label;
mod fitted_parameters;
mod reading;
pub mod schema;

pub use anomaly_label::{anomaly_count, anomaly_indices, AnomalyLabel, ClassifiedReading};
pub use fitted_parameters::FittedParameters;
pub use reading::{AssetPointKey, Reading};
pub use schema::Table;
