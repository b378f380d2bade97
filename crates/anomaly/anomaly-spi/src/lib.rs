//! Anomaly Scoring Service Provider Interface
//!
//! Defines the reading/parameter data model, the error taxonomy and the
//! builder/classifier contracts.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{ModelBuilder, ReadingClassifier};
pub use error::{AnomalyError, Result};
pub use model::{
    anomaly_count, anomaly_indices, schema, AnomalyLabel, AssetPointKey,
    ClassifiedReading, FittedParameters, Reading, Table,
};
