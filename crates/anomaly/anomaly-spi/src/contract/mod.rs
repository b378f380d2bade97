//! Contract definitions for anomaly scoring.
//!
//! This module contains trait definitions that providers must implement.

mod model_builder;
mod reading_classifier;

pub use model_builder::ModelBuilder;
pub use reading_classifier::ReadingClassifier;
