//! Anomaly Scoring Core
//!
//! The mean/std model builder, the band classifier and the table contract
//! checks that sit between them.
//!
//! Everything here is a pure function of its arguments. Calls share no
//! state, so the same inputs always produce the same outputs.

mod builder;
mod classifier;
pub mod schema;
mod shaping;

use anomaly_spi::{ClassifiedReading, FittedParameters, ModelBuilder, ReadingClassifier, Reading, Result};

pub use builder::{mean, sample_std, MeanStdBuilder};
pub use classifier::{BandClassifier, ParameterTable};
pub use schema::{check_parameter_set, ensure_non_degenerate};
pub use shaping::{group_by_series, SeriesGroup};

/// Fit one (mean, sample std) row per (asset, point) pair in `readings`.
pub fn fit(readings: &[Reading]) -> Result<Vec<FittedParameters>> {
    MeanStdBuilder::new().fit(readings)
}

/// Label each reading against `params` with the default two-sigma band.
pub fn classify(readings: &[Reading], params: &[FittedParameters]) -> Result<Vec<ClassifiedReading>> {
    BandClassifier::default().classify(readings, params)
}
