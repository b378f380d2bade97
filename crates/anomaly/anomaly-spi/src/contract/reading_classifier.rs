//! Reading classifier trait definition.

use crate::error::Result;
use crate::model::{ClassifiedReading, FittedParameters, Reading};

/// Labels readings against previously fitted parameters.
pub trait ReadingClassifier: Send + Sync {
    /// Label every reading, preserving input order and length.
    fn classify(
        &self,
        readings: &[Reading],
        params: &[FittedParameters],
    ) -> Result<Vec<ClassifiedReading>>;
}
