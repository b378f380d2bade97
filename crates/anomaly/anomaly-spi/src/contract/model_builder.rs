//! Model builder trait definition.

use crate::error::Result;
use crate::model::{FittedParameters, Reading};

/// Fits per-(asset, point) parameters from a training window.
///
/// Implementations are pure: no state survives between calls.
pub trait ModelBuilder: Send + Sync {
    /// Fit one parameter row per observed (asset, point) pair.
    fn fit(&self, readings: &[Reading]) -> Result<Vec<FittedParameters>>;
}
