//! Classification result types.

use serde::{Deserialize, Serialize};

use super::reading::Reading;

/// Outcome of the band test for one reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnomalyLabel {
    /// Inside the band.
    Normal,
    /// Outside the band.
    Anomalous,
    /// The fitted parameters were undefined; no verdict.
    Indeterminate,
}

impl AnomalyLabel {
    /// `Some(true)` for anomalous, `Some(false)` for normal, `None` otherwise.
    pub fn is_anomaly(&self) -> Option<bool> {
        match self {
            AnomalyLabel::Normal => Some(false),
            AnomalyLabel::Anomalous => Some(true),
            AnomalyLabel::Indeterminate => None,
        }
    }

    /// Value of the `is_anomaly` column: `0`, `1`, or empty.
    pub fn as_column_str(&self) -> &'static str {
        match self {
            AnomalyLabel::Normal => "0",
            AnomalyLabel::Anomalous => "1",
            AnomalyLabel::Indeterminate => "",
        }
    }

    /// Parse an `is_anomaly` column value.
    pub fn from_column_str(field: &str) -> Option<Self> {
        match field {
            "0" => Some(AnomalyLabel::Normal),
            "1" => Some(AnomalyLabel::Anomalous),
            "" => Some(AnomalyLabel::Indeterminate),
            _ => None,
        }
    }
}

/// A reading paired with its label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedReading {
    pub reading: Reading,
    pub label: AnomalyLabel,
}

impl ClassifiedReading {
    /// Create a new classified reading.
    pub fn new(reading: Reading, label: AnomalyLabel) -> Self {
        Self { reading, label }
    }
}

/// Indices of readings labelled anomalous.
pub fn anomaly_indices(classified: &[ClassifiedReading]) -> Vec<usize> {
    classified
        .iter()
        .enumerate()
        .filter_map(|(i, c)| (c.label == AnomalyLabel::Anomalous).then_some(i))
        .collect()
}

/// Count of readings labelled anomalous.
pub fn anomaly_count(classified: &[ClassifiedReading]) -> usize {
    classified
        .iter()
        .filter(|c| c.label == AnomalyLabel::Anomalous)
        .count()
}
