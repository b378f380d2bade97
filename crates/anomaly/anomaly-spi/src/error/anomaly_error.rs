//! Anomaly scoring error types.

use thiserror::Error;

/// Errors raised by the model builder, the classifier and the table contract.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnomalyError {
    #[error("Empty input: at least one reading is required")]
    EmptyInput,

    #[error("Invalid reading at row {row}: {reason}")]
    InvalidReading { row: usize, reason: String },

    #[error("Duplicate parameters for ({asset_name}, {point_name})")]
    DuplicateParameter {
        asset_name: String,
        point_name: String,
    },

    #[error("Unknown asset/point ({asset_name}, {point_name}): no fitted parameters")]
    UnknownAssetPoint {
        asset_name: String,
        point_name: String,
    },

    #[error("Schema mismatch in {table} table: expected {expected}, found {found}")]
    SchemaMismatch {
        table: String,
        expected: String,
        found: String,
    },

    #[error("Degenerate model for ({asset_name}, {point_name}): standard deviation is undefined")]
    DegenerateModel {
        asset_name: String,
        point_name: String,
    },

    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },
}

impl AnomalyError {
    /// Build an `UnknownAssetPoint` error.
    pub fn unknown(asset_name: &str, point_name: &str) -> Self {
        AnomalyError::UnknownAssetPoint {
            asset_name: asset_name.to_string(),
            point_name: point_name.to_string(),
        }
    }

    /// Build a `DuplicateParameter` error.
    pub fn duplicate(asset_name: &str, point_name: &str) -> Self {
        AnomalyError::DuplicateParameter {
            asset_name: asset_name.to_string(),
            point_name: point_name.to_string(),
        }
    }

    /// Build a `DegenerateModel` error.
    pub fn degenerate(asset_name: &str, point_name: &str) -> Self {
        AnomalyError::DegenerateModel {
            asset_name: asset_name.to_string(),
            point_name: point_name.to_string(),
        }
    }

    /// Build a `SchemaMismatch` error.
    pub fn schema(table: &str, expected: impl Into<String>, found: impl Into<String>) -> Self {
        AnomalyError::SchemaMismatch {
            table: table.to_string(),
            expected: expected.into(),
            found: found.into(),
        }
    }
}

/// Result type for anomaly scoring operations.
pub type Result<T> = std::result::Result<T, AnomalyError>;
