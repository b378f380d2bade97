//! Paged history responses.

use serde::{Deserialize, Serialize};

use super::window::TimeWindow;
use crate::error::{Result, SourceError};

/// A typed property value as returned by the history service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    Double(f64),
    Integer(i64),
    Boolean(bool),
    String(String),
}

impl PropertyValue {
    /// Numeric form used by the model. Booleans map to 0/1; strings must parse.
    pub fn as_f64(&self) -> Result<f64> {
        match self {
            PropertyValue::Double(v) => Ok(*v),
            PropertyValue::Integer(v) => Ok(*v as f64),
            PropertyValue::Boolean(v) => Ok(if *v { 1.0 } else { 0.0 }),
            PropertyValue::String(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| SourceError::ParseError(format!("non-numeric value '{}'", s))),
        }
    }
}

/// One historical sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryValue {
    pub time_in_seconds: i64,
    pub offset_in_nanos: i64,
    pub value: PropertyValue,
}

/// Request for the history of one (asset, property) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryRequest {
    /// Opaque correlation id echoed back in the page.
    pub entry_id: String,
    pub asset_id: String,
    pub property_id: String,
    pub window: TimeWindow,
}

/// One page of results; `next_token` is set while more pages remain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPage {
    pub entry_id: String,
    pub values: Vec<HistoryValue>,
    pub next_token: Option<String>,
}
