//! Column names shared by the builder, classifier and storage codec.

/// Asset identifier column.
pub const ASSET_NAME: &str = "asset_name";
/// Point identifier column.
pub const POINT_NAME: &str = "point_name";
/// Measurement column.
pub const VALUE: &str = "value";
/// Ordering key column.
pub const TIMESTAMP: &str = "timestamp";
/// Fitted mean column.
pub const MEAN: &str = "mean";
/// Fitted standard deviation column.
pub const STD: &str = "std";
/// Classification column.
pub const IS_ANOMALY: &str = "is_anomaly";

/// The tables exchanged between pipeline stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    /// Raw readings from the time-series source.
    Readings,
    /// Builder output, classifier input.
    Parameters,
    /// Classifier output.
    Classified,
}

impl Table {
    /// Required columns, in the order they are written.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Table::Readings => &[ASSET_NAME, POINT_NAME, VALUE, TIMESTAMP],
            Table::Parameters => &[ASSET_NAME, POINT_NAME, MEAN, STD],
            Table::Classified => &[ASSET_NAME, POINT_NAME, VALUE, TIMESTAMP, IS_ANOMALY],
        }
    }

    /// Short name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Table::Readings => "readings",
            Table::Parameters => "parameters",
            Table::Classified => "classified",
        }
    }
}
