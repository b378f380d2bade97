//! Table contract checks between the builder, the classifier and storage.
//!
//! Header names must match exactly. No case folding, no trimming. Extra
//! columns (such as an unnamed index column) are ignored.

use anomaly_spi::{AnomalyError, AnomalyLabel, FittedParameters, Result, Table};

use crate::classifier::ParameterTable;

/// Position of each required column of `table` within `headers`.
///
/// The returned indices follow `table.columns()` order.
pub fn resolve_columns(table: Table, headers: &[&str]) -> Result<Vec<usize>> {
    table
        .columns()
        .iter()
        .map(|&column| {
            let mut matches = headers
                .iter()
                .enumerate()
                .filter(|(_, h)| **h == column)
                .map(|(i, _)| i);
            match (matches.next(), matches.next()) {
                (Some(idx), None) => Ok(idx),
                (Some(_), Some(_)) => Err(AnomalyError::schema(
                    table.name(),
                    format!("a single '{}' column", column),
                    "duplicate header",
                )),
                (None, _) => Err(AnomalyError::schema(
                    table.name(),
                    format!("column '{}'", column),
                    format!("headers [{}]", headers.join(", ")),
                )),
            }
        })
        .collect()
}

fn type_mismatch(table: Table, column: &str, row: usize, expected: &str, field: &str) -> AnomalyError {
    AnomalyError::schema(
        table.name(),
        format!("{} in column '{}'", expected, column),
        format!("'{}' at row {}", field, row),
    )
}

/// Non-empty text field.
pub fn parse_text<'a>(table: Table, column: &str, row: usize, field: &'a str) -> Result<&'a str> {
    if field.is_empty() {
        return Err(type_mismatch(table, column, row, "non-empty text", field));
    }
    Ok(field)
}

/// Required floating-point field.
pub fn parse_float(table: Table, column: &str, row: usize, field: &str) -> Result<f64> {
    field
        .parse::<f64>()
        .map_err(|_| type_mismatch(table, column, row, "a number", field))
}

/// Floating-point field where an empty cell means "undefined" (NaN).
pub fn parse_optional_float(table: Table, column: &str, row: usize, field: &str) -> Result<f64> {
    if field.is_empty() {
        return Ok(f64::NAN);
    }
    parse_float(table, column, row, field)
}

/// Integer field.
pub fn parse_int(table: Table, column: &str, row: usize, field: &str) -> Result<i64> {
    field
        .parse::<i64>()
        .map_err(|_| type_mismatch(table, column, row, "an integer", field))
}

/// `is_anomaly` field: `0`, `1`, or empty.
pub fn parse_label(table: Table, column: &str, row: usize, field: &str) -> Result<AnomalyLabel> {
    AnomalyLabel::from_column_str(field)
        .ok_or_else(|| type_mismatch(table, column, row, "0, 1 or empty", field))
}

/// Check a fitted parameter set before it is handed to the classifier or
/// persisted: names present and one row per key.
pub fn check_parameter_set(params: &[FittedParameters]) -> Result<()> {
    for (row, p) in params.iter().enumerate() {
        parse_text(Table::Parameters, anomaly_spi::schema::ASSET_NAME, row, &p.asset_name)?;
        parse_text(Table::Parameters, anomaly_spi::schema::POINT_NAME, row, &p.point_name)?;
    }
    ParameterTable::from_params(params).map(|_| ())
}

/// Fail on the first parameter row with an undefined statistic.
pub fn ensure_non_degenerate(params: &[FittedParameters]) -> Result<()> {
    match params.iter().find(|p| p.is_degenerate()) {
        Some(p) => Err(AnomalyError::degenerate(&p.asset_name, &p.point_name)),
        None => Ok(()),
    }
}
