//! Delimited-text encoding of pipeline tables.
//!
//! Every table is written with a header row in `Table::columns()` order.
//! Undefined statistics are written as empty cells and read back as NaN.

use anomaly_core::schema::{
    parse_float, parse_int, parse_label, parse_optional_float, parse_text, resolve_columns,
};
use anomaly_spi::schema::{ASSET_NAME, IS_ANOMALY, MEAN, POINT_NAME, STD, TIMESTAMP, VALUE};
use anomaly_spi::{AnomalyLabel, ClassifiedReading, FittedParameters, Reading, Table};
use storage_spi::{Result, StorageError};

fn csv_error(err: csv::Error) -> StorageError {
    StorageError::Csv(err.to_string())
}

/// Shortest round-trip form; NaN becomes an empty cell.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        value.to_string()
    }
}

fn new_writer(table: Table) -> Result<csv::Writer<Vec<u8>>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(table.columns()).map_err(csv_error)?;
    Ok(writer)
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>> {
    writer
        .into_inner()
        .map_err(|e| StorageError::Csv(e.to_string()))
}

/// Parsed body of a table: required column positions plus data rows.
struct RawTable {
    columns: Vec<usize>,
    records: Vec<csv::StringRecord>,
}

impl RawTable {
    fn parse(table: Table, body: &[u8]) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(body);
        let headers = reader.headers().map_err(csv_error)?.clone();
        let names: Vec<&str> = headers.iter().collect();
        let columns = resolve_columns(table, &names)?;
        let records = reader
            .records()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(csv_error)?;
        Ok(Self { columns, records })
    }

    fn field<'a>(&self, record: &'a csv::StringRecord, column: usize) -> &'a str {
        record.get(self.columns[column]).unwrap_or("")
    }
}

// ============================================================================
// Readings
// ============================================================================

pub fn encode_readings(readings: &[Reading]) -> Result<Vec<u8>> {
    let mut writer = new_writer(Table::Readings)?;
    for r in readings {
        let value = format_float(r.value);
        let timestamp = r.timestamp.to_string();
        writer
            .write_record([
                r.asset_name.as_str(),
                r.point_name.as_str(),
                value.as_str(),
                timestamp.as_str(),
            ])
            .map_err(csv_error)?;
    }
    finish(writer)
}

pub fn decode_readings(body: &[u8]) -> Result<Vec<Reading>> {
    let table = Table::Readings;
    let raw = RawTable::parse(table, body)?;
    raw.records
        .iter()
        .enumerate()
        .map(|(row, record)| {
            Ok(Reading {
                asset_name: parse_text(table, ASSET_NAME, row, raw.field(record, 0))?.to_string(),
                point_name: parse_text(table, POINT_NAME, row, raw.field(record, 1))?.to_string(),
                value: parse_float(table, VALUE, row, raw.field(record, 2))?,
                timestamp: parse_int(table, TIMESTAMP, row, raw.field(record, 3))?,
            })
        })
        .collect()
}

// ============================================================================
// Fitted parameters
// ============================================================================

pub fn encode_parameters(params: &[FittedParameters]) -> Result<Vec<u8>> {
    let mut writer = new_writer(Table::Parameters)?;
    for p in params {
        let mean = format_float(p.mean);
        let std = format_float(p.std);
        writer
            .write_record([
                p.asset_name.as_str(),
                p.point_name.as_str(),
                mean.as_str(),
                std.as_str(),
            ])
            .map_err(csv_error)?;
    }
    finish(writer)
}

pub fn decode_parameters(body: &[u8]) -> Result<Vec<FittedParameters>> {
    let table = Table::Parameters;
    let raw = RawTable::parse(table, body)?;
    raw.records
        .iter()
        .enumerate()
        .map(|(row, record)| {
            Ok(FittedParameters {
                asset_name: parse_text(table, ASSET_NAME, row, raw.field(record, 0))?.to_string(),
                point_name: parse_text(table, POINT_NAME, row, raw.field(record, 1))?.to_string(),
                mean: parse_optional_float(table, MEAN, row, raw.field(record, 2))?,
                std: parse_optional_float(table, STD, row, raw.field(record, 3))?,
            })
        })
        .collect()
}

// ============================================================================
// Classified readings
// ============================================================================

pub fn encode_classified(classified: &[ClassifiedReading]) -> Result<Vec<u8>> {
    let mut writer = new_writer(Table::Classified)?;
    for c in classified {
        let value = format_float(c.reading.value);
        let timestamp = c.reading.timestamp.to_string();
        writer
            .write_record([
                c.reading.asset_name.as_str(),
                c.reading.point_name.as_str(),
                value.as_str(),
                timestamp.as_str(),
                c.label.as_column_str(),
            ])
            .map_err(csv_error)?;
    }
    finish(writer)
}

pub fn decode_classified(body: &[u8]) -> Result<Vec<ClassifiedReading>> {
    let table = Table::Classified;
    let raw = RawTable::parse(table, body)?;
    raw.records
        .iter()
        .enumerate()
        .map(|(row, record)| {
            let reading = Reading {
                asset_name: parse_text(table, ASSET_NAME, row, raw.field(record, 0))?.to_string(),
                point_name: parse_text(table, POINT_NAME, row, raw.field(record, 1))?.to_string(),
                value: parse_float(table, VALUE, row, raw.field(record, 2))?,
                timestamp: parse_int(table, TIMESTAMP, row, raw.field(record, 3))?,
            };
            let label: AnomalyLabel = parse_label(table, IS_ANOMALY, row, raw.field(record, 4))?;
            Ok(ClassifiedReading::new(reading, label))
        })
        .collect()
}
