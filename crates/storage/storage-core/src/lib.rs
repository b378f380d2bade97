//! Object Storage Core
//!
//! CSV codec for pipeline tables, local and in-memory object stores, and
//! typed helpers that move tables in and out of a store.

pub mod codec;
mod local;
mod memory;

use anomaly_core::check_parameter_set;
use anomaly_spi::{ClassifiedReading, FittedParameters, Reading};
use storage_spi::{ObjectStore, Result};

pub use local::LocalObjectStore;
pub use memory::MemoryObjectStore;

/// Write a raw readings table.
pub fn put_readings<S: ObjectStore + ?Sized>(
    store: &S,
    bucket: &str,
    key: &str,
    readings: &[Reading],
) -> Result<()> {
    store.write(bucket, key, &codec::encode_readings(readings)?)
}

/// Read a raw readings table.
pub fn get_readings<S: ObjectStore + ?Sized>(store: &S, bucket: &str, key: &str) -> Result<Vec<Reading>> {
    codec::decode_readings(&store.read(bucket, key)?)
}

/// Write a fitted parameter table after checking it is well formed.
pub fn put_parameters<S: ObjectStore + ?Sized>(
    store: &S,
    bucket: &str,
    key: &str,
    params: &[FittedParameters],
) -> Result<()> {
    check_parameter_set(params)?;
    store.write(bucket, key, &codec::encode_parameters(params)?)
}

/// Read a fitted parameter table, rejecting unnamed or repeated pairs.
pub fn get_parameters<S: ObjectStore + ?Sized>(
    store: &S,
    bucket: &str,
    key: &str,
) -> Result<Vec<FittedParameters>> {
    let params = codec::decode_parameters(&store.read(bucket, key)?)?;
    check_parameter_set(&params)?;
    Ok(params)
}

/// Write a classified readings table.
pub fn put_classified<S: ObjectStore + ?Sized>(
    store: &S,
    bucket: &str,
    key: &str,
    classified: &[ClassifiedReading],
) -> Result<()> {
    store.write(bucket, key, &codec::encode_classified(classified)?)
}

/// Read a classified readings table.
pub fn get_classified<S: ObjectStore + ?Sized>(
    store: &S,
    bucket: &str,
    key: &str,
) -> Result<Vec<ClassifiedReading>> {
    codec::decode_classified(&store.read(bucket, key)?)
}
