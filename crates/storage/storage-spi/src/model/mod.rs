//! Storage models.

pub mod object_key;

pub use object_key::{classified_key, model_key, raw_readings_key, validate_segment};
