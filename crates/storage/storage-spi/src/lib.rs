//! Object Storage Service Provider Interface
//!
//! Defines the object store contract, storage errors and the key layout
//! used for raw readings, fitted models and classified output.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::ObjectStore;
pub use error::{Result, StorageError};
pub use model::{classified_key, model_key, raw_readings_key, validate_segment};
