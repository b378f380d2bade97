//! Anomaly Scoring Facade
//!
//! Unified re-exports for the anomaly scoring module.
//!
//! This facade provides a single entry point to all scoring functionality:
//! - `Reading`, `FittedParameters`, `AnomalyLabel` and `AnomalyError` from SPI
//! - `BandConfig` and its builder from API
//! - `fit`, `classify`, `MeanStdBuilder`, `BandClassifier` and the table
//!   contract checks from Core
//!
//! # Example
//!
//! ```rust
//! use anomaly_facade::{classify, fit, AnomalyLabel, Reading};
//!
//! let training = vec![
//!     Reading::new("RTU1", "temp", 70.0, 1),
//!     Reading::new("RTU1", "temp", 72.0, 2),
//!     Reading::new("RTU1", "temp", 68.0, 3),
//! ];
//! let params = fit(&training).unwrap();
//!
//! let live = vec![Reading::new("RTU1", "temp", 75.0, 4)];
//! let labels = classify(&live, &params).unwrap();
//! assert_eq!(labels[0].label, AnomalyLabel::Anomalous);
//! ```

// Re-export everything from SPI
pub use anomaly_spi::*;

// Re-export everything from API
pub use anomaly_api::*;

// Re-export everything from Core
pub use anomaly_core::*;
