//! Time-Series Source Core
//!
//! Paged history draining, entry-id encoding, pipeline windows, and CSV
//! fixtures for the catalog and history contracts.

mod csv_source;
pub mod entry_id;
mod paged;
pub mod window;

pub use csv_source::{CsvHistorySource, StaticCatalog};
pub use entry_id::{decode_entry_id, encode_entry_id, ENTRY_ID_SEPARATOR};
pub use paged::{PagedHistorySource, DEFAULT_PAGE_LIMIT};
pub use window::{
    compose_timestamp, window_for, window_length, INFERENCE_WINDOW_SECS, RETRAIN_WINDOW_SECS,
};
