//! Query time windows.

use serde::Serialize;

use crate::error::{Result, SourceError};

const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Half-open interval `(start, end]` in epoch seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    start: i64,
    end: i64,
}

impl TimeWindow {
    /// Create a window; `end` must be after `start`.
    pub fn new(start: i64, end: i64) -> Result<Self> {
        if end <= start {
            return Err(SourceError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn end(&self) -> i64 {
        self.end
    }

    pub fn duration_secs(&self) -> i64 {
        self.end - self.start
    }

    /// Whether an epoch-nanosecond timestamp falls inside the window.
    pub fn contains_nanos(&self, timestamp: i64) -> bool {
        let start = self.start.saturating_mul(NANOS_PER_SECOND);
        let end = self.end.saturating_mul(NANOS_PER_SECOND);
        timestamp > start && timestamp <= end
    }
}
