//! Partitioning readings into per-series batches.

use std::collections::HashMap;

use anomaly_spi::{AssetPointKey, Reading};

/// The readings of one (asset, point) series, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesGroup {
    pub key: AssetPointKey,
    pub readings: Vec<Reading>,
}

/// Split readings by (asset, point).
///
/// Groups appear in order of first occurrence and rows keep their relative
/// order, so concatenating the groups of a single-series input returns it
/// unchanged.
pub fn group_by_series(readings: &[Reading]) -> Vec<SeriesGroup> {
    let mut index: HashMap<AssetPointKey, usize> = HashMap::new();
    let mut groups: Vec<SeriesGroup> = Vec::new();

    for reading in readings {
        let key = reading.key();
        let slot = match index.get(&key) {
            Some(&slot) => slot,
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(SeriesGroup {
                    key,
                    readings: Vec::new(),
                });
                groups.len() - 1
            }
        };
        groups[slot].readings.push(reading.clone());
    }

    groups
}
