//! Correlation ids for history requests.
//!
//! The id carries the asset and point labels through the history service
//! so returned samples can be attributed without a second lookup.

use source_spi::{strip_brick_prefix, AssetPointRef, Result, SourceError};

/// Separator between asset and point in an entry id.
pub const ENTRY_ID_SEPARATOR: &str = "_-_";

/// `"{asset}_-_{point}"`, with the point's `brick:` prefix removed.
pub fn encode_entry_id(point: &AssetPointRef) -> String {
    format!(
        "{}{}{}",
        point.asset_name,
        ENTRY_ID_SEPARATOR,
        strip_brick_prefix(&point.point_name)
    )
}

/// Split an entry id back into `(asset, point)`.
pub fn decode_entry_id(entry_id: &str) -> Result<(&str, &str)> {
    match entry_id.split_once(ENTRY_ID_SEPARATOR) {
        Some((asset, point)) if !asset.is_empty() && !point.is_empty() => Ok((asset, point)),
        _ => Err(SourceError::InvalidEntryId(entry_id.to_string())),
    }
}
