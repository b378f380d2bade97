//! Object key layout.
//!
//! | table       | key                                         |
//! |-------------|---------------------------------------------|
//! | raw         | `{pipeline_type}/{event_id}/{site_id}.csv`  |
//! | model       | `models/{site_id}/model.csv`                |
//! | classified  | `{event_id}/{site_id}_{asset}_{point}.csv`  |

use anomaly_api::PipelineType;

use crate::error::{Result, StorageError};

/// Reject segments that would collapse or escape the key hierarchy.
pub fn validate_segment(segment: &str) -> Result<&str> {
    let reason = if segment.is_empty() {
        "must not be empty"
    } else if segment.contains('/') || segment.contains('\\') {
        "must not contain path separators"
    } else if segment == "." || segment == ".." {
        "must not be a relative path component"
    } else {
        return Ok(segment);
    };
    Err(StorageError::InvalidKey {
        segment: segment.to_string(),
        reason: reason.to_string(),
    })
}

/// Key of the raw readings fetched for one site in one run.
pub fn raw_readings_key(pipeline_type: PipelineType, event_id: &str, site_id: &str) -> Result<String> {
    Ok(format!(
        "{}/{}/{}.csv",
        pipeline_type,
        validate_segment(event_id)?,
        validate_segment(site_id)?
    ))
}

/// Key of a site's current fitted parameters.
pub fn model_key(site_id: &str) -> Result<String> {
    Ok(format!("models/{}/model.csv", validate_segment(site_id)?))
}

/// Key of one classified (asset, point) series.
pub fn classified_key(event_id: &str, site_id: &str, asset_name: &str, point_name: &str) -> Result<String> {
    Ok(format!(
        "{}/{}_{}_{}.csv",
        validate_segment(event_id)?,
        validate_segment(site_id)?,
        validate_segment(asset_name)?,
        validate_segment(point_name)?
    ))
}
