//! Query windows per pipeline type.

use anomaly_api::PipelineType;
use source_spi::{Result, SourceError, TimeWindow};

/// Inference scores the last hour.
pub const INFERENCE_WINDOW_SECS: i64 = 60 * 60;
/// Retraining fits on the last ten days.
pub const RETRAIN_WINDOW_SECS: i64 = 10 * 24 * 60 * 60;

/// Length of the history window for a pipeline type.
pub fn window_length(pipeline_type: PipelineType) -> i64 {
    match pipeline_type {
        PipelineType::Inference => INFERENCE_WINDOW_SECS,
        PipelineType::Retrain => RETRAIN_WINDOW_SECS,
    }
}

/// Window ending at `end` (epoch seconds) for a pipeline type.
pub fn window_for(pipeline_type: PipelineType, end: i64) -> Result<TimeWindow> {
    let start = end
        .checked_sub(window_length(pipeline_type))
        .ok_or(SourceError::InvalidWindow { start: i64::MIN, end })?;
    TimeWindow::new(start, end)
}

/// Epoch nanoseconds from a seconds/offset pair.
pub fn compose_timestamp(time_in_seconds: i64, offset_in_nanos: i64) -> i64 {
    time_in_seconds
        .saturating_mul(1_000_000_000)
        .saturating_add(offset_in_nanos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inference_window() {
        let window = window_for(PipelineType::Inference, 1652732267).unwrap();
        assert_eq!(window.start(), 1652732267 - 3600);
        assert_eq!(window.end(), 1652732267);
    }

    #[test]
    fn test_retrain_window() {
        let window = window_for(PipelineType::Retrain, 1652732267).unwrap();
        assert_eq!(window.duration_secs(), 864_000);
    }

    #[test]
    fn test_window_start_underflow() {
        assert_eq!(
            window_for(PipelineType::Retrain, i64::MIN + 10).unwrap_err(),
            SourceError::InvalidWindow { start: i64::MIN, end: i64::MIN + 10 }
        );
        assert!(window_for(PipelineType::Inference, i64::MIN + 3599).is_err());
        assert_eq!(window_for(PipelineType::Inference, i64::MIN + 3600).unwrap().start(), i64::MIN);
    }

    #[test]
    fn test_compose_timestamp() {
        assert_eq!(compose_timestamp(1652732267, 0), 1_652_732_267_000_000_000);
        assert_eq!(compose_timestamp(1652732267, 500), 1_652_732_267_000_000_500);
        assert!(compose_timestamp(1, 999_999_999) < compose_timestamp(2, 0));
    }
}
