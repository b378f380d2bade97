//! Integration tests for orchestrator stages

use std::path::PathBuf;

use anomaly_api::PipelineType;
use anomaly_core::{BandClassifier, MeanStdBuilder};
use anomaly_spi::{AnomalyError, FittedParameters, Reading};
use orchestrator::{
    infer_site, ingest_site, plan_sites, retrain_site, InvocationContext, OrchestratorError,
    PipelineSettings, RetrainOptions, ScheduledEvent,
};
use source_core::{CsvHistorySource, StaticCatalog};
use source_spi::AssetPointRef;
use storage_core::{get_classified, get_parameters, get_readings, put_parameters, put_readings, MemoryObjectStore};
use storage_spi::{ObjectStore, Result as StorageResult, StorageError};

fn settings() -> PipelineSettings {
    PipelineSettings {
        data_bucket: "data".to_string(),
        model_artifact_bucket: "models".to_string(),
        output_bucket: "output".to_string(),
        store_root: PathBuf::from("unused"),
    }
}

fn catalog() -> StaticCatalog {
    StaticCatalog::new()
        .with_point("site-1", AssetPointRef::new("RTU1", "a-1", "brick:Zone_Air_Temperature_Sensor", "p-1"))
        .with_point("site-1", AssetPointRef::new("RTU1", "a-1", "brick:Supply_Fan_Status", "p-2"))
        .with_point("site-2", AssetPointRef::new("AHU1", "a-9", "brick:Mixed_Air_Temperature_Sensor", "p-9"))
}

fn nanos(secs: i64) -> i64 {
    secs * 1_000_000_000
}

/// Store that refuses writes whose key contains a marker.
struct RejectingStore {
    inner: MemoryObjectStore,
    marker: &'static str,
}

impl ObjectStore for RejectingStore {
    fn name(&self) -> &str {
        "rejecting"
    }

    fn write(&self, bucket: &str, key: &str, body: &[u8]) -> StorageResult<()> {
        if key.contains(self.marker) {
            return Err(StorageError::Io(format!("write refused: {}", key)));
        }
        self.inner.write(bucket, key, body)
    }

    fn read(&self, bucket: &str, key: &str) -> StorageResult<Vec<u8>> {
        self.inner.read(bucket, key)
    }

    fn exists(&self, bucket: &str, key: &str) -> StorageResult<bool> {
        self.inner.exists(bucket, key)
    }
}

#[test]
fn test_plan_one_context_per_site() {
    let event = ScheduledEvent::new("evt-9", vec!["rule/bms-retrainrule".to_string()]);
    let plan = plan_sites(&event, &catalog()).unwrap();

    assert_eq!(
        plan,
        vec![
            InvocationContext::new("site-1", "evt-9", PipelineType::Retrain),
            InvocationContext::new("site-2", "evt-9", PipelineType::Retrain),
        ]
    );
}

#[test]
fn test_plan_unknown_rule() {
    let event = ScheduledEvent::new("evt-9", vec!["rule/nightly".to_string()]);
    assert!(matches!(
        plan_sites(&event, &catalog()),
        Err(OrchestratorError::UnknownRule { .. })
    ));
}

#[test]
fn test_ingest_writes_windowed_readings() {
    let source = CsvHistorySource::from_readings(vec![
        Reading::new("RTU1", "Zone_Air_Temperature_Sensor", 70.0, nanos(3_000)),
        Reading::new("RTU1", "Zone_Air_Temperature_Sensor", 71.0, nanos(7_000)),
        Reading::new("RTU1", "Supply_Fan_Status", 1.0, nanos(7_100)),
        Reading::new("AHU1", "Mixed_Air_Temperature_Sensor", 55.0, nanos(7_100)),
    ]);
    let store = MemoryObjectStore::new();
    let ctx = InvocationContext::new("site-1", "evt-1", PipelineType::Inference);

    let summary = ingest_site(&ctx, 7_200, &catalog(), &source, &store, &settings()).unwrap();

    assert_eq!(summary.key, "inference/evt-1/site-1.csv");
    assert_eq!(summary.points, 2);
    assert_eq!(summary.readings, 2);
    assert_eq!(summary.window.start(), 3_600);

    let stored = get_readings(&store, "data", &summary.key).unwrap();
    assert_eq!(stored[0].value, 71.0);
    assert_eq!(stored[1].point_name, "Supply_Fan_Status");
}

#[test]
fn test_ingest_empty_window_writes_nothing() {
    let source = CsvHistorySource::default();
    let store = MemoryObjectStore::new();
    let ctx = InvocationContext::new("site-1", "evt-1", PipelineType::Retrain);

    let err = ingest_site(&ctx, 1_000_000, &catalog(), &source, &store, &settings()).unwrap_err();

    assert!(matches!(
        err,
        OrchestratorError::NoReadings { ref site_id, start: 136_000, end: 1_000_000 } if site_id == "site-1"
    ));
    assert!(store.is_empty().unwrap());
}

#[test]
fn test_ingest_unknown_site() {
    let store = MemoryObjectStore::new();
    let ctx = InvocationContext::new("site-404", "evt-1", PipelineType::Inference);
    let err = ingest_site(&ctx, 7_200, &catalog(), &CsvHistorySource::default(), &store, &settings())
        .unwrap_err();
    assert!(matches!(err, OrchestratorError::NoAssetPoints { .. }));
}

#[test]
fn test_retrain_stores_model() {
    let store = MemoryObjectStore::new();
    let ctx = InvocationContext::new("site-1", "evt-2", PipelineType::Retrain);
    put_readings(
        &store,
        "data",
        &ctx.raw_key().unwrap(),
        &[
            Reading::new("RTU1", "temp", 10.0, 1),
            Reading::new("RTU1", "temp", 12.0, 2),
            Reading::new("RTU1", "fan", 1.0, 1),
        ],
    )
    .unwrap();

    let pairs = retrain_site(&ctx, &MeanStdBuilder::new(), &store, &settings(), RetrainOptions::default())
        .unwrap();
    assert_eq!(pairs, 2);

    let model = get_parameters(&store, "models", "models/site-1/model.csv").unwrap();
    assert_eq!(model[0].point_name, "fan");
    assert!(model[0].std.is_nan());
    assert_eq!(model[1], FittedParameters::new("RTU1", "temp", 11.0, 2.0_f64.sqrt()));
}

#[test]
fn test_retrain_failure_keeps_previous_model() {
    let store = MemoryObjectStore::new();
    let ctx = InvocationContext::new("site-1", "evt-3", PipelineType::Retrain);
    let previous = vec![FittedParameters::new("RTU1", "temp", 70.0, 1.0)];
    put_parameters(&store, "models", &ctx.model_key().unwrap(), &previous).unwrap();
    put_readings(
        &store,
        "data",
        &ctx.raw_key().unwrap(),
        &[Reading::new("RTU1", "temp", 10.0, 1)],
    )
    .unwrap();

    let err = retrain_site(
        &ctx,
        &MeanStdBuilder::new(),
        &store,
        &settings(),
        RetrainOptions {
            reject_degenerate: true,
        },
    )
    .unwrap_err();

    assert!(matches!(err, OrchestratorError::Anomaly(AnomalyError::DegenerateModel { .. })));
    assert_eq!(get_parameters(&store, "models", "models/site-1/model.csv").unwrap(), previous);
}

#[test]
fn test_retrain_missing_raw_table() {
    let store = MemoryObjectStore::new();
    let ctx = InvocationContext::new("site-1", "evt-4", PipelineType::Retrain);
    let err = retrain_site(&ctx, &MeanStdBuilder::new(), &store, &settings(), RetrainOptions::default())
        .unwrap_err();
    assert!(matches!(err, OrchestratorError::Storage(StorageError::NotFound { .. })));
}

#[test]
fn test_inference_isolates_failing_series() {
    let store = RejectingStore {
        inner: MemoryObjectStore::new(),
        marker: "fan",
    };
    let ctx = InvocationContext::new("site-1", "evt-5", PipelineType::Inference);
    put_readings(
        &store,
        "data",
        &ctx.raw_key().unwrap(),
        &[
            Reading::new("RTU1", "temp", 75.0, 1),
            Reading::new("RTU1", "fan", 1.0, 1),
            Reading::new("RTU1", "damper", 0.3, 1),
            Reading::new("RTU1", "temp", 70.0, 2),
        ],
    )
    .unwrap();
    put_parameters(
        &store,
        "models",
        &ctx.model_key().unwrap(),
        &[
            FittedParameters::new("RTU1", "temp", 70.0, 2.0),
            FittedParameters::new("RTU1", "fan", 1.0, 0.0),
        ],
    )
    .unwrap();

    let report = infer_site(&ctx, &BandClassifier::default(), &store, &settings()).unwrap();

    assert!(!report.is_complete());
    assert_eq!(report.succeeded.len(), 1);
    assert_eq!(report.succeeded[0].object_key, "evt-5/site-1_RTU1_temp.csv");
    assert_eq!(report.succeeded[0].rows, 2);
    assert_eq!(report.anomaly_total(), 1);

    let failed: Vec<_> = report.failed.iter().map(|f| f.key.point_name.as_str()).collect();
    assert_eq!(failed, vec!["fan", "damper"]);
    assert!(report.failed[0].error.contains("write refused"));
    assert!(report.failed[1].error.contains("damper"));

    let written = get_classified(&store.inner, "output", "evt-5/site-1_RTU1_temp.csv").unwrap();
    assert_eq!(written.len(), 2);
    assert!(!store.inner.exists("output", "evt-5/site-1_RTU1_damper.csv").unwrap());
}

#[test]
fn test_inference_without_model_fails_whole_run() {
    let store = MemoryObjectStore::new();
    let ctx = InvocationContext::new("site-1", "evt-6", PipelineType::Inference);
    put_readings(&store, "data", &ctx.raw_key().unwrap(), &[Reading::new("RTU1", "temp", 1.0, 1)])
        .unwrap();

    let err = infer_site(&ctx, &BandClassifier::default(), &store, &settings()).unwrap_err();
    assert!(matches!(err, OrchestratorError::Storage(StorageError::NotFound { .. })));
    assert!(store.keys("output").unwrap().is_empty());
}

#[test]
fn test_inference_output_key_collision_is_reported() {
    let store = MemoryObjectStore::new();
    let ctx = InvocationContext::new("site-1", "evt-7", PipelineType::Inference);
    put_readings(
        &store,
        "data",
        &ctx.raw_key().unwrap(),
        &[
            Reading::new("RTU_1", "temp", 70.0, 1),
            Reading::new("RTU", "1_temp", 500.0, 1),
        ],
    )
    .unwrap();
    put_parameters(
        &store,
        "models",
        &ctx.model_key().unwrap(),
        &[
            FittedParameters::new("RTU_1", "temp", 70.0, 2.0),
            FittedParameters::new("RTU", "1_temp", 70.0, 2.0),
        ],
    )
    .unwrap();

    let report = infer_site(&ctx, &BandClassifier::default(), &store, &settings()).unwrap();

    assert_eq!(report.succeeded.len(), 1);
    assert_eq!(report.succeeded[0].key.asset_name, "RTU_1");
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].key.asset_name, "RTU");
    assert!(report.failed[0].error.contains("evt-7/site-1_RTU_1_temp.csv"));

    let written = get_classified(&store, "output", "evt-7/site-1_RTU_1_temp.csv").unwrap();
    assert_eq!(written.len(), 1);
    assert_eq!(written[0].reading.asset_name, "RTU_1");
}

#[test]
fn test_stages_reject_the_other_pipeline() {
    let store = MemoryObjectStore::new();
    let infer_ctx = InvocationContext::new("site-1", "evt-8", PipelineType::Inference);
    put_readings(
        &store,
        "data",
        &infer_ctx.raw_key().unwrap(),
        &[
            Reading::new("RTU1", "temp", 70.0, 1),
            Reading::new("RTU1", "temp", 72.0, 2),
        ],
    )
    .unwrap();

    let err = retrain_site(&infer_ctx, &MeanStdBuilder::new(), &store, &settings(), RetrainOptions::default())
        .unwrap_err();
    assert!(matches!(
        err,
        OrchestratorError::WrongPipeline {
            expected: PipelineType::Retrain,
            found: PipelineType::Inference,
        }
    ));
    assert!(!store.exists("models", "models/site-1/model.csv").unwrap());

    let retrain_ctx = InvocationContext::new("site-1", "evt-8", PipelineType::Retrain);
    assert!(matches!(
        infer_site(&retrain_ctx, &BandClassifier::default(), &store, &settings()),
        Err(OrchestratorError::WrongPipeline { .. })
    ));
}
