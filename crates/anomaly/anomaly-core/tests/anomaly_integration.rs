//! Integration tests for anomaly-core

use anomaly_core::{classify, fit, group_by_series, BandClassifier, MeanStdBuilder};
use anomaly_spi::{AnomalyError, AnomalyLabel, FittedParameters, ModelBuilder, Reading, ReadingClassifier};

fn rtu1_temp(values: &[f64]) -> Vec<Reading> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| Reading::new("RTU1", "temp", v, i as i64))
        .collect()
}

fn params_for<'a>(params: &'a [FittedParameters], asset: &str, point: &str) -> &'a FittedParameters {
    params
        .iter()
        .find(|p| p.asset_name == asset && p.point_name == point)
        .expect("parameters for pair")
}

// ============================================================================
// Model Builder
// ============================================================================

#[test]
fn test_fit_three_readings() {
    let params = fit(&rtu1_temp(&[70.0, 72.0, 68.0])).unwrap();

    assert_eq!(params.len(), 1);
    assert_eq!(params[0].asset_name, "RTU1");
    assert_eq!(params[0].point_name, "temp");
    assert_eq!(params[0].mean, 70.0);
    assert_eq!(params[0].std, 2.0);
}

#[test]
fn test_fit_empty_input() {
    assert_eq!(fit(&[]).unwrap_err(), AnomalyError::EmptyInput);
}

#[test]
fn test_fit_single_reading_std_is_undefined() {
    let params = fit(&rtu1_temp(&[70.0])).unwrap();
    assert_eq!(params[0].mean, 70.0);
    assert!(params[0].std.is_nan());
    assert_ne!(params[0].std, 0.0);
}

#[test]
fn test_fit_one_row_per_pair() {
    let readings = vec![
        Reading::new("RTU1", "temp", 70.0, 1),
        Reading::new("RTU1", "humidity", 40.0, 1),
        Reading::new("RTU2", "temp", 60.0, 1),
        Reading::new("RTU1", "temp", 72.0, 2),
        Reading::new("RTU1", "humidity", 44.0, 2),
        Reading::new("RTU2", "temp", 62.0, 2),
    ];
    let params = fit(&readings).unwrap();

    assert_eq!(params.len(), 3);
    assert_eq!(params_for(&params, "RTU1", "temp").mean, 71.0);
    assert_eq!(params_for(&params, "RTU1", "humidity").mean, 42.0);
    assert_eq!(params_for(&params, "RTU2", "temp").mean, 61.0);
}

#[test]
fn test_fit_is_deterministic() {
    let readings: Vec<Reading> = (0..500)
        .map(|i| {
            let asset = if i % 3 == 0 { "RTU1" } else { "RTU2" };
            Reading::new(asset, "temp", 60.0 + (i as f64 * 0.37).sin() * 7.3, i)
        })
        .collect();

    let first = fit(&readings).unwrap();
    let second = fit(&readings).unwrap();

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.mean.to_bits(), b.mean.to_bits());
        assert_eq!(a.std.to_bits(), b.std.to_bits());
    }
}

#[test]
fn test_fit_invalid_reading() {
    let mut readings = rtu1_temp(&[70.0, 72.0]);
    readings.push(Reading::new("RTU1", "", 71.0, 9));
    assert!(matches!(
        fit(&readings),
        Err(AnomalyError::InvalidReading { row: 2, .. })
    ));
}

#[test]
fn test_builder_through_trait() {
    let builder: Box<dyn ModelBuilder> = Box::new(MeanStdBuilder::new());
    let params = builder.fit(&rtu1_temp(&[1.0, 2.0, 3.0])).unwrap();
    assert_eq!(params[0].mean, 2.0);
    assert_eq!(params[0].std, 1.0);
}

// ============================================================================
// Classifier
// ============================================================================

#[test]
fn test_classify_two_sigma_band() {
    let params = vec![FittedParameters::new("RTU1", "temp", 70.0, 2.0)];
    let result = classify(&rtu1_temp(&[75.0, 71.0]), &params).unwrap();

    assert_eq!(result[0].label, AnomalyLabel::Anomalous);
    assert_eq!(result[1].label, AnomalyLabel::Normal);
}

#[test]
fn test_classify_boundary_exclusivity() {
    let params = vec![FittedParameters::new("RTU1", "temp", 70.0, 2.0)];
    let upper = 70.0 + 2.0 * 2.0;
    let lower = 70.0 - 2.0 * 2.0;
    let result = classify(
        &rtu1_temp(&[upper, upper + 1e-9, lower, lower - 1e-9]),
        &params,
    )
    .unwrap();

    let labels: Vec<_> = result.iter().map(|c| c.label).collect();
    assert_eq!(
        labels,
        vec![
            AnomalyLabel::Normal,
            AnomalyLabel::Anomalous,
            AnomalyLabel::Normal,
            AnomalyLabel::Anomalous,
        ]
    );
}

#[test]
fn test_classify_unknown_pair_fails_batch() {
    let params = vec![FittedParameters::new("RTU1", "temp", 70.0, 2.0)];
    let readings = vec![
        Reading::new("RTU1", "temp", 70.0, 1),
        Reading::new("RTU2", "pressure", 10.0, 2),
    ];
    let err = classify(&readings, &params).unwrap_err();
    assert_eq!(
        err,
        AnomalyError::UnknownAssetPoint {
            asset_name: "RTU2".to_string(),
            point_name: "pressure".to_string(),
        }
    );
}

#[test]
fn test_classify_duplicate_parameters() {
    let params = vec![
        FittedParameters::new("RTU1", "temp", 70.0, 2.0),
        FittedParameters::new("RTU1", "temp", 70.0, 2.0),
    ];
    assert!(matches!(
        classify(&rtu1_temp(&[70.0]), &params),
        Err(AnomalyError::DuplicateParameter { .. })
    ));
}

#[test]
fn test_classify_degenerate_is_indeterminate() {
    let params = fit(&rtu1_temp(&[70.0])).unwrap();
    let result = classify(&rtu1_temp(&[70.0, 1000.0]), &params).unwrap();
    assert!(result.iter().all(|c| c.label == AnomalyLabel::Indeterminate));
    assert!(result.iter().all(|c| c.label.is_anomaly().is_none()));
}

#[test]
fn test_classify_preserves_rows() {
    let readings = vec![
        Reading::new("RTU1", "temp", 75.0, 30),
        Reading::new("RTU1", "fan", 0.5, 10),
        Reading::new("RTU1", "temp", 70.0, 20),
        Reading::new("RTU1", "fan", 9.0, 5),
    ];
    let params = vec![
        FittedParameters::new("RTU1", "temp", 70.0, 2.0),
        FittedParameters::new("RTU1", "fan", 0.5, 0.1),
    ];
    let result = classify(&readings, &params).unwrap();

    assert_eq!(result.len(), readings.len());
    for (classified, original) in result.iter().zip(readings.iter()) {
        assert_eq!(&classified.reading, original);
    }
    let labels: Vec<_> = result.iter().map(|c| c.label).collect();
    assert_eq!(
        labels,
        vec![
            AnomalyLabel::Anomalous,
            AnomalyLabel::Normal,
            AnomalyLabel::Normal,
            AnomalyLabel::Anomalous,
        ]
    );
}

#[test]
fn test_classify_empty_readings() {
    let params = vec![FittedParameters::new("RTU1", "temp", 70.0, 2.0)];
    assert!(classify(&[], &params).unwrap().is_empty());
}

#[test]
fn test_classifier_through_trait() {
    let classifier: Box<dyn ReadingClassifier> = Box::new(BandClassifier::new(1.0).unwrap());
    let params = vec![FittedParameters::new("RTU1", "temp", 70.0, 2.0)];
    let result = classifier.classify(&rtu1_temp(&[73.0]), &params).unwrap();
    assert_eq!(result[0].label, AnomalyLabel::Anomalous);
}

// ============================================================================
// Fit then classify
// ============================================================================

#[test]
fn test_fitted_parameters_feed_classifier() {
    let training = vec![
        Reading::new("RTU1", "temp", 70.0, 1),
        Reading::new("RTU1", "temp", 72.0, 2),
        Reading::new("RTU1", "temp", 68.0, 3),
        Reading::new("RTU2", "pressure", 10.0, 1),
        Reading::new("RTU2", "pressure", 12.0, 2),
    ];
    let params = fit(&training).unwrap();

    let live = vec![
        Reading::new("RTU2", "pressure", 11.0, 10),
        Reading::new("RTU1", "temp", 80.0, 10),
    ];
    let result = classify(&live, &params).unwrap();
    assert_eq!(result[0].label, AnomalyLabel::Normal);
    assert_eq!(result[1].label, AnomalyLabel::Anomalous);
}

#[test]
fn test_group_then_classify_matches_whole_batch() {
    let training = vec![
        Reading::new("RTU1", "temp", 70.0, 1),
        Reading::new("RTU1", "temp", 72.0, 2),
        Reading::new("RTU1", "fan", 1.0, 1),
        Reading::new("RTU1", "fan", 3.0, 2),
    ];
    let params = fit(&training).unwrap();
    let live = vec![
        Reading::new("RTU1", "fan", 2.0, 10),
        Reading::new("RTU1", "temp", 90.0, 10),
        Reading::new("RTU1", "fan", 9.0, 11),
    ];

    let whole = classify(&live, &params).unwrap();
    let mut per_group = Vec::new();
    for group in group_by_series(&live) {
        per_group.extend(classify(&group.readings, &params).unwrap());
    }

    for classified in &whole {
        assert!(per_group.contains(classified));
    }
}
