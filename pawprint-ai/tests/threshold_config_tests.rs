//! Threshold configuration files

use pawprint_ai::models::{BucketKind, EvidenceVector};
use pawprint_ai::{FusionEngine, ThresholdConfig};
use pawprint_common::Error;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_overrides_defaults() {
    let file = write_file("version = 1\nanomaly_hi = 0.5\n\n[weights]\nsemantic = 0.4\n");
    let config = ThresholdConfig::load(file.path()).unwrap();
    assert_eq!(config.anomaly_hi, 0.5);
    assert_eq!(config.weights.semantic, 0.4);
    assert_eq!(config.anomaly_contribution, 0.25);
}

#[test]
fn test_loaded_thresholds_change_scoring() {
    let evidence = EvidenceVector {
        anomaly_score: Some(0.55),
        ..Default::default()
    };
    let default_report = FusionEngine::new(ThresholdConfig::default())
        .unwrap()
        .analyze(&evidence);

    let file = write_file("anomaly_hi = 0.5\n");
    let tuned = ThresholdConfig::load(file.path()).unwrap();
    let tuned_report = FusionEngine::new(tuned).unwrap().analyze(&evidence);

    assert_eq!(default_report.ai_probability, 0.01);
    assert!(tuned_report.ai_probability > 0.01);
}

#[test]
fn test_missing_file_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = ThresholdConfig::load(&dir.path().join("absent.toml"));
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_inverted_thresholds_rejected() {
    let file = write_file("freq_mid = 0.8\nfreq_hi = 0.6\n");
    let err = ThresholdConfig::load(file.path()).unwrap_err();
    assert!(err.to_string().contains("freq_mid"), "got {}", err);
}

#[test]
fn test_zero_weight_rejected() {
    let config = ThresholdConfig::default().with_weight(BucketKind::Text, 0.0);
    assert!(config.validate().is_err());
    assert!(FusionEngine::new(config).is_err());
}

#[test]
fn test_toml_round_trip() {
    let original = ThresholdConfig::default().with_weight(BucketKind::Temporal, 0.33);
    let text = toml::to_string(&original).unwrap();
    let file = write_file(&text);
    assert_eq!(ThresholdConfig::load(file.path()).unwrap(), original);
}
