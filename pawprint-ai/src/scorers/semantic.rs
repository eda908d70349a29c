//! Semantic-anomaly proxy backed by an external visual anomaly model

use super::{unit_value, BucketScorer, ScorerOutput};
use crate::error::ScorerError;
use crate::models::{BucketKind, EvidenceVector};
use crate::params::ThresholdConfig;

pub struct AnomalyScorer;

impl BucketScorer for AnomalyScorer {
    fn name(&self) -> &'static str {
        "anomaly"
    }

    fn bucket(&self) -> BucketKind {
        BucketKind::Semantic
    }

    fn score(
        &self,
        evidence: &EvidenceVector,
        config: &ThresholdConfig,
    ) -> Result<Option<ScorerOutput>, ScorerError> {
        let Some(raw) = evidence.anomaly_score else {
            return Ok(None);
        };
        let anomaly = unit_value("anomaly_score", raw)?;
        let description = format!("visual anomaly {:.2}", anomaly);

        if anomaly > config.anomaly_hi {
            Ok(Some(
                ScorerOutput::new(self.bucket(), config.anomaly_contribution, description)
                    .with_note(format!("Visual anomaly: {:.1}% (semantic outlier).", anomaly * 100.0)),
            ))
        } else {
            Ok(Some(ScorerOutput::new(self.bucket(), 0.0, description)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anomaly_above_threshold_contributes() {
        let config = ThresholdConfig::default();
        let evidence = EvidenceVector {
            anomaly_score: Some(0.8),
            ..Default::default()
        };
        let output = AnomalyScorer.score(&evidence, &config).unwrap().unwrap();
        assert_eq!(output.contribution, config.anomaly_contribution);
        assert!(!output.strong);
        assert_eq!(output.notes.len(), 1);
    }

    #[test]
    fn test_low_anomaly_present_with_zero() {
        let config = ThresholdConfig::default();
        let evidence = EvidenceVector {
            anomaly_score: Some(0.3),
            ..Default::default()
        };
        let output = AnomalyScorer.score(&evidence, &config).unwrap().unwrap();
        assert_eq!(output.contribution, 0.0);
    }

    #[test]
    fn test_out_of_range_is_malformed() {
        let config = ThresholdConfig::default();
        let evidence = EvidenceVector {
            anomaly_score: Some(7.0),
            ..Default::default()
        };
        assert!(AnomalyScorer.score(&evidence, &config).is_err());
    }
}
