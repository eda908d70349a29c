//! Physiology/deepfake proxy backed by an external deepfake model

use super::{unit_value, BucketScorer, ScorerOutput};
use crate::error::ScorerError;
use crate::models::{BucketKind, EvidenceVector};
use crate::params::ThresholdConfig;

pub struct PhysiologyScorer;

impl BucketScorer for PhysiologyScorer {
    fn name(&self) -> &'static str {
        "physiology"
    }

    fn bucket(&self) -> BucketKind {
        BucketKind::Physiology
    }

    fn score(
        &self,
        evidence: &EvidenceVector,
        config: &ThresholdConfig,
    ) -> Result<Option<ScorerOutput>, ScorerError> {
        let Some(raw) = evidence.deepfake_probability else {
            return Ok(None);
        };
        let probability = unit_value("deepfake_probability", raw)?;
        let description = format!("deepfake model probability {:.2}", probability);

        if probability > config.physiology_strong {
            Ok(Some(
                ScorerOutput::new(self.bucket(), config.physiology_contribution, description)
                    .strong(true)
                    .with_note(format!(
                        "Deepfake model: {:.1}% fake probability.",
                        probability * 100.0
                    )),
            ))
        } else {
            Ok(Some(ScorerOutput::new(self.bucket(), 0.0, description)))
        }
    }
}
