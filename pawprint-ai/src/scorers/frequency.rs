//! Frequency-domain artifact proxy
//!
//! Generators tend to suppress high-frequency detail and leave periodic
//! upsampling patterns. Both are counted per sampled frame.

use super::{checked_frames, frame_series, BucketScorer, ScorerOutput};
use crate::error::ScorerError;
use crate::models::{BucketKind, EvidenceVector};
use crate::params::ThresholdConfig;

const BASE_SCORE: f64 = 0.4;
const SUPPRESSION_WEIGHT: f64 = 0.4;
const PERIODICITY_WEIGHT: f64 = 0.3;

pub struct FrequencyScorer;

/// Fraction of `series` for which `hit` holds (0 for an empty series)
fn hit_ratio(series: &[f64], hit: impl Fn(f64) -> bool) -> f64 {
    if series.is_empty() {
        return 0.0;
    }
    series.iter().filter(|v| hit(**v)).count() as f64 / series.len() as f64
}

impl BucketScorer for FrequencyScorer {
    fn name(&self) -> &'static str {
        "frequency"
    }

    fn bucket(&self) -> BucketKind {
        BucketKind::Frequency
    }

    fn score(
        &self,
        evidence: &EvidenceVector,
        config: &ThresholdConfig,
    ) -> Result<Option<ScorerOutput>, ScorerError> {
        let Some(frames) = checked_frames(evidence)? else {
            return Ok(None);
        };
        let high_freq = frame_series(frames, "high_freq_energy_ratio", |f| f.high_freq_energy_ratio)?;
        let periodic = frame_series(frames, "periodic_energy", |f| f.periodic_energy)?;
        if high_freq.is_empty() && periodic.is_empty() {
            return Ok(None);
        }

        let suppression = hit_ratio(&high_freq, |v| v < config.hf_suppression_max);
        let periodicity = hit_ratio(&periodic, |v| v > config.periodicity_min);
        let score =
            (BASE_SCORE + SUPPRESSION_WEIGHT * suppression + PERIODICITY_WEIGHT * periodicity).min(1.0);

        let description = if score >= config.freq_hi {
            "High frequency-domain artifacts detected"
        } else if score >= config.freq_mid {
            "Moderate frequency anomalies"
        } else {
            "Normal frequency distribution"
        };

        if score < config.freq_mid {
            return Ok(Some(ScorerOutput::new(self.bucket(), 0.0, description)));
        }
        Ok(Some(
            ScorerOutput::new(self.bucket(), score * config.frequency_scale, description)
                .strong(score >= config.freq_hi)
                .with_note(format!("Frequency domain: {}", description)),
        ))
    }
}
