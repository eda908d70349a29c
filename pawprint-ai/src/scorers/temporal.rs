//! Temporal-consistency proxy
//!
//! Identity jumps between adjacent samples and interpolation blur are the two
//! temporal cues. At least two frames with temporal data are required.

use super::{checked_frames, frame_series, mean, BucketScorer, ScorerOutput};
use crate::error::ScorerError;
use crate::models::{BucketKind, EvidenceVector};
use crate::params::ThresholdConfig;

const BASE_INCONSISTENCY: f64 = 0.2;
const PER_JUMP: f64 = 0.15;
const BLUR_WEIGHT: f64 = 0.25;
const MIN_FRAMES: usize = 2;

pub struct TemporalScorer;

impl BucketScorer for TemporalScorer {
    fn name(&self) -> &'static str {
        "temporal"
    }

    fn bucket(&self) -> BucketKind {
        BucketKind::Temporal
    }

    fn score(
        &self,
        evidence: &EvidenceVector,
        config: &ThresholdConfig,
    ) -> Result<Option<ScorerOutput>, ScorerError> {
        let Some(frames) = checked_frames(evidence)? else {
            return Ok(None);
        };
        let with_temporal_data = frames
            .iter()
            .filter(|f| f.embedding_delta.is_some() || f.interpolation_blur.is_some())
            .count();
        if with_temporal_data < MIN_FRAMES {
            return Ok(None);
        }

        let deltas = frame_series(frames, "embedding_delta", |f| f.embedding_delta)?;
        let blur = frame_series(frames, "interpolation_blur", |f| f.interpolation_blur)?;

        let jumps = deltas.iter().filter(|d| **d > config.identity_jump_delta).count();
        let mean_blur = mean(&blur).unwrap_or(0.0);
        let inconsistency =
            (BASE_INCONSISTENCY + PER_JUMP * jumps as f64 + BLUR_WEIGHT * mean_blur).min(1.0);

        let description = if inconsistency >= config.temporal_hi {
            "Significant identity/pose instability"
        } else if inconsistency >= config.temporal_mid {
            "Moderate temporal flicker or interpolation artifacts"
        } else {
            "Stable temporal coherence"
        };

        let mut output = ScorerOutput::new(
            self.bucket(),
            inconsistency * config.temporal_scale,
            format!("{} ({} identity jumps)", description, jumps),
        )
        .strong(inconsistency >= config.temporal_mid);
        if inconsistency >= config.temporal_mid {
            output = output.with_note(format!("Temporal: {}", description));
        }
        Ok(Some(output))
    }
}
