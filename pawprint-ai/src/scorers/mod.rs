//! Bucket Scorers - one per evidence family
//!
//! Each scorer is a pure function of the evidence and the threshold
//! configuration. Three outcomes:
//! - `Ok(None)`: required input missing, the scorer is absent
//! - `Ok(Some(output))`: measured, possibly with a zero contribution
//! - `Err(ScorerError)`: malformed provider data (recovered as absent by the
//!   engine) or an internal fault (fails the analysis)
//!
//! Several scorers may feed the same bucket (e.g. lighting into semantic,
//! motion into temporal); the engine sums their contributions.

pub mod embedding;
pub mod frequency;
pub mod lighting;
pub mod motion;
pub mod physiology;
pub mod semantic;
pub mod subject;
pub mod temporal;
pub mod text;

use crate::error::ScorerError;
use crate::models::{BucketKind, EvidenceVector, FrameMeasurement};
use crate::params::ThresholdConfig;

pub use embedding::{EmbeddingClusterScorer, EmbeddingDistributionScorer};
pub use frequency::FrequencyScorer;
pub use lighting::LightingScorer;
pub use motion::MotionScorer;
pub use physiology::PhysiologyScorer;
pub use semantic::AnomalyScorer;
pub use subject::SubjectArtifactScorer;
pub use temporal::TemporalScorer;
pub use text::TextScorer;

/// Contribution of one scorer to one bucket
#[derive(Debug, Clone, PartialEq)]
pub struct ScorerOutput {
    pub bucket: BucketKind,
    /// Amount added to the bucket's raw score (≥ 0)
    pub contribution: f64,
    /// Crossed this scorer's strong threshold
    pub strong: bool,
    /// Short description of the measurement
    pub description: String,
    /// Findings appended to the report notes, in order
    pub notes: Vec<String>,
}

impl ScorerOutput {
    /// Negative contributions read as 0; NaN is kept so the engine can reject it
    pub fn new(bucket: BucketKind, contribution: f64, description: impl Into<String>) -> Self {
        Self {
            bucket,
            contribution: if contribution < 0.0 { 0.0 } else { contribution },
            strong: false,
            description: description.into(),
            notes: Vec::new(),
        }
    }

    pub fn strong(mut self, strong: bool) -> Self {
        self.strong = strong;
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

/// Uniform interface over all evidence-family scorers
pub trait BucketScorer: Send + Sync {
    /// Scorer name for notes and logs
    fn name(&self) -> &'static str;

    /// Bucket this scorer feeds
    fn bucket(&self) -> BucketKind;

    fn score(
        &self,
        evidence: &EvidenceVector,
        config: &ThresholdConfig,
    ) -> Result<Option<ScorerOutput>, ScorerError>;
}

/// Default scorer set, in note order
pub fn default_scorers() -> Vec<Box<dyn BucketScorer>> {
    vec![
        Box::new(EmbeddingDistributionScorer),
        Box::new(EmbeddingClusterScorer),
        Box::new(PhysiologyScorer),
        Box::new(AnomalyScorer),
        Box::new(FrequencyScorer),
        Box::new(TemporalScorer),
        Box::new(SubjectArtifactScorer),
        Box::new(LightingScorer),
        Box::new(MotionScorer),
        Box::new(TextScorer),
    ]
}

// ============================================================================
// Shared validation helpers
// ============================================================================

/// Validate a provider-supplied probability-like value
pub(crate) fn unit_value(field: &'static str, value: f64) -> Result<f64, ScorerError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ScorerError::malformed(field, format!("{} is outside [0, 1]", value)))
    }
}

/// Frame measurements after checking them against the declared sample count
pub(crate) fn checked_frames(
    evidence: &EvidenceVector,
) -> Result<Option<&[FrameMeasurement]>, ScorerError> {
    let Some(frames) = evidence.frame_measurements.as_deref() else {
        return Ok(None);
    };
    if let Some(declared) = evidence.frame_sample_count {
        if frames.len() > declared as usize {
            return Err(ScorerError::malformed(
                "frame_measurements",
                format!(
                    "{} measurements for {} sampled frames",
                    frames.len(),
                    declared
                ),
            ));
        }
    }
    for frame in frames {
        if !frame.position.is_finite() || !(0.0..=1.0).contains(&frame.position) {
            return Err(ScorerError::malformed(
                "frame_measurements",
                format!("frame position {} is outside [0, 1]", frame.position),
            ));
        }
    }
    Ok(Some(frames))
}

/// One unit-range measurement across frames, ordered by frame position
///
/// Frames without the measurement are skipped.
pub(crate) fn frame_series<F>(
    frames: &[FrameMeasurement],
    field: &'static str,
    pick: F,
) -> Result<Vec<f64>, ScorerError>
where
    F: Fn(&FrameMeasurement) -> Option<f64>,
{
    let mut series: Vec<(f64, f64)> = Vec::new();
    for frame in frames {
        if let Some(value) = pick(frame) {
            series.push((frame.position, unit_value(field, value)?));
        }
    }
    series.sort_by(|a, b| a.0.total_cmp(&b.0));
    Ok(series.into_iter().map(|(_, value)| value).collect())
}

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scorers_cover_every_measured_bucket() {
        let scorers = default_scorers();
        for kind in [
            BucketKind::Frequency,
            BucketKind::Physiology,
            BucketKind::Temporal,
            BucketKind::Semantic,
            BucketKind::SubjectSpecific,
            BucketKind::Text,
        ] {
            assert!(
                scorers.iter().any(|s| s.bucket() == kind),
                "no scorer feeds {}",
                kind
            );
        }
        // the impossible bucket is fed by its gate only
        assert!(!scorers.iter().any(|s| s.bucket() == BucketKind::Impossible));
    }

    #[test]
    fn test_sample_count_mismatch_is_malformed() {
        let evidence = EvidenceVector {
            frame_sample_count: Some(1),
            frame_measurements: Some(vec![FrameMeasurement::default(), FrameMeasurement::default()]),
            ..Default::default()
        };
        assert!(matches!(
            checked_frames(&evidence),
            Err(ScorerError::Malformed { field: "frame_measurements", .. })
        ));
    }

    #[test]
    fn test_frame_series_orders_by_position() {
        let frames = vec![
            FrameMeasurement {
                position: 0.9,
                stutter: Some(0.3),
                ..Default::default()
            },
            FrameMeasurement {
                position: 0.1,
                stutter: Some(0.7),
                ..Default::default()
            },
        ];
        assert_eq!(frame_series(&frames, "stutter", |f| f.stutter).unwrap(), vec![0.7, 0.3]);
    }

    #[test]
    fn test_frame_series_rejects_out_of_range() {
        let frames = vec![FrameMeasurement {
            stutter: Some(1.5),
            ..Default::default()
        }];
        assert!(frame_series(&frames, "stutter", |f| f.stutter).is_err());
    }
}
