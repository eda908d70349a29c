//! Motion-naturalness proxy (optical flow smoothness and stutter)

use super::{checked_frames, frame_series, mean, BucketScorer, ScorerOutput};
use crate::error::ScorerError;
use crate::models::{BucketKind, EvidenceVector};
use crate::params::ThresholdConfig;

pub struct MotionScorer;

impl BucketScorer for MotionScorer {
    fn name(&self) -> &'static str {
        "motion"
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
        let smoothness = mean(&frame_series(frames, "flow_smoothness", |f| f.flow_smoothness)?);
        let stutter = mean(&frame_series(frames, "stutter", |f| f.stutter)?);
        if smoothness.is_none() && stutter.is_none() {
            return Ok(None);
        }

        let too_smooth = smoothness.is_some_and(|s| s >= config.motion_smoothness_hi);
        let stuttering = stutter.is_some_and(|s| s >= config.motion_stutter_hi);

        let description = match (too_smooth, stuttering) {
            (true, _) => "motion too smooth",
            (false, true) => "frame stutter",
            (false, false) => "natural motion",
        };
        if !(too_smooth || stuttering) {
            return Ok(Some(ScorerOutput::new(self.bucket(), 0.0, description)));
        }
        Ok(Some(
            ScorerOutput::new(self.bucket(), config.motion_contribution, description)
                .with_note(format!("Motion: unnatural movement ({}).", description)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FrameMeasurement;

    fn motion(smoothness: Option<f64>, stutter: Option<f64>) -> EvidenceVector {
        EvidenceVector {
            frame_measurements: Some(vec![FrameMeasurement {
                flow_smoothness: smoothness,
                stutter,
                ..Default::default()
            }]),
            ..Default::default()
        }
    }

    #[test]
    fn test_absent_without_flow_data() {
        let config = ThresholdConfig::default();
        assert_eq!(MotionScorer.score(&motion(None, None), &config).unwrap(), None);
    }

    #[test]
    fn test_too_smooth() {
        let config = ThresholdConfig::default();
        let output = MotionScorer.score(&motion(Some(0.97), None), &config).unwrap().unwrap();
        assert_eq!(output.contribution, config.motion_contribution);
        assert_eq!(output.notes, vec!["Motion: unnatural movement (motion too smooth)."]);
        assert!(!output.strong);
    }

    #[test]
    fn test_stutter() {
        let config = ThresholdConfig::default();
        let output = MotionScorer
            .score(&motion(Some(0.5), Some(0.7)), &config)
            .unwrap()
            .unwrap();
        assert_eq!(output.description, "frame stutter");
    }

    #[test]
    fn test_natural_motion_contributes_nothing() {
        let config = ThresholdConfig::default();
        let output = MotionScorer
            .score(&motion(Some(0.6), Some(0.1)), &config)
            .unwrap()
            .unwrap();
        assert_eq!(output.contribution, 0.0);
        assert!(output.notes.is_empty());
    }
}
