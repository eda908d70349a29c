//! Subject-specific artifact proxy (animal anatomy, fur texture, micro-motion)
//!
//! Never strong on its own: anatomy cues are too noisy to corroborate a claim.

use super::{checked_frames, frame_series, mean, BucketScorer, ScorerOutput};
use crate::error::ScorerError;
use crate::models::{BucketKind, EvidenceVector};
use crate::params::ThresholdConfig;

const JOINT_WEIGHT: f64 = 0.5;
const TEXTURE_WEIGHT: f64 = 0.3;
const MICRO_MOTION_WEIGHT: f64 = 0.2;

const JOINT_NOTE_ABOVE: f64 = 0.6;
const TEXTURE_NOTE_ABOVE: f64 = 0.5;
const MICRO_MOTION_NOTE_BELOW: f64 = 0.2;

pub struct SubjectArtifactScorer;

impl BucketScorer for SubjectArtifactScorer {
    fn name(&self) -> &'static str {
        "subject-artifact"
    }

    fn bucket(&self) -> BucketKind {
        BucketKind::SubjectSpecific
    }

    fn score(
        &self,
        evidence: &EvidenceVector,
        config: &ThresholdConfig,
    ) -> Result<Option<ScorerOutput>, ScorerError> {
        let Some(frames) = checked_frames(evidence)? else {
            return Ok(None);
        };
        let joints = frame_series(frames, "joint_angle_anomaly", |f| f.joint_angle_anomaly)?;
        let texture = frame_series(frames, "texture_uniformity", |f| f.texture_uniformity)?;
        let micro = frame_series(frames, "micro_motion", |f| f.micro_motion)?;

        let worst_joint = joints.iter().copied().reduce(f64::max);
        let mean_texture = mean(&texture);
        let mean_micro = mean(&micro);

        // Weighted mean over the cues that were actually measured
        let cues = [
            (worst_joint, JOINT_WEIGHT),
            (mean_texture, TEXTURE_WEIGHT),
            (mean_micro.map(|m| 1.0 - m), MICRO_MOTION_WEIGHT),
        ];
        let (weighted, total_weight) = cues
            .iter()
            .filter_map(|(value, weight)| value.map(|v| (v * weight, *weight)))
            .fold((0.0, 0.0), |(sum, w), (vw, weight)| (sum + vw, w + weight));
        if total_weight == 0.0 {
            return Ok(None);
        }
        let artifact = weighted / total_weight;

        let mut output = ScorerOutput::new(
            self.bucket(),
            (artifact - config.subject_floor).max(0.0) * config.subject_scale,
            format!("subject artifact score {:.2}", artifact),
        );
        if worst_joint.is_some_and(|j| j > JOINT_NOTE_ABOVE) {
            output = output.with_note("Subject: implausible joint angles in pose estimate.");
        }
        if mean_texture.is_some_and(|t| t > TEXTURE_NOTE_ABOVE) {
            output = output.with_note("Subject: unnaturally uniform fur/skin texture.");
        }
        if mean_micro.is_some_and(|m| m < MICRO_MOTION_NOTE_BELOW) {
            output = output.with_note("Subject: missing natural micro-movements.");
        }
        Ok(Some(output))
    }
}
