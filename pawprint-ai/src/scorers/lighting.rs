//! Lighting-consistency proxy
//!
//! Shadow directions across a real clip agree; generated clips drift.

use super::{checked_frames, BucketScorer, ScorerOutput};
use crate::error::ScorerError;
use crate::models::{BucketKind, EvidenceVector};
use crate::params::ThresholdConfig;

const MIN_FRAMES: usize = 2;

pub struct LightingScorer;

/// Smallest absolute angle between two directions, in degrees (0..=180)
fn angular_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

/// Circular mean of directions in degrees
fn circular_mean(directions: &[f64]) -> f64 {
    let (sin, cos) = directions.iter().fold((0.0, 0.0), |(s, c), deg| {
        let rad = deg.to_radians();
        (s + rad.sin(), c + rad.cos())
    });
    sin.atan2(cos).to_degrees().rem_euclid(360.0)
}

impl BucketScorer for LightingScorer {
    fn name(&self) -> &'static str {
        "lighting"
    }

    fn bucket(&self) -> BucketKind {
        BucketKind::Semantic
    }

    fn score(
        &self,
        evidence: &EvidenceVector,
        config: &ThresholdConfig,
    ) -> Result<Option<ScorerOutput>, ScorerError> {
        let Some(frames) = checked_frames(evidence)? else {
            return Ok(None);
        };
        let mut directions = Vec::new();
        for deg in frames.iter().filter_map(|f| f.shadow_direction_deg) {
            if !deg.is_finite() || !(0.0..360.0).contains(&deg) {
                return Err(ScorerError::malformed(
                    "shadow_direction_deg",
                    format!("{} is outside [0, 360)", deg),
                ));
            }
            directions.push(deg);
        }
        if directions.len() < MIN_FRAMES {
            return Ok(None);
        }

        let center = circular_mean(&directions);
        let spread = directions
            .iter()
            .map(|d| angular_distance(*d, center))
            .fold(0.0, f64::max);
        let description = format!("shadow direction spread {:.1}°", spread);

        if spread > config.shadow_spread_max_deg {
            Ok(Some(
                ScorerOutput::new(self.bucket(), config.lighting_contribution, description)
                    .with_note("Lighting: inconsistent shadow directions across frames."),
            ))
        } else {
            Ok(Some(ScorerOutput::new(self.bucket(), 0.0, description)))
        }
    }
}
