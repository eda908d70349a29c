//! Composite Score Aggregator
//!
//! Fixed-weight summary over the six report categories, used for persisted
//! analysis records. Independent of the fused probability.

use crate::models::{clamp_unit, CategoryScores};

pub const IMPOSSIBLE_WEIGHT: f64 = 0.25;
pub const ANATOMICAL_WEIGHT: f64 = 0.20;
pub const MOTION_WEIGHT: f64 = 0.15;
pub const TEMPORAL_WEIGHT: f64 = 0.15;
pub const TEXTURE_WEIGHT: f64 = 0.15;
pub const HASHTAG_WEIGHT: f64 = 0.10;

pub fn composite_score(categories: &CategoryScores) -> f64 {
    clamp_unit(
        IMPOSSIBLE_WEIGHT * categories.impossible
            + ANATOMICAL_WEIGHT * categories.anatomical
            + MOTION_WEIGHT * categories.motion
            + TEMPORAL_WEIGHT * categories.temporal
            + TEXTURE_WEIGHT * categories.texture
            + HASHTAG_WEIGHT * categories.hashtag,
    )
}
