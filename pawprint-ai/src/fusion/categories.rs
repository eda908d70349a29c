//! Mapping from bucket scores to the six reporting categories

use crate::models::{clamp_unit, BucketKind, BucketScore, CategoryScores};
use std::collections::BTreeMap;

const ANATOMICAL_SUBJECT: f64 = 0.65;
const ANATOMICAL_FREQUENCY: f64 = 0.35;
const TEMPORAL_SCALE: f64 = 0.9;
const TEXTURE_SCALE: f64 = 0.85;

/// Absent buckets read as 0
pub fn map_categories(buckets: &BTreeMap<BucketKind, BucketScore>) -> CategoryScores {
    let raw = |kind: BucketKind| buckets.get(&kind).map_or(0.0, |b| b.raw_score);
    let frequency = raw(BucketKind::Frequency);
    let temporal = raw(BucketKind::Temporal);
    let subject = raw(BucketKind::SubjectSpecific);

    CategoryScores {
        impossible: raw(BucketKind::Impossible),
        anatomical: clamp_unit(ANATOMICAL_SUBJECT * subject + ANATOMICAL_FREQUENCY * frequency),
        motion: temporal,
        temporal: TEMPORAL_SCALE * temporal,
        texture: TEXTURE_SCALE * frequency,
        hashtag: raw(BucketKind::Text),
    }
}
