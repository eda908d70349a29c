//! Impossible-scenario gate
//!
//! A caption describing a physically implausible scene is only evidence when
//! technical artifacts back it up: frequency or temporal at or above
//! `gate_freq_or_temporal`, or physiology at or above `gate_texture_or_phys`.

use crate::models::{BucketKind, BucketScore};
use crate::params::ThresholdConfig;
use crate::vocabulary::{NormalizedText, IMPOSSIBLE_PHRASES};
use std::collections::BTreeMap;

/// Gate decision for one analysis
#[derive(Debug, Clone, PartialEq)]
pub struct ImpossibleOutcome {
    /// Implausible phrases found in the caption
    pub claims: Vec<&'static str>,
    /// Whether corroborating artifacts let the claim count
    pub counted: bool,
    /// Added to the impossible bucket
    pub impossible_contribution: f64,
    /// Added to the subject-specific bucket
    pub subject_bonus: f64,
    pub notes: Vec<String>,
}

fn raw(buckets: &BTreeMap<BucketKind, BucketScore>, kind: BucketKind) -> f64 {
    buckets.get(&kind).map(|b| b.raw_score).unwrap_or(0.0)
}

/// Evaluate the gate; `None` when the caption makes no implausible claim
pub fn evaluate_impossible(
    caption: Option<&str>,
    buckets: &BTreeMap<BucketKind, BucketScore>,
    config: &ThresholdConfig,
) -> Option<ImpossibleOutcome> {
    let claims = NormalizedText::new(caption?).matches(IMPOSSIBLE_PHRASES);
    if claims.is_empty() {
        return None;
    }

    let corroborated = raw(buckets, BucketKind::Frequency) >= config.gate_freq_or_temporal
        || raw(buckets, BucketKind::Temporal) >= config.gate_freq_or_temporal
        || raw(buckets, BucketKind::Physiology) >= config.gate_texture_or_phys;

    let listed = claims.join(", ");
    let outcome = if corroborated {
        ImpossibleOutcome {
            claims,
            counted: true,
            impossible_contribution: config.impossible_contribution,
            subject_bonus: config.impossible_subject_bonus,
            notes: vec![format!(
                "Impossible scenario ({}): counted only due to corroborating artifacts.",
                listed
            )],
        }
    } else {
        ImpossibleOutcome {
            claims,
            counted: false,
            impossible_contribution: 0.0,
            subject_bonus: 0.0,
            notes: vec![format!(
                "Impossible scenario ({}) detected but NOT counted: no corroborating technical artifacts.",
                listed
            )],
        }
    };
    Some(outcome)
}
