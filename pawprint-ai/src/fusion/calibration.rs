//! Weighted fusion and the two calibration steps applied after it

use crate::gates::StyleHints;
use crate::models::{BucketKind, BucketScore};
use crate::params::ThresholdConfig;
use std::collections::BTreeMap;

/// Buckets above this raw score get a confidence note
pub(crate) fn confidence_notes(
    buckets: &BTreeMap<BucketKind, BucketScore>,
    config: &ThresholdConfig,
) -> Vec<String> {
    buckets
        .values()
        .filter(|b| b.raw_score > config.confidence_note_threshold)
        .map(|b| format!("{} confidence: {:.0}%", b.kind, b.raw_score * 100.0))
        .collect()
}

/// Weighted mean of boosted bucket scores
///
/// Only buckets with a raw score above 0 take part, so a present-but-zero
/// bucket neither adds evidence nor dilutes the others. Returns 0 when no
/// bucket contributed.
pub fn fuse_buckets(buckets: &BTreeMap<BucketKind, BucketScore>, config: &ThresholdConfig) -> f64 {
    let (weighted, total_weight) = buckets
        .values()
        .filter(|b| b.raw_score > 0.0)
        .fold((0.0, 0.0), |(sum, weight), b| {
            let boosted = b.raw_score.powf(config.boost_exponent);
            (sum + boosted * b.weight, weight + b.weight)
        });
    if total_weight > 0.0 {
        weighted / total_weight
    } else {
        0.0
    }
}

/// Strong buckets among frequency, temporal and physiology
pub fn independent_strong_signals(buckets: &BTreeMap<BucketKind, BucketScore>) -> u32 {
    buckets
        .values()
        .filter(|b| b.strong && b.kind.counts_as_independent())
        .count() as u32
}

/// Scale down likely-stylised media that lacks independent corroboration
pub fn apply_style_downweight(
    probability: f64,
    style: &StyleHints,
    strong_signals: u32,
    config: &ThresholdConfig,
    notes: &mut Vec<String>,
) -> f64 {
    if strong_signals >= config.min_signals_for_strong_claim {
        return probability;
    }
    let factor = if style.cgi_likelihood >= config.cgi_likely_hi {
        config.cgi_strong_downweight
    } else if style.cgi_likelihood >= config.cgi_likely_lo {
        config.cgi_mild_downweight
    } else {
        return probability;
    };

    let adjusted = probability * factor;
    notes.push(format!(
        "Style down-weight: CGI likelihood {:.0}% with {} strong signal(s), {:.1}% -> {:.1}%.",
        style.cgi_likelihood * 100.0,
        strong_signals,
        probability * 100.0,
        adjusted * 100.0
    ));
    adjusted
}

/// Compress very high probabilities that rest on fewer than the required strong signals
pub fn apply_confidence_cap(
    probability: f64,
    strong_signals: u32,
    config: &ThresholdConfig,
    notes: &mut Vec<String>,
) -> f64 {
    if probability <= config.high_confidence_threshold
        || strong_signals >= config.min_signals_for_strong_claim
    {
        return probability;
    }
    let capped = config.cap_anchor + (probability - config.cap_anchor) * config.cap_slope;
    notes.push(format!(
        "Confidence cap: {} of {} required strong signals, {:.1}% -> {:.1}%.",
        strong_signals,
        config.min_signals_for_strong_claim,
        probability * 100.0,
        capped * 100.0
    ));
    capped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket(kind: BucketKind, raw: f64, strong: bool) -> (BucketKind, BucketScore) {
        let config = ThresholdConfig::default();
        (kind, BucketScore::new(kind, raw, config.weights.for_kind(kind), strong))
    }

    fn cgi(likelihood: f64) -> StyleHints {
        StyleHints {
            cgi_likelihood: likelihood,
            live_action_likelihood: 1.0 - 0.85 * likelihood,
            notes: vec![],
        }
    }

    #[test]
    fn test_fuse_empty_is_zero() {
        assert_eq!(fuse_buckets(&BTreeMap::new(), &ThresholdConfig::default()), 0.0);
    }

    #[test]
    fn test_zero_buckets_do_not_dilute() {
        let config = ThresholdConfig::default();
        let alone: BTreeMap<_, _> = [bucket(BucketKind::Temporal, 0.5, false)].into_iter().collect();
        let with_zero: BTreeMap<_, _> = [
            bucket(BucketKind::Temporal, 0.5, false),
            bucket(BucketKind::Physiology, 0.0, false),
        ]
        .into_iter()
        .collect();
        assert_eq!(fuse_buckets(&alone, &config), fuse_buckets(&with_zero, &config));
        assert!((fuse_buckets(&alone, &config) - 0.5f64.powf(0.82)).abs() < 1e-12);
    }

    #[test]
    fn test_weighted_mean_of_boosted_scores() {
        let config = ThresholdConfig::default();
        let buckets: BTreeMap<_, _> = [
            bucket(BucketKind::Frequency, 1.0, true),
            bucket(BucketKind::Impossible, 0.35, false),
        ]
        .into_iter()
        .collect();
        let expected = (1.0 * 0.25 + 0.35f64.powf(0.82) * 0.10) / 0.35;
        assert!((fuse_buckets(&buckets, &config) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_strong_count_ignores_non_independent_buckets() {
        let buckets: BTreeMap<_, _> = [
            bucket(BucketKind::Frequency, 0.6, true),
            bucket(BucketKind::Semantic, 0.6, true),
            bucket(BucketKind::Physiology, 0.5, true),
            bucket(BucketKind::Temporal, 0.2, false),
        ]
        .into_iter()
        .collect();
        assert_eq!(independent_strong_signals(&buckets), 2);
    }

    #[test]
    fn test_strong_cgi_downweight_is_exact() {
        let config = ThresholdConfig::default();
        let mut notes = vec![];
        let adjusted = apply_style_downweight(0.8, &cgi(0.9), 0, &config, &mut notes);
        assert_eq!(adjusted, 0.8 * 0.55);
        assert_eq!(notes.len(), 1);
        assert!(notes[0].contains("80.0% -> 44.0%"), "got {}", notes[0]);
    }

    #[test]
    fn test_mild_cgi_downweight() {
        let config = ThresholdConfig::default();
        let mut notes = vec![];
        let adjusted = apply_style_downweight(0.5, &cgi(0.5), 1, &config, &mut notes);
        assert_eq!(adjusted, 0.5 * 0.8);
    }

    #[test]
    fn test_downweight_skipped_with_corroboration_or_live_action() {
        let config = ThresholdConfig::default();
        let mut notes = vec![];
        assert_eq!(apply_style_downweight(0.8, &cgi(0.9), 2, &config, &mut notes), 0.8);
        assert_eq!(apply_style_downweight(0.8, &cgi(0.2), 0, &config, &mut notes), 0.8);
        assert!(notes.is_empty());
    }

    #[test]
    fn test_cap_compresses_high_probability() {
        let config = ThresholdConfig::default();
        let mut notes = vec![];
        let capped = apply_confidence_cap(0.95, 1, &config, &mut notes);
        assert!((capped - 0.83).abs() < 1e-12);
        assert!(notes[0].starts_with("Confidence cap"));
    }

    #[test]
    fn test_cap_not_applied_at_threshold_or_with_signals() {
        let config = ThresholdConfig::default();
        let mut notes = vec![];
        assert_eq!(apply_confidence_cap(0.85, 0, &config, &mut notes), 0.85);
        assert_eq!(apply_confidence_cap(0.95, 2, &config, &mut notes), 0.95);
        assert!(notes.is_empty());
    }
}
