//! Threshold configuration for the scoring engine
//!
//! Every tunable number the engine uses lives in [`ThresholdConfig`]. It is
//! loaded once at startup (TOML file or compiled defaults), validated, and
//! then shared read-only. Retuning means building a new value; nothing
//! mutates a configuration in place.
//!
//! # TOML layout
//! ```toml
//! version = 1
//! freq_hi = 0.72
//!
//! [weights]
//! temporal = 0.28
//! ```
//! Omitted keys keep their compiled defaults. Unknown keys are rejected.

use crate::models::BucketKind;
use pawprint_common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Schema version this build understands
pub const THRESHOLD_CONFIG_VERSION: u32 = 1;

/// Per-bucket fusion weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BucketWeights {
    pub frequency: f64,
    pub physiology: f64,
    pub temporal: f64,
    pub semantic: f64,
    pub subject_specific: f64,
    pub impossible: f64,
    pub text: f64,
}

impl Default for BucketWeights {
    fn default() -> Self {
        Self {
            frequency: 0.25,
            physiology: 0.20,
            temporal: 0.30,
            semantic: 0.25,
            subject_specific: 0.26,
            impossible: 0.10,
            text: 0.10,
        }
    }
}

impl BucketWeights {
    pub fn for_kind(&self, kind: BucketKind) -> f64 {
        match kind {
            BucketKind::Frequency => self.frequency,
            BucketKind::Physiology => self.physiology,
            BucketKind::Temporal => self.temporal,
            BucketKind::Semantic => self.semantic,
            BucketKind::SubjectSpecific => self.subject_specific,
            BucketKind::Impossible => self.impossible,
            BucketKind::Text => self.text,
        }
    }
}

/// Named, versioned constants driving every scorer, gate and calibration step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThresholdConfig {
    /// Schema version (must equal [`THRESHOLD_CONFIG_VERSION`])
    pub version: u32,

    // ---- Embedding distribution / clustering ----
    pub clip_variance_hi: f64,
    pub clip_entropy_lo: f64,
    pub clip_kurtosis_abs: f64,
    pub clip_cluster_hi: f64,
    pub clip_distribution_contribution: f64,
    pub clip_kurtosis_contribution: f64,
    pub clip_cluster_contribution: f64,

    // ---- Semantic anomaly ----
    pub anomaly_hi: f64,
    pub anomaly_contribution: f64,

    // ---- Physiology / deepfake model ----
    pub physiology_strong: f64,
    pub physiology_contribution: f64,

    // ---- Frequency domain ----
    pub freq_mid: f64,
    pub freq_hi: f64,
    /// High-frequency energy ratio below this counts as suppression
    pub hf_suppression_max: f64,
    /// Periodic energy above this counts as a periodicity hit
    pub periodicity_min: f64,
    pub frequency_scale: f64,

    // ---- Temporal consistency ----
    pub temporal_mid: f64,
    pub temporal_hi: f64,
    /// Adjacent-frame embedding distance counted as an identity/pose jump
    pub identity_jump_delta: f64,
    pub temporal_scale: f64,

    // ---- Subject-specific artifacts ----
    pub subject_floor: f64,
    pub subject_scale: f64,

    // ---- Lighting ----
    pub shadow_spread_max_deg: f64,
    pub lighting_contribution: f64,

    // ---- Motion ----
    pub motion_smoothness_hi: f64,
    pub motion_stutter_hi: f64,
    pub motion_contribution: f64,

    // ---- Text / hashtags ----
    pub hashtag_contribution: f64,
    pub hint_word_contribution: f64,

    // ---- Impossible-scenario gate ----
    pub gate_freq_or_temporal: f64,
    pub gate_texture_or_phys: f64,
    pub impossible_contribution: f64,
    pub impossible_subject_bonus: f64,

    // ---- Style down-weighting ----
    pub cgi_likely_lo: f64,
    pub cgi_likely_hi: f64,
    pub cgi_strong_downweight: f64,
    pub cgi_mild_downweight: f64,

    // ---- Fusion calibration ----
    pub boost_exponent: f64,
    pub min_signals_for_strong_claim: u32,
    pub high_confidence_threshold: f64,
    pub cap_anchor: f64,
    pub cap_slope: f64,
    pub probability_floor: f64,
    pub probability_ceiling: f64,
    /// Buckets above this raw score get a confidence note
    pub confidence_note_threshold: f64,

    pub weights: BucketWeights,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            version: THRESHOLD_CONFIG_VERSION,

            clip_variance_hi: 0.78,
            clip_entropy_lo: 0.32,
            clip_kurtosis_abs: 3.0,
            clip_cluster_hi: 0.72,
            clip_distribution_contribution: 0.35,
            clip_kurtosis_contribution: 0.22,
            clip_cluster_contribution: 0.22,

            anomaly_hi: 0.62,
            anomaly_contribution: 0.25,

            physiology_strong: 0.60,
            physiology_contribution: 0.50,

            freq_mid: 0.55,
            freq_hi: 0.70,
            hf_suppression_max: 0.35,
            periodicity_min: 0.50,
            frequency_scale: 0.55,

            temporal_mid: 0.45,
            temporal_hi: 0.60,
            identity_jump_delta: 0.35,
            temporal_scale: 0.65,

            subject_floor: 0.10,
            subject_scale: 0.75,

            shadow_spread_max_deg: 35.0,
            lighting_contribution: 0.18,

            motion_smoothness_hi: 0.92,
            motion_stutter_hi: 0.50,
            motion_contribution: 0.28,

            hashtag_contribution: 0.15,
            hint_word_contribution: 0.12,

            gate_freq_or_temporal: 0.52,
            gate_texture_or_phys: 0.50,
            impossible_contribution: 0.35,
            impossible_subject_bonus: 0.12,

            cgi_likely_lo: 0.35,
            cgi_likely_hi: 0.70,
            cgi_strong_downweight: 0.55,
            cgi_mild_downweight: 0.80,

            boost_exponent: 0.82,
            min_signals_for_strong_claim: 2,
            high_confidence_threshold: 0.85,
            cap_anchor: 0.75,
            cap_slope: 0.4,
            probability_floor: 0.01,
            probability_ceiling: 0.99,
            confidence_note_threshold: 0.30,

            weights: BucketWeights::default(),
        }
    }
}

fn check_unit(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::Config(format!("{} must be in [0, 1], got {}", name, value)))
    }
}

fn check_ordered(lo_name: &str, lo: f64, hi_name: &str, hi: f64) -> Result<()> {
    if lo <= hi {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "{} ({}) must not exceed {} ({})",
            lo_name, lo, hi_name, hi
        )))
    }
}

impl ThresholdConfig {
    /// Validate configuration parameters
    ///
    /// # Errors
    /// `Error::Config` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.version != THRESHOLD_CONFIG_VERSION {
            return Err(Error::Config(format!(
                "threshold config version {} is not supported (expected {})",
                self.version, THRESHOLD_CONFIG_VERSION
            )));
        }

        let unit_fields = [
            ("clip_variance_hi", self.clip_variance_hi),
            ("clip_entropy_lo", self.clip_entropy_lo),
            ("clip_cluster_hi", self.clip_cluster_hi),
            ("clip_distribution_contribution", self.clip_distribution_contribution),
            ("clip_kurtosis_contribution", self.clip_kurtosis_contribution),
            ("clip_cluster_contribution", self.clip_cluster_contribution),
            ("anomaly_hi", self.anomaly_hi),
            ("anomaly_contribution", self.anomaly_contribution),
            ("physiology_strong", self.physiology_strong),
            ("physiology_contribution", self.physiology_contribution),
            ("freq_mid", self.freq_mid),
            ("freq_hi", self.freq_hi),
            ("hf_suppression_max", self.hf_suppression_max),
            ("periodicity_min", self.periodicity_min),
            ("frequency_scale", self.frequency_scale),
            ("temporal_mid", self.temporal_mid),
            ("temporal_hi", self.temporal_hi),
            ("identity_jump_delta", self.identity_jump_delta),
            ("temporal_scale", self.temporal_scale),
            ("subject_floor", self.subject_floor),
            ("subject_scale", self.subject_scale),
            ("lighting_contribution", self.lighting_contribution),
            ("motion_smoothness_hi", self.motion_smoothness_hi),
            ("motion_stutter_hi", self.motion_stutter_hi),
            ("motion_contribution", self.motion_contribution),
            ("hashtag_contribution", self.hashtag_contribution),
            ("hint_word_contribution", self.hint_word_contribution),
            ("gate_freq_or_temporal", self.gate_freq_or_temporal),
            ("gate_texture_or_phys", self.gate_texture_or_phys),
            ("impossible_contribution", self.impossible_contribution),
            ("impossible_subject_bonus", self.impossible_subject_bonus),
            ("cgi_likely_lo", self.cgi_likely_lo),
            ("cgi_likely_hi", self.cgi_likely_hi),
            ("cgi_strong_downweight", self.cgi_strong_downweight),
            ("cgi_mild_downweight", self.cgi_mild_downweight),
            ("high_confidence_threshold", self.high_confidence_threshold),
            ("cap_anchor", self.cap_anchor),
            ("cap_slope", self.cap_slope),
            ("probability_floor", self.probability_floor),
            ("probability_ceiling", self.probability_ceiling),
            ("confidence_note_threshold", self.confidence_note_threshold),
        ];
        for (name, value) in unit_fields {
            check_unit(name, value)?;
        }

        if !self.clip_kurtosis_abs.is_finite() || self.clip_kurtosis_abs <= 0.0 {
            return Err(Error::Config(format!(
                "clip_kurtosis_abs must be > 0, got {}",
                self.clip_kurtosis_abs
            )));
        }
        if !(self.shadow_spread_max_deg > 0.0 && self.shadow_spread_max_deg <= 180.0) {
            return Err(Error::Config(format!(
                "shadow_spread_max_deg must be in (0, 180], got {}",
                self.shadow_spread_max_deg
            )));
        }
        if !(self.boost_exponent > 0.0 && self.boost_exponent <= 1.0) {
            return Err(Error::Config(format!(
                "boost_exponent must be in (0, 1], got {}",
                self.boost_exponent
            )));
        }
        if self.min_signals_for_strong_claim < 1 {
            return Err(Error::Config(
                "min_signals_for_strong_claim must be >= 1".to_string(),
            ));
        }

        check_ordered("freq_mid", self.freq_mid, "freq_hi", self.freq_hi)?;
        check_ordered("temporal_mid", self.temporal_mid, "temporal_hi", self.temporal_hi)?;
        check_ordered("cgi_likely_lo", self.cgi_likely_lo, "cgi_likely_hi", self.cgi_likely_hi)?;
        check_ordered(
            "cgi_strong_downweight",
            self.cgi_strong_downweight,
            "cgi_mild_downweight",
            self.cgi_mild_downweight,
        )?;
        check_ordered("cap_anchor", self.cap_anchor, "high_confidence_threshold", self.high_confidence_threshold)?;
        if self.probability_floor >= self.probability_ceiling {
            return Err(Error::Config(format!(
                "probability_floor ({}) must be below probability_ceiling ({})",
                self.probability_floor, self.probability_ceiling
            )));
        }

        for kind in BucketKind::ALL {
            let weight = self.weights.for_kind(kind);
            if !weight.is_finite() || weight <= 0.0 {
                return Err(Error::Config(format!(
                    "weights.{} must be > 0, got {}",
                    kind, weight
                )));
            }
        }

        Ok(())
    }

    /// Parse and validate from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Threshold TOML parse error: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Read thresholds {} failed: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Copy with one weight replaced (settings change produces a new value)
    pub fn with_weight(&self, kind: BucketKind, weight: f64) -> Self {
        let mut next = self.clone();
        match kind {
            BucketKind::Frequency => next.weights.frequency = weight,
            BucketKind::Physiology => next.weights.physiology = weight,
            BucketKind::Temporal => next.weights.temporal = weight,
            BucketKind::Semantic => next.weights.semantic = weight,
            BucketKind::SubjectSpecific => next.weights.subject_specific = weight,
            BucketKind::Impossible => next.weights.impossible = weight,
            BucketKind::Text => next.weights.text = weight,
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(ThresholdConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ThresholdConfig::from_toml_str(
            "freq_hi = 0.75\n\n[weights]\ntemporal = 0.28\n",
        )
        .unwrap();
        assert_eq!(config.freq_hi, 0.75);
        assert_eq!(config.weights.temporal, 0.28);
        assert_eq!(config.freq_mid, 0.55);
        assert_eq!(config.weights.frequency, 0.25);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = ThresholdConfig::from_toml_str("freq_high = 0.9\n");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_wrong_version_rejected() {
        let result = ThresholdConfig::from_toml_str("version = 7\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_out_of_range_rejected() {
        let config = ThresholdConfig {
            anomaly_hi: 1.4,
            ..ThresholdConfig::default()
        };
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("anomaly_hi"), "unexpected error: {}", err);
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let config = ThresholdConfig {
            cgi_likely_lo: 0.8,
            cgi_likely_hi: 0.5,
            ..ThresholdConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_weight_rejected() {
        let config = ThresholdConfig::default().with_weight(BucketKind::Text, 0.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_with_weight_leaves_original_untouched() {
        let base = ThresholdConfig::default();
        let tuned = base.with_weight(BucketKind::Impossible, 0.2);
        assert_eq!(base.weights.impossible, 0.10);
        assert_eq!(tuned.weights.impossible, 0.2);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ThresholdConfig::default();
        let text = toml::to_string(&config).unwrap();
        assert_eq!(ThresholdConfig::from_toml_str(&text).unwrap(), config);
    }
}
