//! Evidence buckets

use serde::{Deserialize, Serialize};

/// One named family of evidence, with its own weight and "strong" threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketKind {
    Frequency,
    Physiology,
    Temporal,
    Semantic,
    SubjectSpecific,
    Impossible,
    Text,
}

impl BucketKind {
    /// Fusion order; notes about buckets follow this order
    pub const ALL: [BucketKind; 7] = [
        BucketKind::Frequency,
        BucketKind::Physiology,
        BucketKind::Temporal,
        BucketKind::Semantic,
        BucketKind::SubjectSpecific,
        BucketKind::Impossible,
        BucketKind::Text,
    ];

    /// Whether a strong score in this bucket counts toward the
    /// independent-strong-signal tally
    pub fn counts_as_independent(self) -> bool {
        matches!(
            self,
            BucketKind::Frequency | BucketKind::Temporal | BucketKind::Physiology
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BucketKind::Frequency => "frequency",
            BucketKind::Physiology => "physiology",
            BucketKind::Temporal => "temporal",
            BucketKind::Semantic => "semantic",
            BucketKind::SubjectSpecific => "subject-specific",
            BucketKind::Impossible => "impossible",
            BucketKind::Text => "text",
        }
    }
}

impl std::fmt::Display for BucketKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Score of one present bucket for a single fusion call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketScore {
    pub kind: BucketKind,
    /// Always clamped to [0, 1]
    pub raw_score: f64,
    /// Configured weight (> 0)
    pub weight: f64,
    /// Whether a contributor crossed its bucket-specific strong threshold
    pub strong: bool,
    /// Contributor descriptions, in scorer order
    pub description: String,
}

impl BucketScore {
    /// Create a bucket score with the raw score clamped to [0, 1]
    pub fn new(kind: BucketKind, raw_score: f64, weight: f64, strong: bool) -> Self {
        Self {
            kind,
            raw_score: clamp_unit(raw_score),
            weight,
            strong,
            description: String::new(),
        }
    }

    /// Add another contribution to this bucket (sum, then clamp)
    pub fn absorb(&mut self, amount: f64, strong: bool, description: &str) {
        self.raw_score = clamp_unit(self.raw_score + amount);
        self.strong |= strong;
        if !description.is_empty() {
            if !self.description.is_empty() {
                self.description.push_str("; ");
            }
            self.description.push_str(description);
        }
    }
}

/// Clamp to [0, 1]; NaN maps to 0
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
