//! Engine output and its downstream views

use serde::{Deserialize, Serialize};

/// Version of the probability → label mapping
///
/// Consumers (API responses, overlay, badge colours) depend on the label
/// thresholds; changing them requires bumping this version.
pub const LABEL_SCHEME_VERSION: u32 = 1;

/// Label thresholds (exclusive lower bounds)
const LIKELY_AI_ABOVE: f64 = 0.70;
const SUSPICIOUS_ABOVE: f64 = 0.40;

/// Whether the analysis produced a real result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    Completed,
    /// Internal computation fault; probability and categories carry no signal
    Failed,
}

impl std::fmt::Display for AnalysisStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisStatus::Completed => write!(f, "Completed"),
            AnalysisStatus::Failed => write!(f, "Failed"),
        }
    }
}

/// Per-category scores, each in [0, 1]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub impossible: f64,
    pub anatomical: f64,
    pub motion: f64,
    pub temporal: f64,
    pub texture: f64,
    pub hashtag: f64,
}

/// Three-level label shown to users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProbabilityLabel {
    #[serde(rename = "Likely AI")]
    LikelyAi,
    #[serde(rename = "Suspicious")]
    Suspicious,
    #[serde(rename = "Likely Real")]
    LikelyReal,
}

impl ProbabilityLabel {
    /// Map a probability in [0, 1] to its label
    pub fn from_probability(probability: f64) -> Self {
        if probability > LIKELY_AI_ABOVE {
            ProbabilityLabel::LikelyAi
        } else if probability > SUSPICIOUS_ABOVE {
            ProbabilityLabel::Suspicious
        } else {
            ProbabilityLabel::LikelyReal
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProbabilityLabel::LikelyAi => "Likely AI",
            ProbabilityLabel::Suspicious => "Suspicious",
            ProbabilityLabel::LikelyReal => "Likely Real",
        }
    }
}

impl std::fmt::Display for ProbabilityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The engine's sole output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceReport {
    pub status: AnalysisStatus,
    /// Calibrated synthetic-content probability, always in [0.01, 0.99]
    pub ai_probability: f64,
    pub category_scores: CategoryScores,
    /// Ordered trace of contributing findings and adjustments
    pub notes: Vec<String>,
    pub processing_time_ms: u64,
}

impl EvidenceReport {
    /// Report for an analysis that hit an internal fault
    ///
    /// Probability sits at the floor and every category is 0; the status, not
    /// the number, tells consumers that nothing was measured.
    pub fn failed(reason: impl Into<String>, probability_floor: f64, processing_time_ms: u64) -> Self {
        Self {
            status: AnalysisStatus::Failed,
            ai_probability: probability_floor,
            category_scores: CategoryScores::default(),
            notes: vec![reason.into()],
            processing_time_ms,
        }
    }

    pub fn is_failed(&self) -> bool {
        self.status == AnalysisStatus::Failed
    }

    /// Probability as a percentage rounded to one decimal place
    pub fn probability_percent(&self) -> f64 {
        (self.ai_probability * 1000.0).round() / 10.0
    }

    /// Label for a completed report; failed reports carry none
    pub fn label(&self) -> Option<ProbabilityLabel> {
        match self.status {
            AnalysisStatus::Completed => Some(ProbabilityLabel::from_probability(self.ai_probability)),
            AnalysisStatus::Failed => None,
        }
    }

    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            ai_probability: self.probability_percent(),
            label: self.label(),
            label_scheme_version: LABEL_SCHEME_VERSION,
            status: self.status,
        }
    }
}

/// Downstream view of a report (API responses, overlay badge)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Percentage, one decimal place
    pub ai_probability: f64,
    pub label: Option<ProbabilityLabel>,
    pub label_scheme_version: u32,
    pub status: AnalysisStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(probability: f64) -> EvidenceReport {
        EvidenceReport {
            status: AnalysisStatus::Completed,
            ai_probability: probability,
            category_scores: CategoryScores::default(),
            notes: vec![],
            processing_time_ms: 0,
        }
    }

    #[test]
    fn test_label_boundaries_are_exclusive() {
        assert_eq!(ProbabilityLabel::from_probability(0.70), ProbabilityLabel::Suspicious);
        assert_eq!(ProbabilityLabel::from_probability(0.7001), ProbabilityLabel::LikelyAi);
        assert_eq!(ProbabilityLabel::from_probability(0.40), ProbabilityLabel::LikelyReal);
        assert_eq!(ProbabilityLabel::from_probability(0.41), ProbabilityLabel::Suspicious);
        assert_eq!(ProbabilityLabel::from_probability(0.01), ProbabilityLabel::LikelyReal);
    }

    #[test]
    fn test_percent_one_decimal() {
        assert_eq!(report(0.8347).probability_percent(), 83.5);
        assert_eq!(report(0.01).probability_percent(), 1.0);
    }

    #[test]
    fn test_failed_report_has_no_label() {
        let failed = EvidenceReport::failed("Analysis failed: boom", 0.01, 3);
        assert!(failed.is_failed());
        assert!(failed.label().is_none());
        assert_eq!(failed.category_scores, CategoryScores::default());
        assert_eq!(failed.notes, vec!["Analysis failed: boom"]);
        assert_eq!(failed.summary().status, AnalysisStatus::Failed);
    }

    #[test]
    fn test_label_serializes_as_display_text() {
        let json = serde_json::to_string(&report(0.9).summary()).unwrap();
        assert!(json.contains("\"Likely AI\""), "got {}", json);
        assert!(json.contains("\"label_scheme_version\":1"), "got {}", json);
    }
}
