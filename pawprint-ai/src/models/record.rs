//! Persisted analysis record

use crate::composite::composite_score;
use crate::models::{AnalysisStatus, EvidenceReport};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One stored analysis of one piece of content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: Uuid,
    /// Content identifier the analysis belongs to (e.g. post URL)
    pub content_id: String,
    pub status: AnalysisStatus,
    pub ai_probability: f64,
    pub impossible_score: f64,
    pub anatomical_score: f64,
    pub motion_score: f64,
    pub temporal_score: f64,
    pub texture_score: f64,
    pub hashtag_score: f64,
    pub composite_score: f64,
    pub notes: Vec<String>,
    pub processing_time_ms: u64,
    pub analyzed_at: DateTime<Utc>,
}

impl AnalysisRecord {
    pub fn from_report(content_id: impl Into<String>, report: &EvidenceReport) -> Self {
        let categories = report.category_scores;
        Self {
            id: Uuid::new_v4(),
            content_id: content_id.into(),
            status: report.status,
            ai_probability: report.ai_probability,
            impossible_score: categories.impossible,
            anatomical_score: categories.anatomical,
            motion_score: categories.motion,
            temporal_score: categories.temporal,
            texture_score: categories.texture,
            hashtag_score: categories.hashtag,
            composite_score: composite_score(&categories),
            notes: report.notes.clone(),
            processing_time_ms: report.processing_time_ms,
            analyzed_at: Utc::now(),
        }
    }
}
