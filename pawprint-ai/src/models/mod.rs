//! Data models for pawprint-ai
//!
//! - Evidence input ([`EvidenceVector`], [`FrameMeasurement`])
//! - Bucket scores produced per call ([`BucketScore`])
//! - Engine output ([`EvidenceReport`]) and its downstream views

pub mod bucket;
pub mod evidence;
pub mod record;
pub mod report;

pub use bucket::{clamp_unit, BucketKind, BucketScore};
pub use evidence::{EvidenceVector, FrameMeasurement};
pub use record::AnalysisRecord;
pub use report::{
    AnalysisStatus, CategoryScores, EvidenceReport, ProbabilityLabel, ReportSummary,
    LABEL_SCHEME_VERSION,
};
