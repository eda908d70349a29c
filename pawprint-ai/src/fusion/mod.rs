//! Evidence Fusion Engine
//!
//! Pipeline for one analysis:
//! 1. Bucket scorers (one per evidence family) produce contributions
//! 2. Style/context gate estimates CGI likelihood
//! 3. Impossible-scenario gate counts caption claims only with corroboration
//! 4. Present buckets are boosted and fused by weighted mean
//! 5. Style down-weight, confidence cap, clamp to the probability range
//!
//! Notes are emitted in that order: scorer notes, style notes, gate notes,
//! bucket confidence notes, down-weight, cap.
//!
//! The engine never returns an error. Malformed evidence drops the affected
//! scorer with a note; internal faults (scorer `Internal` errors, panics,
//! non-finite results) produce a report with `AnalysisStatus::Failed`.

pub mod calibration;
pub mod categories;

pub use calibration::{
    apply_confidence_cap, apply_style_downweight, fuse_buckets, independent_strong_signals,
};
pub use categories::map_categories;

use crate::error::ScorerError;
use crate::gates::{estimate_style, evaluate_impossible};
use crate::models::{AnalysisStatus, BucketKind, BucketScore, EvidenceReport, EvidenceVector};
use crate::params::ThresholdConfig;
use crate::scorers::embedding::embedding_stats;
use crate::scorers::{default_scorers, BucketScorer};
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Malformed-evidence fault and the scorers it dropped
struct MalformedNote {
    error: ScorerError,
    scorers: Vec<&'static str>,
    note_index: usize,
}

impl MalformedNote {
    fn note(&self) -> String {
        format!("{} evidence ignored ({}).", self.scorers.join(", "), self.error)
    }
}

/// Stateless scoring engine; share it behind an `Arc`
pub struct FusionEngine {
    config: ThresholdConfig,
    scorers: Vec<Box<dyn BucketScorer>>,
}

impl std::fmt::Debug for FusionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FusionEngine")
            .field("config_version", &self.config.version)
            .field(
                "scorers",
                &self.scorers.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl FusionEngine {
    /// Engine with the default scorer set
    ///
    /// # Errors
    /// Configuration error if `config` fails validation.
    pub fn new(config: ThresholdConfig) -> pawprint_common::Result<Self> {
        Self::with_scorers(config, default_scorers())
    }

    /// Engine with a custom scorer set (scorer order is note order)
    pub fn with_scorers(
        config: ThresholdConfig,
        scorers: Vec<Box<dyn BucketScorer>>,
    ) -> pawprint_common::Result<Self> {
        config.validate()?;
        Ok(Self { config, scorers })
    }

    pub fn config(&self) -> &ThresholdConfig {
        &self.config
    }

    /// Score one evidence vector
    pub fn analyze(&self, evidence: &EvidenceVector) -> EvidenceReport {
        let start = Instant::now();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.run(evidence)));
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match outcome {
            Ok(Ok(mut report)) => {
                report.processing_time_ms = elapsed_ms;
                info!(
                    "Fusion complete: ai_probability={:.3}, notes={}, elapsed={}ms",
                    report.ai_probability,
                    report.notes.len(),
                    elapsed_ms
                );
                report
            }
            Ok(Err(fault)) => {
                error!("Analysis failed: {}", fault);
                EvidenceReport::failed(
                    format!("Analysis failed: {}", fault),
                    self.config.probability_floor,
                    elapsed_ms,
                )
            }
            Err(payload) => {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                error!("Analysis failed: panic during scoring: {}", message);
                EvidenceReport::failed(
                    format!("Analysis failed: panic during scoring: {}", message),
                    self.config.probability_floor,
                    elapsed_ms,
                )
            }
        }
    }

    fn run(&self, evidence: &EvidenceVector) -> Result<EvidenceReport, ScorerError> {
        let config = &self.config;
        let mut buckets: BTreeMap<BucketKind, BucketScore> = BTreeMap::new();
        let mut notes: Vec<String> = Vec::new();
        let mut malformed: Vec<MalformedNote> = Vec::new();

        // ====================================================================
        // Bucket scorers
        // ====================================================================
        for scorer in &self.scorers {
            match scorer.score(evidence, config) {
                Ok(None) => debug!("{}: absent", scorer.name()),
                Ok(Some(output)) => {
                    if !output.contribution.is_finite() {
                        return Err(ScorerError::Internal(format!(
                            "{} produced a non-finite contribution",
                            scorer.name()
                        )));
                    }
                    debug!(
                        "{} -> {}: +{:.3} strong={} ({})",
                        scorer.name(),
                        output.bucket,
                        output.contribution,
                        output.strong,
                        output.description
                    );
                    buckets
                        .entry(output.bucket)
                        .or_insert_with(|| {
                            BucketScore::new(
                                output.bucket,
                                0.0,
                                config.weights.for_kind(output.bucket),
                                false,
                            )
                        })
                        .absorb(output.contribution, output.strong, &output.description);
                    notes.extend(output.notes);
                }
                Err(err @ ScorerError::Malformed { .. }) => {
                    warn!("{}: ignoring malformed evidence: {}", scorer.name(), err);
                    // one note per distinct fault, naming every scorer it dropped
                    match malformed.iter_mut().find(|entry| entry.error == err) {
                        Some(entry) => {
                            entry.scorers.push(scorer.name());
                            notes[entry.note_index] = entry.note();
                        }
                        None => {
                            let entry = MalformedNote {
                                error: err,
                                scorers: vec![scorer.name()],
                                note_index: notes.len(),
                            };
                            notes.push(entry.note());
                            malformed.push(entry);
                        }
                    }
                }
                Err(ScorerError::Internal(reason)) => {
                    return Err(ScorerError::Internal(format!("{}: {}", scorer.name(), reason)));
                }
            }
        }

        // ====================================================================
        // Gates
        // ====================================================================
        // A malformed embedding was already reported by its scorers
        let stats = embedding_stats(evidence).ok().flatten();
        let caption = evidence.caption_text.as_deref();

        let style = estimate_style(stats.as_ref(), caption);
        debug!(
            "Style gate: cgi={:.2}, live_action={:.2}",
            style.cgi_likelihood, style.live_action_likelihood
        );
        notes.extend(style.notes.iter().cloned());

        if let Some(gate) = evaluate_impossible(caption, &buckets, config) {
            debug!("Impossible gate: claims={:?}, counted={}", gate.claims, gate.counted);
            buckets
                .entry(BucketKind::Impossible)
                .or_insert_with(|| {
                    BucketScore::new(
                        BucketKind::Impossible,
                        0.0,
                        config.weights.impossible,
                        false,
                    )
                })
                .absorb(gate.impossible_contribution, false, "caption claim");
            if gate.counted {
                buckets
                    .entry(BucketKind::SubjectSpecific)
                    .or_insert_with(|| {
                        BucketScore::new(
                            BucketKind::SubjectSpecific,
                            0.0,
                            config.weights.subject_specific,
                            false,
                        )
                    })
                    .absorb(gate.subject_bonus, false, "impossible-scenario bonus");
            }
            notes.extend(gate.notes);
        }

        if buckets.is_empty() {
            info!("No evidence available; reporting probability floor");
            notes.push("No evidence available: every bucket is absent.".to_string());
            return Ok(EvidenceReport {
                status: AnalysisStatus::Completed,
                ai_probability: config.probability_floor,
                category_scores: map_categories(&buckets),
                notes,
                processing_time_ms: 0,
            });
        }

        // ====================================================================
        // Fusion and calibration
        // ====================================================================
        let fused = fuse_buckets(&buckets, config);
        notes.extend(calibration::confidence_notes(&buckets, config));

        let strong_signals = independent_strong_signals(&buckets);
        debug!(
            "Fused {:.3} from {} buckets, {} independent strong signal(s)",
            fused,
            buckets.len(),
            strong_signals
        );

        let adjusted = apply_style_downweight(fused, &style, strong_signals, config, &mut notes);
        let capped = apply_confidence_cap(adjusted, strong_signals, config, &mut notes);
        if !capped.is_finite() {
            return Err(ScorerError::Internal(format!(
                "fusion produced a non-finite probability ({})",
                capped
            )));
        }
        let probability = capped.clamp(config.probability_floor, config.probability_ceiling);

        Ok(EvidenceReport {
            status: AnalysisStatus::Completed,
            ai_probability: probability,
            category_scores: map_categories(&buckets),
            notes,
            processing_time_ms: 0,
        })
    }
}
