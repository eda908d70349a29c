//! Embedding-derived scorers
//!
//! Distribution shape of the global media embedding feeds the frequency
//! bucket; feature clustering feeds the semantic bucket.

use super::{BucketScorer, ScorerOutput};
use crate::error::ScorerError;
use crate::models::{BucketKind, EvidenceVector};
use crate::params::ThresholdConfig;
use crate::stats::FeatureStats;

/// Statistics of a valid embedding; `None` when no embedding was supplied
///
/// # Errors
/// `ScorerError::Malformed` for an empty embedding or non-finite values.
pub fn embedding_stats(evidence: &EvidenceVector) -> Result<Option<FeatureStats>, ScorerError> {
    let Some(embedding) = evidence.embedding.as_deref() else {
        return Ok(None);
    };
    if embedding.is_empty() {
        return Err(ScorerError::malformed("embedding", "embedding is empty"));
    }
    if let Some(bad) = embedding.iter().position(|v| !v.is_finite()) {
        return Err(ScorerError::malformed(
            "embedding",
            format!("non-finite value at index {}", bad),
        ));
    }
    Ok(Some(FeatureStats::compute(embedding)))
}

/// High variance with low entropy, or heavy tails, in the embedding
pub struct EmbeddingDistributionScorer;

impl BucketScorer for EmbeddingDistributionScorer {
    fn name(&self) -> &'static str {
        "embedding-distribution"
    }

    fn bucket(&self) -> BucketKind {
        BucketKind::Frequency
    }

    fn score(
        &self,
        evidence: &EvidenceVector,
        config: &ThresholdConfig,
    ) -> Result<Option<ScorerOutput>, ScorerError> {
        let Some(stats) = embedding_stats(evidence)? else {
            return Ok(None);
        };

        let mut contribution = 0.0;
        let mut notes = Vec::new();

        if stats.variance > config.clip_variance_hi && stats.entropy < config.clip_entropy_lo {
            contribution += config.clip_distribution_contribution;
            notes.push("Embedding: high variance + low entropy (AI-distribution pattern).".to_string());
        }
        if stats.kurtosis.abs() > config.clip_kurtosis_abs {
            contribution += config.clip_kurtosis_contribution;
            notes.push("Embedding: non-Gaussian feature distribution (synthetic indicator).".to_string());
        }

        let description = format!(
            "embedding variance {:.3}, entropy {:.3}, kurtosis {:.2}",
            stats.variance, stats.entropy, stats.kurtosis
        );
        let mut output = ScorerOutput::new(self.bucket(), contribution, description);
        output.notes = notes;
        Ok(Some(output))
    }
}

/// Model-specific clustering of embedding features
pub struct EmbeddingClusterScorer;

impl BucketScorer for EmbeddingClusterScorer {
    fn name(&self) -> &'static str {
        "embedding-cluster"
    }

    fn bucket(&self) -> BucketKind {
        BucketKind::Semantic
    }

    fn score(
        &self,
        evidence: &EvidenceVector,
        config: &ThresholdConfig,
    ) -> Result<Option<ScorerOutput>, ScorerError> {
        let Some(stats) = embedding_stats(evidence)? else {
            return Ok(None);
        };

        let description = format!("embedding cluster gap score {:.3}", stats.cluster);
        if stats.cluster > config.clip_cluster_hi {
            Ok(Some(
                ScorerOutput::new(self.bucket(), config.clip_cluster_contribution, description)
                    .with_note("Embedding: model-specific feature clustering detected."),
            ))
        } else {
            Ok(Some(ScorerOutput::new(self.bucket(), 0.0, description)))
        }
    }
}
