//! Evidence providers and concurrent fan-out
//!
//! Each provider (caption model, embedding model, deepfake model, frame
//! extractor, ...) returns a partial [`EvidenceVector`]. All providers run
//! concurrently, each under its own timeout. A failed or slow provider only
//! makes its fields absent; it never aborts the analysis.

use crate::error::ProviderError;
use crate::models::EvidenceVector;
use async_trait::async_trait;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// What the caller knows about the content before any provider runs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentRequest {
    /// Stable content identifier (post URL or media hash); the cache key
    pub content_id: String,
    pub media_url: Option<String>,
    /// Post caption as published
    pub caption_text: Option<String>,
    pub hashtags: Option<Vec<String>>,
}

impl ContentRequest {
    pub fn new(content_id: impl Into<String>) -> Self {
        Self {
            content_id: content_id.into(),
            ..Default::default()
        }
    }

    /// Evidence the request itself carries
    pub fn base_evidence(&self) -> EvidenceVector {
        EvidenceVector {
            caption_text: self.caption_text.clone(),
            hashtags: self.hashtags.clone(),
            ..Default::default()
        }
    }
}

/// External source of partial evidence
#[async_trait]
pub trait EvidenceProvider: Send + Sync {
    /// Provider identifier for notes and logs
    fn name(&self) -> &'static str;

    /// Fetch this provider's share of the evidence
    ///
    /// # Errors
    /// Any error makes this provider's fields absent for the analysis.
    async fn fetch(&self, request: &ContentRequest) -> Result<EvidenceVector, ProviderError>;
}

/// Provider returning a fixed evidence vector (CLI input, replays)
pub struct StaticEvidenceProvider {
    name: &'static str,
    evidence: EvidenceVector,
}

impl StaticEvidenceProvider {
    pub fn new(name: &'static str, evidence: EvidenceVector) -> Self {
        Self { name, evidence }
    }
}

#[async_trait]
impl EvidenceProvider for StaticEvidenceProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch(&self, _request: &ContentRequest) -> Result<EvidenceVector, ProviderError> {
        Ok(self.evidence.clone())
    }
}

/// Merged evidence plus one note per provider that contributed nothing
#[derive(Debug, Clone, Default)]
pub struct CollectedEvidence {
    pub evidence: EvidenceVector,
    pub notes: Vec<String>,
}

/// Runs every provider concurrently under a per-call timeout
pub struct ProviderFanout {
    providers: Vec<Arc<dyn EvidenceProvider>>,
    timeout: Duration,
}

impl ProviderFanout {
    pub fn new(providers: Vec<Arc<dyn EvidenceProvider>>, timeout: Duration) -> Self {
        Self { providers, timeout }
    }

    pub fn count(&self) -> usize {
        self.providers.len()
    }

    /// Collect evidence from all providers
    ///
    /// Request fields come first; then providers merge in registration order,
    /// so the first supplier of a field wins regardless of completion order.
    pub async fn collect(&self, request: &ContentRequest) -> CollectedEvidence {
        let timeout_ms = self.timeout.as_millis() as u64;
        let futures = self.providers.iter().map(|provider| {
            let provider = Arc::clone(provider);
            async move {
                let name = provider.name();
                let result = match tokio::time::timeout(self.timeout, provider.fetch(request)).await {
                    Ok(result) => result,
                    Err(_) => Err(ProviderError::Timeout {
                        provider: name,
                        timeout_ms,
                    }),
                };
                (name, result)
            }
        });

        let mut collected = CollectedEvidence {
            evidence: request.base_evidence(),
            notes: Vec::new(),
        };
        for (name, result) in join_all(futures).await {
            match result {
                Ok(partial) => {
                    debug!(
                        provider = name,
                        content_id = %request.content_id,
                        "Provider returned evidence"
                    );
                    collected.evidence.merge_missing(partial);
                }
                Err(e) => {
                    warn!(
                        provider = name,
                        content_id = %request.content_id,
                        error = %e,
                        "Provider failed, evidence treated as absent"
                    );
                    collected
                        .notes
                        .push(format!("Provider {} unavailable: {}.", name, e));
                }
            }
        }
        collected
    }
}

// ============================================================================
// Mock providers for testing
// ============================================================================
