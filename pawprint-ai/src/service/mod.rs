//! Analysis Service
//!
//! Orchestrates one analysis request:
//! 1. Report cache lookup (single computation per content per TTL window)
//! 2. Concurrent provider fan-out with per-provider timeouts
//! 3. Fusion over the merged evidence
//!
//! Provider notes precede the engine's notes in the returned report.
//! Cancellation is by dropping the returned future.

pub mod cache;
pub mod provider;

pub use cache::{CacheStatus, ReportCache};
pub use provider::{
    CollectedEvidence, ContentRequest, EvidenceProvider, ProviderFanout, StaticEvidenceProvider,
};

use crate::fusion::FusionEngine;
use crate::models::{AnalysisRecord, EvidenceReport};
use pawprint_common::config::TomlConfig;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Service timing parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceConfig {
    pub provider_timeout: Duration,
    pub cache_ttl: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            provider_timeout: Duration::from_millis(8000),
            cache_ttl: Duration::from_secs(300),
        }
    }
}

impl From<&TomlConfig> for ServiceConfig {
    fn from(config: &TomlConfig) -> Self {
        Self {
            provider_timeout: Duration::from_millis(config.provider_timeout_ms),
            cache_ttl: Duration::from_secs(config.cache_ttl_secs),
        }
    }
}

pub struct AnalysisService {
    engine: Arc<FusionEngine>,
    fanout: ProviderFanout,
    cache: ReportCache,
}

impl AnalysisService {
    pub fn new(
        engine: Arc<FusionEngine>,
        providers: Vec<Arc<dyn EvidenceProvider>>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            engine,
            fanout: ProviderFanout::new(providers, config.provider_timeout),
            cache: ReportCache::new(config.cache_ttl),
        }
    }

    pub fn engine(&self) -> &FusionEngine {
        &self.engine
    }

    pub fn cache(&self) -> &ReportCache {
        &self.cache
    }

    /// Analyze one piece of content, serving a fresh cached report when available
    pub async fn analyze(&self, request: &ContentRequest) -> EvidenceReport {
        let (report, status) = self
            .cache
            .get_or_compute(&request.content_id, || self.compute(request))
            .await;
        info!(
            content_id = %request.content_id,
            cache = ?status,
            ai_probability = report.ai_probability,
            status = %report.status,
            "Analysis served"
        );
        report
    }

    /// Analyze and wrap the result as a persistable record
    pub async fn analyze_record(&self, request: &ContentRequest) -> AnalysisRecord {
        let report = self.analyze(request).await;
        AnalysisRecord::from_report(request.content_id.clone(), &report)
    }

    async fn compute(&self, request: &ContentRequest) -> EvidenceReport {
        let CollectedEvidence { evidence, notes } = self.fanout.collect(request).await;
        let mut report = self.engine.analyze(&evidence);
        let mut merged = notes;
        merged.append(&mut report.notes);
        report.notes = merged;
        report
    }
}

#[cfg(test)]
mod tests {
    use super::provider::mock::MockProvider;
    use super::*;
    use crate::models::EvidenceVector;
    use crate::params::ThresholdConfig;

    fn service(providers: Vec<Arc<dyn EvidenceProvider>>) -> AnalysisService {
        let engine = Arc::new(FusionEngine::new(ThresholdConfig::default()).unwrap());
        AnalysisService::new(engine, providers, ServiceConfig::default())
    }

    #[test]
    fn test_service_config_from_toml_config() {
        let toml = TomlConfig {
            provider_timeout_ms: 1500,
            cache_ttl_secs: 60,
            ..Default::default()
        };
        let config = ServiceConfig::from(&toml);
        assert_eq!(config.provider_timeout, Duration::from_millis(1500));
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
    }

    #[tokio::test]
    async fn test_provider_notes_come_first() {
        let service = service(vec![
            Arc::new(MockProvider::failing("caption-model")),
            Arc::new(MockProvider::new(
                "tags",
                EvidenceVector {
                    hashtags: Some(vec!["#sora".to_string()]),
                    ..Default::default()
                },
            )),
        ]);
        let report = service.analyze(&ContentRequest::new("post-9")).await;
        assert!(report.notes[0].starts_with("Provider caption-model unavailable"));
        assert!(report.notes.iter().any(|n| n.starts_with("Hashtags")));
    }

    #[tokio::test]
    async fn test_analyze_record_carries_content_id() {
        let service = service(vec![]);
        let record = service.analyze_record(&ContentRequest::new("post-10")).await;
        assert_eq!(record.content_id, "post-10");
        assert_eq!(record.ai_probability, 0.01);
        assert_eq!(record.composite_score, 0.0);
    }
}
