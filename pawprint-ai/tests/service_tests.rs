//! Analysis service: provider fan-out, timeouts and the report cache

use async_trait::async_trait;
use futures::future::join_all;
use pawprint_ai::error::ProviderError;
use pawprint_ai::models::{AnalysisStatus, EvidenceVector};
use pawprint_ai::service::{
    AnalysisService, ContentRequest, EvidenceProvider, ReportCache, ServiceConfig,
};
use pawprint_ai::{FusionEngine, ThresholdConfig};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Deepfake-model stand-in that counts calls and can be slowed down
struct CountingProvider {
    calls: AtomicUsize,
    delay: Duration,
}

impl CountingProvider {
    fn new(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            delay,
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EvidenceProvider for CountingProvider {
    fn name(&self) -> &'static str {
        "deepfake-model"
    }

    async fn fetch(&self, _request: &ContentRequest) -> Result<EvidenceVector, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        Ok(EvidenceVector {
            deepfake_probability: Some(0.8),
            ..Default::default()
        })
    }
}

fn service(provider: Arc<CountingProvider>, config: ServiceConfig) -> AnalysisService {
    let engine = Arc::new(FusionEngine::new(ThresholdConfig::default()).unwrap());
    let providers: Vec<Arc<dyn EvidenceProvider>> = vec![provider];
    AnalysisService::new(engine, providers, config)
}

fn config(timeout: Duration, ttl: Duration) -> ServiceConfig {
    ServiceConfig {
        provider_timeout: timeout,
        cache_ttl: ttl,
    }
}

#[tokio::test(start_paused = true)]
async fn test_second_request_within_ttl_is_cached() {
    let provider = CountingProvider::new(Duration::from_millis(10));
    let service = service(
        Arc::clone(&provider),
        config(Duration::from_secs(5), Duration::from_secs(300)),
    );
    let request = ContentRequest::new("https://example.com/reel/1");

    let first = service.analyze(&request).await;
    tokio::time::advance(Duration::from_secs(120)).await;
    let second = service.analyze(&request).await;

    assert_eq!(provider.calls(), 1);
    assert_eq!(first, second);
    assert_eq!(first.status, AnalysisStatus::Completed);
}

#[tokio::test(start_paused = true)]
async fn test_request_after_ttl_recomputes() {
    let provider = CountingProvider::new(Duration::from_millis(10));
    let service = service(
        Arc::clone(&provider),
        config(Duration::from_secs(5), Duration::from_secs(300)),
    );
    let request = ContentRequest::new("https://example.com/reel/2");

    service.analyze(&request).await;
    tokio::time::advance(Duration::from_secs(301)).await;
    service.analyze(&request).await;

    assert_eq!(provider.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_requests_compute_once() {
    let provider = CountingProvider::new(Duration::from_millis(200));
    let service = service(
        Arc::clone(&provider),
        config(Duration::from_secs(5), Duration::from_secs(300)),
    );
    let request = ContentRequest::new("https://example.com/reel/3");

    let reports = join_all((0..8).map(|_| service.analyze(&request))).await;

    assert_eq!(provider.calls(), 1);
    assert!(reports.windows(2).all(|pair| pair[0] == pair[1]));
}

#[tokio::test(start_paused = true)]
async fn test_distinct_content_computed_separately() {
    let provider = CountingProvider::new(Duration::from_millis(10));
    let service = service(
        Arc::clone(&provider),
        config(Duration::from_secs(5), Duration::from_secs(300)),
    );

    service.analyze(&ContentRequest::new("a")).await;
    service.analyze(&ContentRequest::new("b")).await;

    assert_eq!(provider.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_cache_stays_bounded_across_many_expired_ids() {
    let provider = CountingProvider::new(Duration::from_millis(1));
    let service = service(
        Arc::clone(&provider),
        config(Duration::from_secs(5), Duration::from_secs(10)),
    );

    for i in 0..1000 {
        service
            .analyze(&ContentRequest::new(format!("https://example.com/reel/{}", i)))
            .await;
        tokio::time::advance(Duration::from_secs(60)).await;
        assert!(service.cache().len().await <= ReportCache::SWEEP_THRESHOLD);
    }

    assert_eq!(provider.calls(), 1000);
}

#[tokio::test(start_paused = true)]
async fn test_provider_timeout_is_absent_evidence() {
    let provider = CountingProvider::new(Duration::from_secs(60));
    let service = service(
        Arc::clone(&provider),
        config(Duration::from_millis(250), Duration::from_secs(300)),
    );

    let report = service.analyze(&ContentRequest::new("https://example.com/reel/4")).await;

    assert_eq!(report.status, AnalysisStatus::Completed);
    assert_eq!(report.ai_probability, 0.01);
    assert_eq!(
        report.notes[0],
        "Provider deepfake-model unavailable: deepfake-model timed out after 250ms."
    );
    assert!(report.notes.iter().any(|n| n.starts_with("No evidence available")));
}
