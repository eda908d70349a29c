//! Per-content report cache
//!
//! Each content identifier owns one slot guarded by an async mutex. A request
//! holds the slot lock while it computes, so concurrent requests for the same
//! content wait for that computation instead of starting their own. Entries
//! older than the TTL are recomputed on the next request. Failed reports are
//! never stored.
//!
//! Stale slots are swept when a new key arrives and the map has reached its
//! sweep mark. The mark starts at `ReportCache::SWEEP_THRESHOLD` and doubles
//! with the number of live entries, so sweeps stay amortised.

use crate::models::EvidenceReport;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

#[derive(Debug, Clone)]
struct CachedReport {
    report: EvidenceReport,
    computed_at: Instant,
}

type Slot = Arc<Mutex<Option<CachedReport>>>;

/// Where a returned report came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Computed,
}

struct SlotMap {
    slots: HashMap<String, Slot>,
    next_sweep: usize,
}

pub struct ReportCache {
    ttl: Duration,
    slots: Mutex<SlotMap>,
}

/// Keep slots that are fresh or in use; returns how many were dropped
fn retain_live(slots: &mut HashMap<String, Slot>, ttl: Duration) -> usize {
    let before = slots.len();
    slots.retain(|_, slot| {
        // another request holds this slot (waiting or computing)
        if Arc::strong_count(slot) > 1 {
            return true;
        }
        match slot.try_lock() {
            Ok(guard) => {
                let fresh = guard
                    .as_ref()
                    .is_some_and(|cached| cached.computed_at.elapsed() < ttl);
                fresh
            }
            Err(_) => true,
        }
    });
    before - slots.len()
}

impl ReportCache {
    /// Slot count at which the first sweep runs
    pub const SWEEP_THRESHOLD: usize = 256;

    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slots: Mutex::new(SlotMap {
                slots: HashMap::new(),
                next_sweep: Self::SWEEP_THRESHOLD,
            }),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    async fn slot(&self, key: &str) -> Slot {
        let mut map = self.slots.lock().await;
        if !map.slots.contains_key(key) && map.slots.len() >= map.next_sweep {
            let removed = retain_live(&mut map.slots, self.ttl);
            map.next_sweep = Self::SWEEP_THRESHOLD.max(map.slots.len() * 2);
            debug!(
                removed,
                remaining = map.slots.len(),
                next_sweep = map.next_sweep,
                "Report cache swept"
            );
        }
        Arc::clone(map.slots.entry(key.to_string()).or_default())
    }

    /// Fresh cached report, if any, without computing
    pub async fn get(&self, key: &str) -> Option<EvidenceReport> {
        let slot = self.slots.lock().await.slots.get(key).cloned()?;
        let guard = slot.lock().await;
        guard
            .as_ref()
            .filter(|cached| cached.computed_at.elapsed() < self.ttl)
            .map(|cached| cached.report.clone())
    }

    /// Return the fresh cached report for `key`, or run `compute` and cache its result
    ///
    /// At most one `compute` runs per key at a time.
    pub async fn get_or_compute<F, Fut>(&self, key: &str, compute: F) -> (EvidenceReport, CacheStatus)
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = EvidenceReport>,
    {
        let slot = self.slot(key).await;
        let mut guard = slot.lock().await;

        if let Some(cached) = guard.as_ref() {
            if cached.computed_at.elapsed() < self.ttl {
                debug!(content_id = key, "Report cache hit");
                return (cached.report.clone(), CacheStatus::Hit);
            }
            debug!(content_id = key, "Report cache entry expired");
        }

        let report = compute().await;
        *guard = if report.is_failed() {
            None
        } else {
            Some(CachedReport {
                report: report.clone(),
                computed_at: Instant::now(),
            })
        };
        (report, CacheStatus::Computed)
    }

    /// Drop expired and empty entries; slots in use by a request are left alone
    pub async fn purge_expired(&self) -> usize {
        let mut map = self.slots.lock().await;
        retain_live(&mut map.slots, self.ttl)
    }

    pub async fn len(&self) -> usize {
        self.slots.lock().await.slots.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
