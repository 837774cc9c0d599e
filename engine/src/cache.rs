//! Consistency cache: canonical profile keys and single-flight memoization.
//!
//! The cache is process-scoped state with a documented lifecycle: it starts
//! empty, grows for the lifetime of the process, and is never evicted or
//! torn down. Each key's first caller becomes the computation leader;
//! concurrent callers for the same key await the leader's result instead of
//! recomputing, and callers for different keys never block each other.
//! Failed computations are not stored — the next caller for that key starts
//! fresh.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use motus_types::{ScreenProfile, SessionPlan};
use sha2::{Digest, Sha256};
use tokio::sync::{Mutex, OnceCell};

/// Canonical fingerprint of a screening profile.
///
/// SHA-256 over the profile's canonical serialization. Stable under input
/// key reordering because the serialization itself is: fixed field order,
/// ordered nested maps, defaults omitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey([u8; 32]);

impl CacheKey {
    pub fn for_profile(profile: &ScreenProfile) -> Result<Self, serde_json::Error> {
        let canonical = serde_json::to_vec(profile)?;
        Ok(Self(Sha256::digest(&canonical).into()))
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Single-flight map from profile fingerprints to finalized plans.
#[derive(Debug, Default)]
pub struct PlanCache {
    entries: Mutex<HashMap<CacheKey, Arc<OnceCell<SessionPlan>>>>,
}

impl PlanCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored plans; in-flight computations are not counted.
    pub async fn stored(&self) -> usize {
        self.entries
            .lock()
            .await
            .values()
            .filter(|cell| cell.initialized())
            .count()
    }

    /// Return the stored plan for `key`, or run `compute` to produce it.
    ///
    /// The map lock is held only to look up or register the key's cell,
    /// never across the computation. Concurrent callers for one key
    /// converge on a single computation; an `Err` outcome is handed to its
    /// caller without being stored.
    pub async fn get_or_compute<E, F, Fut>(&self, key: CacheKey, compute: F) -> Result<SessionPlan, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<SessionPlan, E>>,
    {
        let cell = {
            let mut entries = self.entries.lock().await;
            Arc::clone(entries.entry(key).or_default())
        };

        if let Some(plan) = cell.get() {
            tracing::debug!(key = %key, "plan cache hit");
            return Ok(plan.clone());
        }

        let plan = cell.get_or_try_init(compute).await?;
        Ok(plan.clone())
    }
}
