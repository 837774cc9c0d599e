//! The screening pipeline behind the consistency cache.

use std::sync::Arc;

use motus_providers::{FormatError, PlanFormatter};
use motus_types::{Catalog, ScreenProfile, SessionPlan, TriageStatus, ValidationError};
use thiserror::Error;

use crate::cache::{CacheKey, PlanCache};
use crate::classifier::classify;
use crate::scorer::score_profile;
use crate::selector::select;

/// Faults surfaced to the caller instead of a plan.
#[derive(Debug, Error)]
pub enum ScreenError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("failed to fingerprint profile")]
    Fingerprint(#[source] serde_json::Error),
}

/// Faults inside a single cached computation.
#[derive(Debug, Error)]
enum ComputeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// The full triage pipeline with its consistency cache.
///
/// Holds the read-only catalog, the formatting collaborator, and the
/// process-lifetime plan cache. Cheap to share behind an `Arc`; all methods
/// take `&self`.
pub struct Screener<F> {
    catalog: Arc<Catalog>,
    formatter: F,
    cache: PlanCache,
}

impl<F: PlanFormatter> Screener<F> {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, formatter: F) -> Self {
        Self {
            catalog,
            formatter,
            cache: PlanCache::new(),
        }
    }

    /// Produce the finalized plan for a profile.
    ///
    /// Identical profiles (any input key order) share one cached
    /// computation. Formatting-service failures degrade to an
    /// explicitly-labeled outcome and leave the cache untouched, so a later
    /// identical request gets a fresh attempt.
    pub async fn plan(&self, profile: &ScreenProfile) -> Result<SessionPlan, ScreenError> {
        profile.validate()?;
        let key = CacheKey::for_profile(profile).map_err(ScreenError::Fingerprint)?;

        match self.cache.get_or_compute(key, || self.compute(profile)).await {
            Ok(plan) => Ok(plan),
            Err(ComputeError::Validation(error)) => Err(error.into()),
            Err(ComputeError::Format(error)) => {
                tracing::warn!(error = %error, "plan formatting failed; returning degraded outcome");
                Ok(SessionPlan::degraded())
            }
        }
    }

    /// Number of finalized plans currently memoized.
    pub async fn cached_plans(&self) -> usize {
        self.cache.stored().await
    }

    async fn compute(&self, profile: &ScreenProfile) -> Result<SessionPlan, ComputeError> {
        let scores = score_profile(profile)?;
        tracing::debug!(scores = ?scores, "profile scored");
        let triage = classify(&scores);
        tracing::info!(
            status = %triage.status(),
            level = triage.target_level(),
            "profile classified"
        );

        if triage.status() == TriageStatus::Stop {
            return Ok(SessionPlan::referral(triage.reason()));
        }

        let selection = select(&self.catalog, triage.target_level());
        if selection.is_empty() {
            tracing::info!(
                level = triage.target_level(),
                "no catalog coverage at or near the target level"
            );
            return Ok(SessionPlan::no_candidates(triage.target_level()));
        }

        let plan = self.formatter.format_plan(&triage, &selection).await?;
        Ok(plan)
    }
}
