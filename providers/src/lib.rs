//! Plan formatting collaborators.
//!
//! # Architecture
//!
//! The crate is organized around a formatter dispatch pattern:
//!
//! - [`PlanFormatter`] — the seam the pipeline calls through
//! - [`RemoteFormatter`] — OpenAI-compatible chat-completions client that
//!   turns a triage result and a catalog selection into a narrative session
//!   plan
//! - [`CannedFormatter`] — deterministic offline formatter used when no API
//!   key is configured, and in tests
//! - [`Formatter`] — unified dispatch between the two
//!
//! # Error Handling
//!
//! Failures surface as [`FormatError`]. No retries happen at this layer;
//! retry policy belongs to the remote service's own boundary, and the
//! pipeline turns failures into an explicitly-labeled degraded outcome.

mod canned;
mod remote;

pub use canned::CannedFormatter;
pub use remote::RemoteFormatter;

use std::future::Future;
use std::sync::OnceLock;
use std::time::Duration;

use motus_types::{Selection, SessionPlan, TriageResult};
use thiserror::Error;

const CONNECT_TIMEOUT_SECS: u64 = 30;
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Shared HTTP client for all remote formatters.
pub(crate) fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap_or_else(|e| {
                tracing::error!("Failed to build configured HTTP client: {e}. Using defaults.");
                reqwest::Client::new()
            })
    })
}

/// Errors from the formatting collaborator.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("plan service request failed")]
    Transport(#[from] reqwest::Error),
    #[error("plan service returned status {status}: {body}")]
    Api { status: u16, body: String },
    #[error("plan service returned no choices")]
    EmptyResponse,
    #[error("plan service returned malformed plan JSON")]
    MalformedPlan(#[source] serde_json::Error),
}

/// Turns a triage result and a catalog selection into a finalized session
/// plan.
///
/// Callers guarantee the selection is non-empty and the status is not STOP;
/// those terminal outcomes never reach a formatter.
pub trait PlanFormatter: Send + Sync {
    fn format_plan(
        &self,
        triage: &TriageResult,
        selection: &Selection,
    ) -> impl Future<Output = Result<SessionPlan, FormatError>> + Send;
}

/// Unified formatter, dispatching to a concrete implementation.
#[derive(Debug, Clone)]
pub enum Formatter {
    Remote(RemoteFormatter),
    Canned(CannedFormatter),
}

impl PlanFormatter for Formatter {
    async fn format_plan(
        &self,
        triage: &TriageResult,
        selection: &Selection,
    ) -> Result<SessionPlan, FormatError> {
        match self {
            Self::Remote(remote) => remote.format_plan(triage, selection).await,
            Self::Canned(canned) => canned.format_plan(triage, selection).await,
        }
    }
}
