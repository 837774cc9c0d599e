//! Triage classification output.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ScoreVector;

/// Safety/training-readiness category, listed in precedence order.
///
/// Earlier categories always dominate later ones: a safety restriction is
/// never outranked by good pattern scores elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TriageStatus {
    Stop,
    Mobility,
    Stability,
    Pattern,
    Strength,
    Power,
}

impl TriageStatus {
    /// Training-intensity tier this classification clears the athlete for.
    #[must_use]
    pub const fn target_level(self) -> u8 {
        match self {
            Self::Stop => 0,
            Self::Mobility => 1,
            Self::Stability => 3,
            Self::Pattern => 5,
            Self::Strength => 7,
            Self::Power => 9,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stop => "STOP",
            Self::Mobility => "MOBILITY",
            Self::Stability => "STABILITY",
            Self::Pattern => "PATTERN",
            Self::Strength => "STRENGTH",
            Self::Power => "POWER",
        }
    }
}

impl fmt::Display for TriageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of classifying a full score vector. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageResult {
    status: TriageStatus,
    target_level: u8,
    reason: String,
    scores: ScoreVector,
}

impl TriageResult {
    /// Invariant: `target_level` always matches the status.
    #[must_use]
    pub fn new(status: TriageStatus, reason: impl Into<String>, scores: ScoreVector) -> Self {
        Self {
            status,
            target_level: status.target_level(),
            reason: reason.into(),
            scores,
        }
    }

    #[must_use]
    pub const fn status(&self) -> TriageStatus {
        self.status
    }

    #[must_use]
    pub const fn target_level(&self) -> u8 {
        self.target_level
    }

    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    #[must_use]
    pub const fn scores(&self) -> &ScoreVector {
        &self.scores
    }
}
