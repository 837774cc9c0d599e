//! Finalized session plans, as handed back by the formatting collaborator.

use serde::{Deserialize, Serialize};

/// Terminal state of a planning request.
///
/// Downstream consumers branch on this instead of parsing prose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Disposition {
    /// A formatted training session.
    Plan,
    /// Pain was detected; training is contraindicated.
    Referral,
    /// The catalog has no coverage at or adjacent to the target level.
    NoCandidates,
    /// The formatting service failed; the screening itself is valid.
    Degraded,
}

/// Traffic-light difficulty banding for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DifficultyColor {
    Red,
    Yellow,
    Green,
}

impl DifficultyColor {
    /// Banding rule: levels up to 3 are red, 4-6 yellow, 7 and above green.
    #[must_use]
    pub const fn for_level(level: u8) -> Self {
        match level {
            0..=3 => Self::Red,
            4..=6 => Self::Yellow,
            _ => Self::Green,
        }
    }
}

/// One prescribed exercise in a session plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ExerciseCard {
    /// Exact exercise name from the catalog.
    pub name: String,
    /// Short uppercase badge, e.g. "ANKLE MOBILITY".
    pub tag: String,
    /// Sets/reps prescription, e.g. "3 x 10-12".
    pub prescription: String,
    /// Movement tempo, e.g. "3-1-3-0" or "Controlled".
    pub tempo: String,
    /// 1-2 sentence cue addressing the athlete's faults.
    pub coach_tip: String,
}

/// The finalized plan returned to callers and stored in the consistency
/// cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SessionPlan {
    pub disposition: Disposition,
    pub title: String,
    pub estimated_duration: String,
    pub difficulty_color: DifficultyColor,
    pub summary: String,
    pub exercises: Vec<ExerciseCard>,
}

impl SessionPlan {
    /// Canned outcome for STOP classifications. The formatting service is
    /// never consulted when training is contraindicated.
    #[must_use]
    pub fn referral(reason: &str) -> Self {
        Self {
            disposition: Disposition::Referral,
            title: "Medical Referral Required".to_string(),
            estimated_duration: "n/a".to_string(),
            difficulty_color: DifficultyColor::Red,
            summary: format!(
                "{reason} Do not proceed with corrective exercise; consult a physical \
                 therapist or doctor."
            ),
            exercises: Vec::new(),
        }
    }

    /// Canned outcome when the catalog has nothing at or adjacent to the
    /// target level.
    #[must_use]
    pub fn no_candidates(target_level: u8) -> Self {
        Self {
            disposition: Disposition::NoCandidates,
            title: "Assessment Complete - No Matching Drills".to_string(),
            estimated_duration: "n/a".to_string(),
            difficulty_color: DifficultyColor::for_level(target_level),
            summary: format!(
                "No catalog exercises cover level {target_level} or the adjacent tiers. \
                 The athlete may be cleared for general training, or the catalog needs \
                 broader coverage."
            ),
            exercises: Vec::new(),
        }
    }

    /// Degraded outcome for formatting-service failures.
    #[must_use]
    pub fn degraded() -> Self {
        Self {
            disposition: Disposition::Degraded,
            title: "Plan Formatting Unavailable".to_string(),
            estimated_duration: "n/a".to_string(),
            difficulty_color: DifficultyColor::Red,
            summary: "The screening was scored, but the formatting service did not return \
                      a plan. Submit the same profile again to retry."
                .to_string(),
            exercises: Vec::new(),
        }
    }
}
