//! Deterministic offline formatter.
//!
//! Mirrors the remote service's output shape without any network
//! dependency: fixed templates, entries sorted by name, prescription
//! defaults per card. Used when no API key is configured, and in tests
//! where deterministic output matters.

use motus_types::{
    CatalogEntry, DifficultyColor, Disposition, ExerciseCard, Selection, SessionPlan,
    TriageResult, TriageStatus,
};

use crate::{FormatError, PlanFormatter};

/// Formats plans from fixed templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct CannedFormatter;

impl CannedFormatter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl PlanFormatter for CannedFormatter {
    async fn format_plan(
        &self,
        triage: &TriageResult,
        selection: &Selection,
    ) -> Result<SessionPlan, FormatError> {
        let level = triage.target_level();

        let mut entries: Vec<&CatalogEntry> = selection.iter().collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        let exercises = entries
            .into_iter()
            .map(|entry| ExerciseCard {
                name: entry.name.clone(),
                tag: badge(entry),
                prescription: "3 x 10-12".to_string(),
                tempo: "Controlled".to_string(),
                coach_tip: if entry.description.is_empty() {
                    format!("Own every rep of the {}.", entry.name.to_lowercase())
                } else {
                    entry.description.clone()
                },
            })
            .collect();

        Ok(SessionPlan {
            disposition: Disposition::Plan,
            title: format!("Level {level} {} Session", focus(triage.status())),
            estimated_duration: "20-30 min".to_string(),
            difficulty_color: DifficultyColor::for_level(level),
            summary: format!("{} Work at level {level} until the pattern holds.", triage.reason()),
            exercises,
        })
    }
}

fn focus(status: TriageStatus) -> &'static str {
    match status {
        TriageStatus::Stop => "Referral",
        TriageStatus::Mobility => "Mobility",
        TriageStatus::Stability => "Stability",
        TriageStatus::Pattern => "Patterning",
        TriageStatus::Strength => "Strength",
        TriageStatus::Power => "Power",
    }
}

fn badge(entry: &CatalogEntry) -> String {
    entry
        .tags
        .first()
        .map_or_else(|| entry.category.clone(), String::clone)
        .replace('-', " ")
        .to_uppercase()
}
