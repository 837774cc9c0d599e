//! Core domain types for Motus.
//!
//! This crate contains pure domain types with no IO, no async, and minimal
//! dependencies. Everything here can be used from any layer of the pipeline:
//! the screening input model, effective scores, triage results, the exercise
//! catalog, and finalized session plans.

mod catalog;
mod plan;
mod score;
mod screen;
mod triage;

pub use catalog::{
    Catalog, CatalogEntry, Level, LevelRangeError, SELECTION_LIMIT, Selection,
};
pub use plan::{DifficultyColor, Disposition, ExerciseCard, SessionPlan};
pub use score::{
    EffectiveScore, Provenance, Score, ScoreRangeError, ScoreVector, ScoreVectorError,
};
pub use screen::{MovementTest, ScreenProfile, TestObservation, ValidationError};
pub use triage::{TriageResult, TriageStatus};
