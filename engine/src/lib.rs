//! Scoring, triage, selection, and the consistency cache.
//!
//! # Pipeline
//!
//! ```text
//! ScreenProfile -> scorer (x7) -> ScoreVector -> classifier -> TriageResult
//!                                                                   |
//!                                                                   v
//!                            selector -> Selection -> formatter -> SessionPlan
//! ```
//!
//! The scorer, classifier, and selector are pure, stateless computations
//! safe to run on any number of concurrent tasks. [`Screener`] wraps the
//! whole pipeline behind the consistency cache: a given input profile is
//! computed at most once per process, concurrent duplicates converge on the
//! single in-flight computation, and later identical requests read the
//! stored plan.

mod cache;
mod classifier;
mod pipeline;
mod scorer;
mod selector;

pub use cache::{CacheKey, PlanCache};
pub use classifier::classify;
pub use pipeline::{ScreenError, Screener};
pub use scorer::{score_profile, score_test};
pub use selector::select;
