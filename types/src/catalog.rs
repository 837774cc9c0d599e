//! Static exercise catalog and per-request selections.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Catalog difficulty tier, 1-10.
///
/// Invariant: in range at construction, enforced at the deserialization
/// boundary via `try_from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Level(u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("difficulty level {0} is out of range (expected 1-10)")]
pub struct LevelRangeError(pub u8);

impl Level {
    pub const MIN: Self = Self(1);
    pub const MAX: Self = Self(10);

    pub fn try_new(value: u8) -> Result<Self, LevelRangeError> {
        if (Self::MIN.0..=Self::MAX.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(LevelRangeError(value))
        }
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Absolute distance from a target tier.
    #[must_use]
    pub const fn distance_from(self, target: u8) -> u8 {
        self.0.abs_diff(target)
    }
}

impl TryFrom<u8> for Level {
    type Error = LevelRangeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One leveled exercise record from the static knowledge base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    pub category: String,
    pub level: Level,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub description: String,
}

/// The read-only exercise knowledge base, loaded once at process start.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    #[must_use]
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    /// Entries whose level matches the target exactly.
    pub fn at_level(&self, target: u8) -> impl Iterator<Item = &CatalogEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.level.get() == target)
    }

    /// Entries within one tier of the target.
    pub fn near_level(&self, target: u8) -> impl Iterator<Item = &CatalogEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.level.distance_from(target) <= 1)
    }
}

/// Upper bound on entries in one [`Selection`].
pub const SELECTION_LIMIT: usize = 3;

/// A bounded draw from the catalog: at most [`SELECTION_LIMIT`] unique
/// entries. Order carries no meaning.
///
/// An empty selection is a legitimate terminal state — "no catalog coverage
/// for this level" — not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    entries: Vec<CatalogEntry>,
}

impl Selection {
    /// Invariant: at most [`SELECTION_LIMIT`] entries.
    #[must_use]
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        debug_assert!(entries.len() <= SELECTION_LIMIT);
        Self { entries }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }
}
