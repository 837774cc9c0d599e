//! Ordinal movement scores and their provenance.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::MovementTest;

/// Ordinal quality score for one movement test.
///
/// The ordering is clinical: pain disqualifies, a dysfunctional pattern
/// cannot be loaded, a compensated pattern can be trained carefully, an
/// optimal pattern is cleared. `Ord` follows that scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Score {
    /// Pain during the movement or its clearing test.
    Pain,
    /// Unable to complete the pattern, or a disqualifying fault.
    Dysfunctional,
    /// Completed with compensation.
    Compensated,
    /// Completed cleanly.
    Optimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("score {0} is out of range (expected 0-3)")]
pub struct ScoreRangeError(pub u8);

impl Score {
    pub const MAX: Self = Self::Optimal;

    #[must_use]
    pub const fn points(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Score {
    type Error = ScoreRangeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Pain),
            1 => Ok(Self::Dysfunctional),
            2 => Ok(Self::Compensated),
            3 => Ok(Self::Optimal),
            other => Err(ScoreRangeError(other)),
        }
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> Self {
        score.points()
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.points())
    }
}

/// Where an effective score came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provenance {
    /// Manually entered under profile-wide override.
    Manual,
    /// Computed from recorded fault observations.
    Faults,
    /// Fallback to the manual score field with no fault data recorded.
    Default,
}

/// The 0-3 score actually used for classification, with its origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectiveScore {
    score: Score,
    provenance: Provenance,
}

impl EffectiveScore {
    #[must_use]
    pub const fn new(score: Score, provenance: Provenance) -> Self {
        Self { score, provenance }
    }

    #[must_use]
    pub const fn score(self) -> Score {
        self.score
    }

    #[must_use]
    pub const fn provenance(self) -> Provenance {
        self.provenance
    }
}

/// One effective score per movement test, always complete.
///
/// Invariant: every test has exactly one entry. Enforced at construction
/// and, via `try_from`, at the deserialization boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<MovementTest, EffectiveScore>",
    into = "BTreeMap<MovementTest, EffectiveScore>"
)]
pub struct ScoreVector([EffectiveScore; MovementTest::COUNT]);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("score vector is missing an entry for {0}")]
pub struct ScoreVectorError(pub MovementTest);

impl ScoreVector {
    #[must_use]
    pub const fn new(scores: [EffectiveScore; MovementTest::COUNT]) -> Self {
        Self(scores)
    }

    #[must_use]
    pub fn get(&self, test: MovementTest) -> EffectiveScore {
        self.0[test.index()]
    }

    /// Iterate scores in screening order.
    pub fn iter(&self) -> impl Iterator<Item = (MovementTest, EffectiveScore)> + '_ {
        MovementTest::ALL.iter().map(move |&test| (test, self.get(test)))
    }

    /// Lowest score among the given tests; [`Score::MAX`] for an empty set.
    #[must_use]
    pub fn min_of(&self, tests: &[MovementTest]) -> Score {
        tests
            .iter()
            .map(|&test| self.get(test).score())
            .min()
            .unwrap_or(Score::MAX)
    }

    /// True when any test scored [`Score::Pain`].
    #[must_use]
    pub fn any_pain(&self) -> bool {
        self.iter().any(|(_, score)| score.score() == Score::Pain)
    }
}

impl TryFrom<BTreeMap<MovementTest, EffectiveScore>> for ScoreVector {
    type Error = ScoreVectorError;

    fn try_from(map: BTreeMap<MovementTest, EffectiveScore>) -> Result<Self, Self::Error> {
        let mut scores = [EffectiveScore::new(Score::MAX, Provenance::Default); MovementTest::COUNT];
        for test in MovementTest::ALL {
            scores[test.index()] = *map.get(&test).ok_or(ScoreVectorError(test))?;
        }
        Ok(Self(scores))
    }
}

impl From<ScoreVector> for BTreeMap<MovementTest, EffectiveScore> {
    fn from(vector: ScoreVector) -> Self {
        vector.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_try_from_covers_the_full_range() {
        assert_eq!(Score::try_from(0), Ok(Score::Pain));
        assert_eq!(Score::try_from(3), Ok(Score::Optimal));
        assert_eq!(Score::try_from(4), Err(ScoreRangeError(4)));
    }

    #[test]
    fn score_ordering_follows_the_clinical_scale() {
        assert!(Score::Pain < Score::Dysfunctional);
        assert!(Score::Dysfunctional < Score::Compensated);
        assert!(Score::Compensated < Score::Optimal);
    }

    #[test]
    fn score_vector_serializes_as_a_named_map() {
        let vector = ScoreVector::new(
            [EffectiveScore::new(Score::Compensated, Provenance::Default); MovementTest::COUNT],
        );
        let json = serde_json::to_value(&vector).unwrap();
        assert_eq!(json["squat"]["score"], 2);
        assert_eq!(json["shoulder-reach"]["provenance"], "default");

        let back: ScoreVector = serde_json::from_value(json).unwrap();
        assert_eq!(back, vector);
    }

    #[test]
    fn score_vector_rejects_incomplete_maps() {
        let mut map = BTreeMap::new();
        map.insert(
            MovementTest::Squat,
            EffectiveScore::new(Score::Optimal, Provenance::Manual),
        );
        assert_eq!(
            ScoreVector::try_from(map),
            Err(ScoreVectorError(MovementTest::Step))
        );
    }

    #[test]
    fn min_of_picks_the_weakest_pattern() {
        let mut scores =
            [EffectiveScore::new(Score::Optimal, Provenance::Default); MovementTest::COUNT];
        scores[MovementTest::Lunge.index()] =
            EffectiveScore::new(Score::Dysfunctional, Provenance::Faults);
        let vector = ScoreVector::new(scores);
        assert_eq!(
            vector.min_of(&[MovementTest::Squat, MovementTest::Step, MovementTest::Lunge]),
            Score::Dysfunctional
        );
    }
}
