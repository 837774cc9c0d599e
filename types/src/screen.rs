//! Screening input model — the seven movement tests and their observations.
//!
//! A [`ScreenProfile`] is the complete input to the triage pipeline: one
//! [`TestObservation`] per movement test plus a profile-wide manual-override
//! flag. Observations are immutable once constructed; scoring never mutates
//! them.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Score;

/// The seven standardized movement tests, in screening order.
///
/// The discriminant order is load-bearing: [`crate::ScoreVector`] indexes by
/// it, and `Ord` on map keys follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MovementTest {
    Squat,
    Step,
    Lunge,
    ShoulderReach,
    LegRaise,
    TrunkStability,
    Rotary,
}

impl MovementTest {
    /// Number of tests in a complete screening.
    pub const COUNT: usize = 7;

    /// All tests in screening order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Squat,
        Self::Step,
        Self::Lunge,
        Self::ShoulderReach,
        Self::LegRaise,
        Self::TrunkStability,
        Self::Rotary,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Wire name, as used for profile JSON keys.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Squat => "squat",
            Self::Step => "step",
            Self::Lunge => "lunge",
            Self::ShoulderReach => "shoulder-reach",
            Self::LegRaise => "leg-raise",
            Self::TrunkStability => "trunk-stability",
            Self::Rotary => "rotary",
        }
    }

    /// Human-readable name used in reasons and prompts.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Squat => "Deep Squat",
            Self::Step => "Hurdle Step",
            Self::Lunge => "Inline Lunge",
            Self::ShoulderReach => "Shoulder Reach",
            Self::LegRaise => "Active Leg Raise",
            Self::TrunkStability => "Trunk Stability Pushup",
            Self::Rotary => "Rotary Stability",
        }
    }
}

impl fmt::Display for MovementTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Raw observations recorded for a single movement test.
///
/// `sections` holds named groups of named severity counts, for example
/// `trunk-torso.excessive-forward-lean: 2`. A severity of zero means the
/// observation was recorded and found clear; a missing key means it was not
/// recorded at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TestObservation {
    /// Manually entered 0-3 score. Used when no fault data was recorded, or
    /// for every test when the profile requests manual override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
    /// Pain reported during this test's clearing movement.
    #[serde(default, skip_serializing_if = "is_false")]
    pub clearing_pain: bool,
    /// Named fault/quality sections, each mapping observation name to
    /// severity count.
    #[serde(flatten)]
    pub sections: BTreeMap<String, BTreeMap<String, u32>>,
}

impl TestObservation {
    /// Section holding pain indicators.
    pub const PAIN_SECTION: &'static str = "pain";
    /// Observation key for reported pain within [`Self::PAIN_SECTION`].
    pub const PAIN_REPORTED: &'static str = "pain-reported";

    /// Severity recorded for one named observation; zero when absent.
    #[must_use]
    pub fn severity(&self, section: &str, observation: &str) -> u32 {
        self.sections
            .get(section)
            .and_then(|entries| entries.get(observation))
            .copied()
            .unwrap_or(0)
    }

    /// True when any pain indicator fires: a nonzero `pain.pain-reported`
    /// count or the clearing-test flag.
    #[must_use]
    pub fn pain_indicated(&self) -> bool {
        self.clearing_pain || self.severity(Self::PAIN_SECTION, Self::PAIN_REPORTED) > 0
    }

    /// True when at least one nonzero severity was recorded in any section.
    #[must_use]
    pub fn has_findings(&self) -> bool {
        self.sections
            .values()
            .flat_map(BTreeMap::values)
            .any(|&severity| severity > 0)
    }
}

/// The complete screening input: all seven tests plus the override flag.
///
/// Serialization is canonical: field order is fixed, nested maps are
/// ordered, and default values are omitted, so two profiles with equal
/// content serialize to the same bytes regardless of input key order. The
/// consistency cache keys off that property.
///
/// Unknown test keys are rejected at the deserialization boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ScreenProfile {
    /// When set, every test uses its manually entered score and fault data
    /// is ignored. Pain indicators still dominate.
    #[serde(default, skip_serializing_if = "is_false")]
    pub manual_override: bool,
    pub squat: TestObservation,
    pub step: TestObservation,
    pub lunge: TestObservation,
    pub shoulder_reach: TestObservation,
    pub leg_raise: TestObservation,
    pub trunk_stability: TestObservation,
    pub rotary: TestObservation,
}

impl ScreenProfile {
    /// Borrow the observation for one test.
    #[must_use]
    pub fn observation(&self, test: MovementTest) -> &TestObservation {
        match test {
            MovementTest::Squat => &self.squat,
            MovementTest::Step => &self.step,
            MovementTest::Lunge => &self.lunge,
            MovementTest::ShoulderReach => &self.shoulder_reach,
            MovementTest::LegRaise => &self.leg_raise,
            MovementTest::TrunkStability => &self.trunk_stability,
            MovementTest::Rotary => &self.rotary,
        }
    }

    /// Iterate observations in screening order.
    pub fn observations(&self) -> impl Iterator<Item = (MovementTest, &TestObservation)> {
        MovementTest::ALL.iter().map(move |&test| (test, self.observation(test)))
    }

    /// Reject manual scores outside 0-3. Runs before any scoring.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (test, observation) in self.observations() {
            if let Some(score) = observation.score
                && score > Score::MAX.points()
            {
                return Err(ValidationError::ScoreOutOfRange { test, score });
            }
        }
        Ok(())
    }
}

/// Rejected screening input, surfaced before any computation happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{test}: manual score {score} is out of range (expected 0-3)")]
    ScoreOutOfRange { test: MovementTest, score: u8 },
}

fn is_false(flag: &bool) -> bool {
    !flag
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_round_trips_with_canonical_bytes() {
        let json = r#"{
            "shoulder-reach": {"score": 2},
            "squat": {"feet": {"heels-lift": 1}},
            "step": {},
            "lunge": {},
            "leg-raise": {},
            "trunk-stability": {},
            "rotary": {"clearing-pain": true}
        }"#;
        let reordered = r#"{
            "squat": {"feet": {"heels-lift": 1}},
            "step": {},
            "lunge": {},
            "shoulder-reach": {"score": 2},
            "leg-raise": {},
            "trunk-stability": {},
            "rotary": {"clearing-pain": true}
        }"#;

        let a: ScreenProfile = serde_json::from_str(json).unwrap();
        let b: ScreenProfile = serde_json::from_str(reordered).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn unknown_test_key_is_rejected() {
        let json = r#"{
            "squat": {}, "step": {}, "lunge": {}, "shoulder-reach": {},
            "leg-raise": {}, "trunk-stability": {}, "rotary": {},
            "plank": {}
        }"#;
        assert!(serde_json::from_str::<ScreenProfile>(json).is_err());
    }

    #[test]
    fn missing_test_is_rejected() {
        let json = r#"{
            "squat": {}, "step": {}, "lunge": {}, "shoulder-reach": {},
            "leg-raise": {}, "trunk-stability": {}
        }"#;
        assert!(serde_json::from_str::<ScreenProfile>(json).is_err());
    }

    #[test]
    fn pain_indicated_via_count_or_clearing_flag() {
        let mut observation = TestObservation::default();
        assert!(!observation.pain_indicated());

        observation.sections.insert(
            TestObservation::PAIN_SECTION.to_string(),
            BTreeMap::from([(TestObservation::PAIN_REPORTED.to_string(), 1)]),
        );
        assert!(observation.pain_indicated());

        let cleared = TestObservation {
            clearing_pain: true,
            ..TestObservation::default()
        };
        assert!(cleared.pain_indicated());
    }

    #[test]
    fn all_zero_severities_count_as_no_findings() {
        let observation = TestObservation {
            sections: BTreeMap::from([(
                "feet".to_string(),
                BTreeMap::from([("heels-lift".to_string(), 0)]),
            )]),
            ..TestObservation::default()
        };
        assert!(!observation.has_findings());
    }

    #[test]
    fn validate_rejects_out_of_range_manual_score() {
        let profile = ScreenProfile {
            lunge: TestObservation {
                score: Some(7),
                ..TestObservation::default()
            },
            ..ScreenProfile::default()
        };
        assert_eq!(
            profile.validate(),
            Err(ValidationError::ScoreOutOfRange {
                test: MovementTest::Lunge,
                score: 7,
            })
        );
    }
}
