//! Triage classification: a full score vector to a training disposition.
//!
//! The decision list is ordered by clinical risk and the first matching
//! rule wins. Safety outranks mobility, mobility outranks stability,
//! stability outranks pattern quality — a restriction earlier in the list
//! always dominates, no matter how good the remaining scores are.

use motus_types::{MovementTest, Score, ScoreVector, TriageResult, TriageStatus};

const MOBILITY_TESTS: [MovementTest; 2] = [MovementTest::LegRaise, MovementTest::ShoulderReach];
const STABILITY_TESTS: [MovementTest; 2] = [MovementTest::Rotary, MovementTest::TrunkStability];
const PATTERN_TESTS: [MovementTest; 3] =
    [MovementTest::Squat, MovementTest::Step, MovementTest::Lunge];

/// Classify a complete score vector.
#[must_use]
pub fn classify(scores: &ScoreVector) -> TriageResult {
    if scores.any_pain() {
        return TriageResult::new(
            TriageStatus::Stop,
            "Pain detected (score 0 in one or more tests). Refer to a medical professional.",
            scores.clone(),
        );
    }

    if limited(scores, &MOBILITY_TESTS) {
        return TriageResult::new(
            TriageStatus::Mobility,
            "Mobility restriction (score 1 in the leg raise or shoulder reach).",
            scores.clone(),
        );
    }

    if limited(scores, &STABILITY_TESTS) {
        return TriageResult::new(
            TriageStatus::Stability,
            "Motor control failure (score 1 in trunk or rotary stability).",
            scores.clone(),
        );
    }

    match scores.min_of(&PATTERN_TESTS) {
        Score::Pain | Score::Dysfunctional => TriageResult::new(
            TriageStatus::Pattern,
            "Pattern dysfunction (score 1 in the squat, step, or lunge).",
            scores.clone(),
        ),
        Score::Compensated => TriageResult::new(
            TriageStatus::Strength,
            "Acceptable patterning (score 2). Cleared for strength work.",
            scores.clone(),
        ),
        Score::Optimal => TriageResult::new(
            TriageStatus::Power,
            "Clean patterning (score 3). Cleared for power work.",
            scores.clone(),
        ),
    }
}

fn limited(scores: &ScoreVector, tests: &[MovementTest]) -> bool {
    tests
        .iter()
        .any(|&test| scores.get(test).score() <= Score::Dysfunctional)
}

#[cfg(test)]
mod tests {
    use super::*;
    use motus_types::{EffectiveScore, Provenance};

    /// Points in screening order: squat, step, lunge, shoulder reach,
    /// leg raise, trunk stability, rotary.
    fn vector(points: [u8; MovementTest::COUNT]) -> ScoreVector {
        let mut scores =
            [EffectiveScore::new(Score::MAX, Provenance::Default); MovementTest::COUNT];
        for test in MovementTest::ALL {
            let score = Score::try_from(points[test.index()]).unwrap();
            scores[test.index()] = EffectiveScore::new(score, Provenance::Default);
        }
        ScoreVector::new(scores)
    }

    #[test]
    fn any_zero_stops_training_regardless_of_other_scores() {
        let result = classify(&vector([3, 3, 3, 0, 3, 3, 3]));
        assert_eq!(result.status(), TriageStatus::Stop);
        assert_eq!(result.target_level(), 0);
    }

    #[test]
    fn leg_raise_restriction_dominates_a_perfect_squat() {
        let result = classify(&vector([3, 2, 2, 2, 1, 2, 2]));
        assert_eq!(result.status(), TriageStatus::Mobility);
        assert_eq!(result.target_level(), 1);
    }

    #[test]
    fn mobility_wins_when_stability_is_also_limited() {
        let result = classify(&vector([3, 3, 3, 1, 3, 1, 3]));
        assert_eq!(result.status(), TriageStatus::Mobility);
    }

    #[test]
    fn stability_failure_classifies_before_patterning() {
        let result = classify(&vector([3, 3, 3, 2, 2, 2, 1]));
        assert_eq!(result.status(), TriageStatus::Stability);
        assert_eq!(result.target_level(), 3);
    }

    #[test]
    fn weak_pattern_minimum_selects_pattern_work() {
        let result = classify(&vector([1, 2, 2, 2, 2, 2, 2]));
        assert_eq!(result.status(), TriageStatus::Pattern);
        assert_eq!(result.target_level(), 5);
    }

    #[test]
    fn all_twos_clear_for_strength() {
        let result = classify(&vector([2, 2, 2, 2, 2, 2, 2]));
        assert_eq!(result.status(), TriageStatus::Strength);
        assert_eq!(result.target_level(), 7);
    }

    #[test]
    fn perfect_patterns_clear_for_power() {
        let result = classify(&vector([3, 3, 3, 2, 2, 2, 2]));
        assert_eq!(result.status(), TriageStatus::Power);
        assert_eq!(result.target_level(), 9);
    }

    #[test]
    fn the_result_carries_the_full_score_vector() {
        let scores = vector([2, 2, 2, 2, 2, 2, 2]);
        let result = classify(&scores);
        assert_eq!(result.scores(), &scores);
    }
}
