//! Per-test scoring: raw observations to effective scores.
//!
//! Every test walks the same ladder: pain disqualifies outright, manual
//! override short-circuits to the entered score, recorded fault data runs
//! through the test's rule table, and an untouched test falls back to its
//! manual score. The rule tables themselves are data — each test's severe
//! and minor fault lists and its completion requirement are constants that
//! can be corrected without touching the evaluation logic.

use motus_types::{
    EffectiveScore, MovementTest, Provenance, Score, ScoreVector, ScreenProfile, TestObservation,
    ValidationError,
};

/// Score assumed when no manual score was entered.
const FALLBACK_SCORE: Score = Score::Compensated;

/// How a fault check reads its observation.
#[derive(Debug, Clone, Copy)]
enum Trigger {
    /// Fires when the severity count is above zero.
    Present,
    /// Fires when an expected-good observation is recorded at zero.
    Absent,
}

/// One named check against a test's severity sections.
#[derive(Debug, Clone, Copy)]
struct FaultCheck {
    section: &'static str,
    observation: &'static str,
    trigger: Trigger,
}

const fn fault(section: &'static str, observation: &'static str) -> FaultCheck {
    FaultCheck {
        section,
        observation,
        trigger: Trigger::Present,
    }
}

const fn missing(section: &'static str, observation: &'static str) -> FaultCheck {
    FaultCheck {
        section,
        observation,
        trigger: Trigger::Absent,
    }
}

/// What a test scores when no severe or minor fault matched.
#[derive(Debug, Clone, Copy)]
enum Completion {
    /// No fault recorded means the movement was clean.
    Clean,
    /// The top score additionally requires positive observations; anything
    /// less falls back to the given score.
    Requires {
        positives: &'static [(&'static str, &'static str)],
        fallback: Score,
    },
}

/// Ordered predicate chain for one movement test. Severe faults are checked
/// before minor ones; the first tier with a hit decides the score.
struct RuleTable {
    /// Disqualifying faults; any hit scores 1.
    severe: &'static [FaultCheck],
    /// Compensation faults; any hit scores 2.
    minor: &'static [FaultCheck],
    completion: Completion,
}

const SQUAT_RULES: RuleTable = RuleTable {
    severe: &[
        fault("trunk-torso", "excessive-forward-lean"),
        fault("trunk-torso", "lumbar-flexion"),
        fault("lower-limb", "knee-valgus"),
        fault("feet", "heels-lift"),
        fault("upper-body-bar-position", "bar-drifts-forward"),
        missing("trunk-torso", "upright-torso"),
    ],
    minor: &[],
    completion: Completion::Clean,
};

const STEP_RULES: RuleTable = RuleTable {
    severe: &[
        fault("stepping-leg", "toe-drag"),
        fault("pelvis-core-control", "loss-of-balance"),
    ],
    minor: &[
        fault("pelvis-core-control", "excessive-rotation"),
        fault("stance-leg", "knee-valgus"),
        fault("stance-leg", "knee-varus"),
        missing("stance-leg", "knee-stable"),
    ],
    completion: Completion::Clean,
};

const LUNGE_RULES: RuleTable = RuleTable {
    severe: &[fault("balance-stability", "loss-of-balance")],
    minor: &[
        fault("alignment", "excessive-forward-lean"),
        fault("alignment", "lateral-shift"),
        fault("lower-body-control", "knee-valgus"),
        fault("lower-body-control", "heel-lift"),
        missing("lower-body-control", "knee-tracks-over-foot"),
    ],
    completion: Completion::Clean,
};

const SHOULDER_REACH_RULES: RuleTable = RuleTable {
    severe: &[
        fault("reach-quality", "excessive-gap"),
        fault("reach-quality", "asymmetry-present"),
    ],
    minor: &[
        fault("compensation", "rib-flare"),
        fault("compensation", "scapular-winging"),
    ],
    completion: Completion::Requires {
        positives: &[("reach-quality", "hands-within-fist-distance")],
        fallback: Score::Compensated,
    },
};

const LEG_RAISE_RULES: RuleTable = RuleTable {
    severe: &[
        fault("moving-leg", "lt-60-hip-flexion"),
        fault("non-moving-leg", "foot-lifts-off-floor"),
    ],
    minor: &[
        fault("pelvic-control", "anterior-tilt"),
        fault("moving-leg", "hamstring-restriction"),
    ],
    completion: Completion::Requires {
        positives: &[
            ("moving-leg", "gt-80-hip-flexion"),
            ("pelvic-control", "pelvis-stable"),
        ],
        fallback: Score::Compensated,
    },
};

const TRUNK_STABILITY_RULES: RuleTable = RuleTable {
    severe: &[
        fault("core-control", "hips-lag"),
        fault("body-alignment", "sagging-hips"),
    ],
    minor: &[
        fault("upper-body", "uneven-arm-push"),
        fault("upper-body", "shoulder-instability"),
    ],
    completion: Completion::Clean,
};

const ROTARY_RULES: RuleTable = RuleTable {
    severe: &[fault("diagonal-pattern", "unable-to-complete")],
    minor: &[
        fault("diagonal-pattern", "loss-of-balance"),
        fault("spinal-control", "excessive-rotation"),
    ],
    completion: Completion::Requires {
        positives: &[("diagonal-pattern", "smooth-controlled")],
        fallback: Score::Dysfunctional,
    },
};

const fn rules(test: MovementTest) -> &'static RuleTable {
    match test {
        MovementTest::Squat => &SQUAT_RULES,
        MovementTest::Step => &STEP_RULES,
        MovementTest::Lunge => &LUNGE_RULES,
        MovementTest::ShoulderReach => &SHOULDER_REACH_RULES,
        MovementTest::LegRaise => &LEG_RAISE_RULES,
        MovementTest::TrunkStability => &TRUNK_STABILITY_RULES,
        MovementTest::Rotary => &ROTARY_RULES,
    }
}

/// Score a single test observation.
///
/// The ladder, first match wins:
/// 1. any pain indicator scores 0 and overrides everything, manual
///    override included
/// 2. profile-wide manual override uses the entered score
/// 3. recorded fault data runs the test's rule table
/// 4. otherwise the entered score stands, defaulting to 2
pub fn score_test(
    test: MovementTest,
    observation: &TestObservation,
    manual_override: bool,
) -> Result<EffectiveScore, ValidationError> {
    if observation.pain_indicated() {
        return Ok(EffectiveScore::new(Score::Pain, Provenance::Faults));
    }
    if manual_override {
        return Ok(EffectiveScore::new(
            manual_score(test, observation)?,
            Provenance::Manual,
        ));
    }
    if observation.has_findings() {
        return Ok(EffectiveScore::new(
            evaluate(rules(test), observation),
            Provenance::Faults,
        ));
    }
    Ok(EffectiveScore::new(
        manual_score(test, observation)?,
        Provenance::Default,
    ))
}

/// Score all seven tests of a profile.
pub fn score_profile(profile: &ScreenProfile) -> Result<ScoreVector, ValidationError> {
    let mut scores = [EffectiveScore::new(Score::MAX, Provenance::Default); MovementTest::COUNT];
    for (test, observation) in profile.observations() {
        scores[test.index()] = score_test(test, observation, profile.manual_override)?;
    }
    Ok(ScoreVector::new(scores))
}

fn manual_score(test: MovementTest, observation: &TestObservation) -> Result<Score, ValidationError> {
    match observation.score {
        Some(raw) => {
            Score::try_from(raw).map_err(|_err| ValidationError::ScoreOutOfRange { test, score: raw })
        }
        None => Ok(FALLBACK_SCORE),
    }
}

fn evaluate(table: &RuleTable, observation: &TestObservation) -> Score {
    if table.severe.iter().any(|check| fires(check, observation)) {
        return Score::Dysfunctional;
    }
    if table.minor.iter().any(|check| fires(check, observation)) {
        return Score::Compensated;
    }
    match table.completion {
        Completion::Clean => Score::Optimal,
        Completion::Requires { positives, fallback } => {
            let all_present = positives
                .iter()
                .all(|&(section, observation_key)| observation.severity(section, observation_key) > 0);
            if all_present { Score::Optimal } else { fallback }
        }
    }
}

fn fires(check: &FaultCheck, observation: &TestObservation) -> bool {
    let severity = observation.severity(check.section, check.observation);
    match check.trigger {
        Trigger::Present => severity > 0,
        Trigger::Absent => severity == 0,
    }
}
