use serde::Serialize;

use crate::Level;
use crate::error::OracleError;
use crate::oracle::{BinaryOracle, OptionPair, RandomSource};

/// How the character's level compares to the challenge's threat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContestMode {
    /// Levels match: best two out of three.
    Equal,
    /// HIGH vs LOW threat: one success in two is enough.
    CharacterAdvantage,
    /// LOW vs HIGH threat: any failure loses.
    ChallengeAdvantage,
}

impl ContestMode {
    pub fn select(level: Level, threat: Level) -> Self {
        if level == threat {
            ContestMode::Equal
        } else if level == Level::High {
            ContestMode::CharacterAdvantage
        } else {
            ContestMode::ChallengeAdvantage
        }
    }

    pub fn thresholds(self) -> Thresholds {
        match self {
            ContestMode::Equal => Thresholds { success: 2, failure: 2 },
            ContestMode::CharacterAdvantage => Thresholds { success: 1, failure: 2 },
            ContestMode::ChallengeAdvantage => Thresholds { success: 2, failure: 1 },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub success: u32,
    pub failure: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContestResult {
    pub success: bool,
    pub output: Vec<String>,
    pub successes: u32,
    pub failures: u32,
}

impl ContestResult {
    pub fn rounds(&self) -> u32 {
        self.successes + self.failures
    }
}

/// Play `options` in order, one oracle draw per pair, until either tally
/// reaches its threshold.
///
/// If the option set runs out first, `success` stays false.
pub fn run_contest<S: RandomSource>(
    oracle: &mut BinaryOracle<S>,
    options: &[OptionPair],
    thresholds: Thresholds,
) -> Result<ContestResult, OracleError> {
    let mut res = ContestResult {
        success: false,
        output: Vec::with_capacity(options.len()),
        successes: 0,
        failures: 0,
    };

    for pair in options {
        let outcome = oracle.resolve_outcome(pair)?;
        res.output.push(outcome.text.to_string());
        if outcome.is_success() {
            res.successes += 1;
        } else {
            res.failures += 1;
        }
        tracing::trace!(
            round = res.rounds(),
            key = outcome.key,
            successes = res.successes,
            failures = res.failures,
            "contest round"
        );

        if res.successes >= thresholds.success {
            res.success = true;
            return Ok(res);
        }
        if res.failures >= thresholds.failure {
            return Ok(res);
        }
    }

    tracing::warn!(
        rounds = res.rounds(),
        ?thresholds,
        "option set exhausted before either threshold was reached"
    );
    Ok(res)
}
