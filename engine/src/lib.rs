use serde::Serialize;

pub mod api;
pub mod challenge;
pub mod character;
pub mod content;
pub mod contest;
pub mod error;
pub mod oracle;
pub mod pool;

pub use challenge::{Challenge, Verdict};
pub use character::Character;
pub use contest::{ContestMode, ContestResult, Thresholds, run_contest};
pub use error::{ChallengeError, CharacterError, OracleError};
pub use oracle::{
    BinaryOracle, Column, Draw, FnSource, OptionPair, RandomSource, Resolved, ScriptedSource,
    SeededSource, from_fn, option_pair,
};
pub use pool::AttributePool;

/// Binary attribute / threat level.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Level {
    High,
    Low,
}

impl Level {
    pub fn label(self) -> &'static str {
        match self {
            Level::High => "HIGH",
            Level::Low => "LOW",
        }
    }

    /// One step up; HIGH stays HIGH.
    pub fn raised(self) -> Self {
        Level::High
    }

    /// One step down; LOW stays LOW.
    pub fn lowered(self) -> Self {
        Level::Low
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raising_and_lowering_saturate() {
        assert_eq!(Level::Low.raised(), Level::High);
        assert_eq!(Level::High.raised(), Level::High);
        assert_eq!(Level::High.lowered(), Level::Low);
        assert_eq!(Level::Low.lowered(), Level::Low);
        assert_eq!(Level::High.to_string(), "HIGH");
    }
}
