use serde::Serialize;

use crate::Level;
use crate::character::Character;
use crate::contest::{ContestMode, run_contest};
use crate::error::ChallengeError;
use crate::oracle::{BinaryOracle, OptionPair, RandomSource};

/// A single narrative obstacle testing one attribute against a threat level.
///
/// Each contest mode has its own option set: three pairs for an even match,
/// two for either advantage. Every pair maps "A" to the success text and "B"
/// to the failure text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Challenge {
    id: String,
    intro_text: String,
    test_attribute: String,
    threat: Level,
    success_next: String,
    failure_next: String,
    equal_options: Vec<OptionPair>,
    character_advantage_options: Vec<OptionPair>,
    challenge_advantage_options: Vec<OptionPair>,
}

/// Outcome of one challenge: the narrative lines and where the story goes next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub success: bool,
    pub output: Vec<String>,
    pub next: String,
    pub mode: ContestMode,
    pub rounds: u32,
}

impl Challenge {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        intro_text: impl Into<String>,
        test_attribute: impl Into<String>,
        threat: Level,
        success_next: impl Into<String>,
        failure_next: impl Into<String>,
        equal_options: Vec<OptionPair>,
        character_advantage_options: Vec<OptionPair>,
        challenge_advantage_options: Vec<OptionPair>,
    ) -> Self {
        Self {
            id: id.into(),
            intro_text: intro_text.into(),
            test_attribute: test_attribute.into(),
            threat,
            success_next: success_next.into(),
            failure_next: failure_next.into(),
            equal_options,
            character_advantage_options,
            challenge_advantage_options,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn intro_text(&self) -> &str {
        &self.intro_text
    }

    pub fn test_attribute(&self) -> &str {
        &self.test_attribute
    }

    pub fn threat(&self) -> Level {
        self.threat
    }

    pub fn success_next(&self) -> &str {
        &self.success_next
    }

    pub fn failure_next(&self) -> &str {
        &self.failure_next
    }

    pub fn equal_options(&self) -> &[OptionPair] {
        &self.equal_options
    }

    pub fn character_advantage_options(&self) -> &[OptionPair] {
        &self.character_advantage_options
    }

    pub fn challenge_advantage_options(&self) -> &[OptionPair] {
        &self.challenge_advantage_options
    }

    pub fn options_for(&self, mode: ContestMode) -> &[OptionPair] {
        match mode {
            ContestMode::Equal => &self.equal_options,
            ContestMode::CharacterAdvantage => &self.character_advantage_options,
            ContestMode::ChallengeAdvantage => &self.challenge_advantage_options,
        }
    }

    /// Run the contest for `character` and route to the next challenge.
    pub fn resolve<S: RandomSource>(
        &self,
        oracle: &mut BinaryOracle<S>,
        character: &Character,
    ) -> Result<Verdict, ChallengeError> {
        let level = character
            .level(&self.test_attribute)
            .map_err(|source| ChallengeError::MissingAttribute {
                challenge: self.id.clone(),
                source,
            })?;

        let mode = ContestMode::select(level, self.threat);
        tracing::debug!(
            challenge = %self.id,
            character = character.name(),
            attribute = %self.test_attribute,
            %level,
            threat = %self.threat,
            ?mode,
            "resolving challenge"
        );

        let contest = run_contest(oracle, self.options_for(mode), mode.thresholds())?;
        let rounds = contest.rounds();

        let mut output = Vec::with_capacity(contest.output.len() + 1);
        output.push(self.intro_text.clone());
        output.extend(contest.output);

        let next = if contest.success {
            &self.success_next
        } else {
            &self.failure_next
        };
        tracing::debug!(
            challenge = %self.id,
            success = contest.success,
            %next,
            rounds,
            "challenge resolved"
        );

        Ok(Verdict {
            success: contest.success,
            output,
            next: next.clone(),
            mode,
            rounds,
        })
    }
}
