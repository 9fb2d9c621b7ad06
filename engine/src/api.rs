use std::collections::BTreeMap;

use anyhow::{Context, Result, bail};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::challenge::{Challenge, Verdict};
use crate::character::Character;
use crate::content::default_attributes;
use crate::contest::ContestMode;
use crate::error::ChallengeError;
use crate::oracle::{BinaryOracle, SeededSource};
use crate::pool::AttributePool;

const DEFAULT_CHARACTER_NAME: &str = "Brian";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct SessionConfig {
    /// Fixed seed for reproducible sessions; fresh entropy when absent.
    pub seed: Option<u64>,
    pub character_name: String,
    pub attributes: Vec<String>,
    /// How many attributes the character samples; the whole pool when absent.
    pub attribute_count: Option<usize>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            character_name: DEFAULT_CHARACTER_NAME.to_string(),
            attributes: default_attributes().into_iter().map(String::from).collect(),
            attribute_count: None,
        }
    }
}

impl SessionConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("failed to parse session config JSON")
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes = attributes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_attribute_count(mut self, count: usize) -> Self {
        self.attribute_count = Some(count);
        self
    }

    pub fn pool(&self) -> AttributePool {
        AttributePool::with_names(self.attributes.iter().cloned())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionResult {
    pub character: Character,
    pub verdict: Verdict,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SimulationStats {
    pub samples: u32,
    pub successes: u32,
    pub failures: u32,
    /// Trials whose character never sampled the tested attribute.
    pub missing_attribute: u32,
    pub by_mode: BTreeMap<String, u32>,
}

impl SimulationStats {
    pub fn success_rate(&self) -> f64 {
        if self.samples == 0 {
            0.0
        } else {
            self.successes as f64 / self.samples as f64
        }
    }
}

/// Attribute sampler and oracle source for one session.
///
/// With a seed, the oracle runs on `seed + 1` so the two streams stay apart.
pub fn session_streams(seed: Option<u64>) -> (ChaCha8Rng, SeededSource) {
    match seed {
        Some(seed) => (
            ChaCha8Rng::seed_from_u64(seed),
            SeededSource::from_seed(seed.wrapping_add(1)),
        ),
        None => (ChaCha8Rng::from_entropy(), SeededSource::from_entropy()),
    }
}

fn prepare(cfg: &SessionConfig) -> Result<(Character, BinaryOracle<SeededSource>)> {
    let pool = cfg.pool();
    if pool.is_empty() {
        bail!("session config lists no attributes");
    }
    let count = cfg.attribute_count.unwrap_or(pool.len());

    let (mut sampler, source) = session_streams(cfg.seed);
    let mut oracle = BinaryOracle::new(source);

    let character = Character::generate_with_rng(
        &mut oracle,
        &pool,
        cfg.character_name.as_str(),
        count,
        &mut sampler,
    )
    .with_context(|| format!("failed to generate character '{}'", cfg.character_name))?;

    Ok((character, oracle))
}

/// Build a pool and character from `cfg`, then resolve `challenge` once.
pub fn run_session(cfg: &SessionConfig, challenge: &Challenge) -> Result<SessionResult> {
    let (character, mut oracle) = prepare(cfg)?;
    let verdict = challenge
        .resolve(&mut oracle, &character)
        .with_context(|| format!("failed to resolve challenge '{}'", challenge.id()))?;

    Ok(SessionResult { character, verdict })
}

/// Run `samples` independent sessions; trial `i` uses seed `base + i`.
///
/// When the config samples fewer attributes than the pool holds, some
/// characters lack the tested attribute; those trials land in
/// `missing_attribute` instead of aborting the run.
pub fn simulate_many(
    cfg: &SessionConfig,
    challenge: &Challenge,
    samples: u32,
) -> Result<SimulationStats> {
    let base = cfg.seed.unwrap_or_default();
    let mut stats = SimulationStats::default();

    for i in 0..samples {
        let trial = cfg.clone().with_seed(base.wrapping_add(i as u64));
        let (character, mut oracle) = prepare(&trial)?;
        stats.samples += 1;

        let verdict = match challenge.resolve(&mut oracle, &character) {
            Ok(verdict) => verdict,
            Err(ChallengeError::MissingAttribute { .. }) => {
                stats.missing_attribute += 1;
                continue;
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to resolve challenge '{}'", challenge.id()));
            }
        };

        if verdict.success {
            stats.successes += 1;
        } else {
            stats.failures += 1;
        }
        *stats.by_mode.entry(mode_key(verdict.mode).to_string()).or_default() += 1;
    }

    tracing::info!(
        challenge = challenge.id(),
        samples = stats.samples,
        successes = stats.successes,
        missing_attribute = stats.missing_attribute,
        "simulation finished"
    );
    Ok(stats)
}

fn mode_key(mode: ContestMode) -> &'static str {
    match mode {
        ContestMode::Equal => "equal",
        ContestMode::CharacterAdvantage => "character_advantage",
        ContestMode::ChallengeAdvantage => "challenge_advantage",
    }
}
