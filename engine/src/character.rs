use indexmap::IndexMap;
use rand::Rng;
use rand::seq::index;
use serde::Serialize;

use crate::Level;
use crate::error::CharacterError;
use crate::oracle::{BinaryOracle, RandomSource};
use crate::pool::AttributePool;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Character {
    name: String,
    attributes: IndexMap<String, Level>,
    points: i64,
}

impl Character {
    /// Sample `count` distinct attributes from `pool` and let the oracle
    /// decide each starting level.
    pub fn generate<S: RandomSource>(
        oracle: &mut BinaryOracle<S>,
        pool: &AttributePool,
        name: impl Into<String>,
        count: usize,
    ) -> Result<Self, CharacterError> {
        Self::generate_with_rng(oracle, pool, name, count, &mut rand::thread_rng())
    }

    /// Like [`Character::generate`], with the attribute sampling driven by `rng`.
    pub fn generate_with_rng<S: RandomSource, R: Rng + ?Sized>(
        oracle: &mut BinaryOracle<S>,
        pool: &AttributePool,
        name: impl Into<String>,
        count: usize,
        rng: &mut R,
    ) -> Result<Self, CharacterError> {
        let mut character = Self {
            name: name.into(),
            attributes: IndexMap::new(),
            points: 0,
        };
        character.top_up_attributes_with_rng(oracle, pool, count, rng)?;
        Ok(character)
    }

    /// Add randomly chosen attributes the character does not have yet until
    /// it holds `count` of them. Existing attributes keep their levels.
    pub fn top_up_attributes<S: RandomSource>(
        &mut self,
        oracle: &mut BinaryOracle<S>,
        pool: &AttributePool,
        count: usize,
    ) -> Result<(), CharacterError> {
        self.top_up_attributes_with_rng(oracle, pool, count, &mut rand::thread_rng())
    }

    pub fn top_up_attributes_with_rng<S: RandomSource, R: Rng + ?Sized>(
        &mut self,
        oracle: &mut BinaryOracle<S>,
        pool: &AttributePool,
        count: usize,
        rng: &mut R,
    ) -> Result<(), CharacterError> {
        if count > pool.len() {
            return Err(CharacterError::NotEnoughAttributes {
                requested: count,
                available: pool.len(),
            });
        }

        let candidates: Vec<&str> = pool
            .iter()
            .filter(|name| !self.attributes.contains_key(*name))
            .collect();
        let wanted = count.saturating_sub(self.attributes.len()).min(candidates.len());

        for idx in index::sample(rng, candidates.len(), wanted) {
            let attribute = candidates[idx];
            let level = oracle.pick_level();
            tracing::debug!(character = %self.name, %attribute, %level, "rolled attribute");
            self.attributes.insert(attribute.to_string(), level);
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &IndexMap<String, Level> {
        &self.attributes
    }

    pub fn points(&self) -> i64 {
        self.points
    }

    pub fn level(&self, attribute: &str) -> Result<Level, CharacterError> {
        self.attributes
            .get(attribute)
            .copied()
            .ok_or_else(|| self.unknown(attribute))
    }

    /// LOW → HIGH. Returns false if the attribute was already HIGH.
    pub fn increment_attribute(&mut self, attribute: &str) -> Result<bool, CharacterError> {
        self.shift_attribute(attribute, Level::raised)
    }

    /// HIGH → LOW. Returns false if the attribute was already LOW.
    pub fn decrement_attribute(&mut self, attribute: &str) -> Result<bool, CharacterError> {
        self.shift_attribute(attribute, Level::lowered)
    }

    fn shift_attribute(
        &mut self,
        attribute: &str,
        step: fn(Level) -> Level,
    ) -> Result<bool, CharacterError> {
        let Some(level) = self.attributes.get_mut(attribute) else {
            return Err(self.unknown(attribute));
        };
        let shifted = step(*level);
        if shifted == *level {
            return Ok(false);
        }
        *level = shifted;
        Ok(true)
    }

    /// Unclamped; a negative delta can push the total below zero.
    pub fn increment_points(&mut self, delta: i64) -> i64 {
        self.points += delta;
        self.points
    }

    /// Spending never takes the total below zero.
    pub fn decrement_points(&mut self, delta: i64) -> i64 {
        self.points = (self.points - delta).max(0);
        self.points
    }

    fn unknown(&self, attribute: &str) -> CharacterError {
        CharacterError::UnknownAttribute {
            character: self.name.clone(),
            attribute: attribute.to_string(),
        }
    }
}
