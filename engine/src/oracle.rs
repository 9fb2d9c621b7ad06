use indexmap::IndexMap;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::Level;
use crate::error::OracleError;

/// One of the two discrete values a [`RandomSource`] can produce.
///
/// `First` selects row 0 of the label table (HIGH/YES/A), `Second` row 1
/// (LOW/NO/B).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Draw {
    First,
    Second,
}

impl Draw {
    pub fn index(self) -> usize {
        match self {
            Draw::First => 0,
            Draw::Second => 1,
        }
    }

    pub fn from_index(idx: usize) -> Self {
        if idx == 0 { Draw::First } else { Draw::Second }
    }
}

/// Anything that can flip the oracle's coin.
pub trait RandomSource {
    fn pick(&mut self) -> Draw;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn pick(&mut self) -> Draw {
        (**self).pick()
    }
}

/// Fair coin backed by a seeded ChaCha8 stream.
pub struct SeededSource {
    rng: ChaCha8Rng,
}

impl SeededSource {
    pub fn from_seed(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    pub fn from_entropy() -> Self {
        Self { rng: ChaCha8Rng::from_entropy() }
    }
}

impl RandomSource for SeededSource {
    fn pick(&mut self) -> Draw {
        Draw::from_index(self.rng.gen_range(0..=1))
    }
}

/// Replays a fixed list of draws, wrapping around at the end.
pub struct ScriptedSource {
    draws: Vec<Draw>,
    next: usize,
}

impl ScriptedSource {
    /// Panics if `draws` is empty.
    pub fn new(draws: Vec<Draw>) -> Self {
        assert!(!draws.is_empty(), "scripted source needs at least one draw");
        Self { draws, next: 0 }
    }

    pub fn always(draw: Draw) -> Self {
        Self::new(vec![draw])
    }

    /// How many draws have been consumed so far.
    pub fn consumed(&self) -> usize {
        self.next
    }
}

impl RandomSource for ScriptedSource {
    fn pick(&mut self) -> Draw {
        let draw = self.draws[self.next % self.draws.len()];
        self.next += 1;
        draw
    }
}

/// Adapts a closure into a [`RandomSource`].
pub struct FnSource<F>(F);

pub fn from_fn<F: FnMut() -> Draw>(f: F) -> FnSource<F> {
    FnSource(f)
}

impl<F: FnMut() -> Draw> RandomSource for FnSource<F> {
    fn pick(&mut self) -> Draw {
        (self.0)()
    }
}

/// Column of the label table to read a plain outcome from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    HighLow,
    YesNo,
    AB,
}

impl Column {
    pub fn index(self) -> usize {
        match self {
            Column::HighLow => 0,
            Column::YesNo => 1,
            Column::AB => 2,
        }
    }
}

pub const LABEL_TABLE: [[&str; 3]; 2] = [["HIGH", "YES", "A"], ["LOW", "NO", "B"]];

/// Narrative options keyed by oracle label. Iteration order is insertion order.
pub type OptionPair = IndexMap<String, String>;

/// Build the usual `{"A": success, "B": failure}` pair.
pub fn option_pair(a: impl Into<String>, b: impl Into<String>) -> OptionPair {
    IndexMap::from([("A".to_string(), a.into()), ("B".to_string(), b.into())])
}

/// The entry the oracle picked out of an [`OptionPair`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved<'a> {
    pub draw: Draw,
    pub key: &'a str,
    pub text: &'a str,
}

impl Resolved<'_> {
    /// Row 0 (HIGH/YES/A) counts as a success.
    pub fn is_success(&self) -> bool {
        self.draw == Draw::First
    }
}

pub struct BinaryOracle<S> {
    source: S,
}

impl<S: RandomSource> BinaryOracle<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn label_table() -> &'static [[&'static str; 3]; 2] {
        &LABEL_TABLE
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Plain HIGH/LOW, YES/NO or A/B answer.
    pub fn pick(&mut self, column: Column) -> &'static str {
        LABEL_TABLE[self.source.pick().index()][column.index()]
    }

    pub fn pick_level(&mut self) -> Level {
        match self.source.pick() {
            Draw::First => Level::High,
            Draw::Second => Level::Low,
        }
    }

    /// Draw one row and return the first option (in insertion order) whose
    /// key names a label in that row, compared case-insensitively.
    pub fn resolve_outcome<'a>(
        &mut self,
        options: &'a OptionPair,
    ) -> Result<Resolved<'a>, OracleError> {
        let draw = self.source.pick();
        let row = &LABEL_TABLE[draw.index()];
        options
            .iter()
            .find(|(key, _)| row.iter().any(|label| label.eq_ignore_ascii_case(key)))
            .map(|(key, text)| Resolved { draw, key: key.as_str(), text: text.as_str() })
            .ok_or_else(|| OracleError::Options {
                draw,
                keys: options.keys().cloned().collect(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_source_wraps() {
        let mut src = ScriptedSource::new(vec![Draw::First, Draw::Second]);
        let seen: Vec<_> = (0..4).map(|_| src.pick()).collect();
        assert_eq!(seen, vec![Draw::First, Draw::Second, Draw::First, Draw::Second]);
        assert_eq!(src.consumed(), 4);
    }

    #[test]
    fn seeded_source_is_deterministic() {
        let mut a = SeededSource::from_seed(7);
        let mut b = SeededSource::from_seed(7);
        for _ in 0..32 {
            assert_eq!(a.pick(), b.pick());
        }
    }
}
