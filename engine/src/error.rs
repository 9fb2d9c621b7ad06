use thiserror::Error;

use crate::oracle::Draw;

/// The option mapping handed to the oracle had no key in the drawn row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    #[error("options {keys:?} do not match any label in the {draw:?} row of the oracle table")]
    Options { draw: Draw, keys: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CharacterError {
    #[error("character '{character}' has no attribute '{attribute}'")]
    UnknownAttribute { character: String, attribute: String },

    #[error("not enough available attributes: requested {requested}, pool holds {available}")]
    NotEnoughAttributes { requested: usize, available: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChallengeError {
    #[error("challenge '{challenge}' tests an attribute the character lacks")]
    MissingAttribute {
        challenge: String,
        #[source]
        source: CharacterError,
    },

    /// Malformed option content; passed through untouched.
    #[error(transparent)]
    Oracle(#[from] OracleError),
}
