//! Error types for building and querying code tables.

use thiserror::Error;

/// Everything that can go wrong while building a [`CodeTable`](crate::CodeTable)
/// or asking it for a code.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The alphabet has no symbols.
    #[error("alphabet is empty")]
    EmptyAlphabet,

    /// A probability (or weight) is zero, negative, or not finite.
    #[error("invalid probability {probability} for symbol {symbol:?}")]
    InvalidProbability { symbol: String, probability: f64 },

    /// The probabilities do not add up to one.
    #[error("probabilities sum to {0}, expected 1")]
    ProbabilitySum(f64),

    /// The same symbol identifier was given more than once.
    #[error("symbol {0:?} appears more than once in the alphabet")]
    AmbiguousSymbolKey(String),

    /// The symbol is not part of the alphabet the table was built from.
    #[error("symbol {0:?} not found")]
    SymbolNotFound(String),

    /// The forest still holds more than one tree.
    #[error("forest is not finished: {0} trees remain")]
    IncompleteForest(usize),
}

/// A specialized Result type for code table operations.
pub type Result<T> = std::result::Result<T, Error>;
