//! Grammar construction errors
//!
//! Parsing itself never fails: malformed input produces a partial result.
//! The only engine-level error is a grammar author handing the builder
//! something the trie cannot represent.

use std::fmt;

/// Error raised while defining a grammar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    /// A symbol was declared with empty text
    EmptySymbol,
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarError::EmptySymbol => write!(f, "symbol text must not be empty"),
        }
    }
}

impl std::error::Error for GrammarError {}
