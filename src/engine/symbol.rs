//! Symbols: the literal patterns a grammar registers in its trie
//!
//! A [`Symbol`] is plain data (text plus an optional classification tag).
//! Identity is assigned when the symbol is declared on a
//! [`GrammarBuilder`](super::grammar::GrammarBuilder): every declaration
//! yields a fresh [`SymbolId`], even when two declarations share the same
//! text.

use super::error::GrammarError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification tag attached to a symbol
///
/// Groups are metadata for grammar authors and tooling. Matching never
/// looks at them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SymbolGroup {
    /// Display name of the group
    pub name: &'static str,
}

impl SymbolGroup {
    /// Create a named group
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }
}

/// A literal text pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    text: String,
    group: Option<SymbolGroup>,
}

impl Symbol {
    /// Create a symbol from non-empty text
    ///
    /// # Panics
    ///
    /// Panics if `text` is empty. Use [`Symbol::try_new`] for text that is
    /// not known at definition time.
    pub fn new(text: impl Into<String>) -> Self {
        match Self::try_new(text) {
            Ok(symbol) => symbol,
            Err(e) => panic!("{}", e),
        }
    }

    /// Create a symbol, rejecting empty text
    pub fn try_new(text: impl Into<String>) -> Result<Self, GrammarError> {
        let text = text.into();
        if text.is_empty() {
            return Err(GrammarError::EmptySymbol);
        }
        Ok(Self { text, group: None })
    }

    /// Attach a classification group
    pub fn group(mut self, group: SymbolGroup) -> Self {
        self.group = Some(group);
        self
    }

    /// The literal text
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The classification group, if any
    #[inline]
    pub fn symbol_group(&self) -> Option<SymbolGroup> {
        self.group
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.text)
    }
}

/// Identity of one declared symbol instance within a grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SymbolId(pub(crate) u32);

impl SymbolId {
    /// Index of the symbol in declaration order
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDARY: SymbolGroup = SymbolGroup::new("Boundary Operator");

    #[test]
    fn test_symbol_new() {
        let s = Symbol::new("</").group(BOUNDARY);
        assert_eq!(s.text(), "</");
        assert_eq!(s.symbol_group(), Some(BOUNDARY));
    }

    #[test]
    fn test_symbol_try_new_empty() {
        assert_eq!(Symbol::try_new(""), Err(GrammarError::EmptySymbol));
    }

    #[test]
    #[should_panic(expected = "symbol text must not be empty")]
    fn test_symbol_new_empty_panics() {
        let _ = Symbol::new(String::new());
    }

    #[test]
    fn test_symbol_display() {
        assert_eq!(Symbol::new("\"").to_string(), "\"\\\"\"");
    }
}
