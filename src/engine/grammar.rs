//! Grammars: trie + action table + initial mode
//!
//! A [`Grammar`] is produced once by a [`GrammarBuilder`] and is immutable
//! afterwards. It is `Send + Sync`, so one instance can drive any number of
//! independent parses, including concurrent ones.
//!
//! # Example
//!
//! ```rust
//! use modaltext::engine::{GrammarBuilder, Symbol};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Mode {
//!     Text,
//!     Tag,
//! }
//!
//! let mut builder = GrammarBuilder::<Mode, Vec<String>>::new("tags", Mode::Text);
//! let open = builder.symbol(Symbol::new("<"));
//! let close = builder.symbol(Symbol::new(">"));
//! builder
//!     .bind(open, Mode::Text, |ctx| ctx.push_mode(Mode::Tag))
//!     .bind(close, Mode::Tag, |ctx| {
//!         ctx.pop_mode();
//!     })
//!     .intermediate(|ctx| {
//!         if ctx.mode() == Mode::Tag {
//!             let name = ctx.span_text().to_string();
//!             ctx.state_mut().push(name);
//!         }
//!     });
//! let grammar = builder.build();
//!
//! let tags = grammar.parse_with("a<b>c<d>", Vec::new());
//! assert_eq!(tags, vec!["b", "d"]);
//! ```

use super::driver::{self, ParseContext};
use super::symbol::{Symbol, SymbolId};
use super::trie::{Mode, Trie, TrieNodeId};
use ahash::AHashSet;
use hashbrown::HashMap;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// A semantic action invoked by the driver
///
/// Actions receive the whole parse context: they may read the current span,
/// extend it, push or pop modes and mutate the grammar's state.
pub type Action<M, S> = Arc<dyn Fn(&mut ParseContext<'_, M, S>) + Send + Sync>;

/// A notation with a parse entry point
pub trait Language: Sync {
    /// The parse product
    type Document: Send;

    /// Parse a complete, memory-resident text
    fn parse(&self, text: &str) -> Self::Document;
}

/// Size summary of a grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GrammarStats {
    /// Declared symbol instances
    pub symbols: usize,
    /// Trie nodes, root included
    pub trie_nodes: usize,
    /// Trie nodes terminating a symbol
    pub waypoints: usize,
    /// (symbol path, mode) -> action entries
    pub bindings: usize,
    /// Distinct modes mentioned by bindings or as the start mode
    pub modes: usize,
}

/// An immutable grammar
pub struct Grammar<M: Mode, S> {
    name: String,
    trie: Trie<M>,
    symbols: Vec<Symbol>,
    actions: HashMap<(TrieNodeId, M), Action<M, S>>,
    intermediate: Action<M, S>,
    start: M,
}

impl<M: Mode, S> Grammar<M, S> {
    /// Grammar name
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The symbol trie
    #[inline]
    pub fn trie(&self) -> &Trie<M> {
        &self.trie
    }

    /// Mode the mode stack starts with
    #[inline]
    pub fn start_mode(&self) -> M {
        self.start
    }

    /// Look up a declared symbol
    #[inline]
    pub fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.index())
    }

    /// All declared symbols in declaration order
    pub fn symbols(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(i, s)| (SymbolId(i as u32), s))
    }

    /// Action bound to a trie path in a mode
    #[inline]
    pub fn action(&self, node: TrieNodeId, mode: M) -> Option<&Action<M, S>> {
        self.actions.get(&(node, mode))
    }

    /// Whether a symbol's path has an action in `mode`
    pub fn is_bound(&self, symbol: SymbolId, mode: M) -> bool {
        self.trie
            .waypoint_of(symbol)
            .is_some_and(|node| self.actions.contains_key(&(node, mode)))
    }

    /// The shared handler for unrecognized text
    #[inline]
    pub fn intermediate_action(&self) -> &Action<M, S> {
        &self.intermediate
    }

    /// All bindings as `(node, mode)` keys
    pub fn bindings(&self) -> impl Iterator<Item = (TrieNodeId, M)> + '_ {
        self.actions.keys().copied()
    }

    /// Summarize the grammar's size
    pub fn stats(&self) -> GrammarStats {
        let mut modes: AHashSet<M> = self.actions.keys().map(|(_, mode)| *mode).collect();
        modes.insert(self.start);
        GrammarStats {
            symbols: self.symbols.len(),
            trie_nodes: self.trie.node_count(),
            waypoints: self.trie.waypoint_count(),
            bindings: self.actions.len(),
            modes: modes.len(),
        }
    }

    /// Run the driver over `text` starting from `state`
    pub fn parse_with(&self, text: &str, state: S) -> S {
        driver::run(self, text, state)
    }
}

impl<M: Mode, S> fmt::Debug for Grammar<M, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grammar")
            .field("name", &self.name)
            .field("start", &self.start)
            .field("symbols", &self.symbols.len())
            .field("bindings", &self.actions.len())
            .finish()
    }
}

/// Builder for constructing grammars
pub struct GrammarBuilder<M: Mode, S> {
    name: String,
    trie: Trie<M>,
    symbols: Vec<Symbol>,
    actions: HashMap<(TrieNodeId, M), Action<M, S>>,
    intermediate: Option<Action<M, S>>,
    start: M,
}

impl<M: Mode, S> GrammarBuilder<M, S> {
    /// Create a builder for a grammar starting in `start`
    pub fn new(name: impl Into<String>, start: M) -> Self {
        Self {
            name: name.into(),
            trie: Trie::new(),
            symbols: Vec::new(),
            actions: HashMap::new(),
            intermediate: None,
            start,
        }
    }

    /// Pass every character through `resolver` when matching
    ///
    /// Must be called before any symbol is bound.
    pub fn resolver(mut self, resolver: fn(char) -> char) -> Self {
        debug_assert!(
            self.actions.is_empty(),
            "resolver must be set before binding symbols"
        );
        self.trie = Trie::with_resolver(resolver);
        self
    }

    /// Match symbols ASCII case-insensitively
    pub fn case_insensitive(self) -> Self {
        self.resolver(|c| c.to_ascii_lowercase())
    }

    /// Declare a symbol instance
    ///
    /// Every call yields a new identity, even for text declared before.
    pub fn symbol(&mut self, symbol: Symbol) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(symbol);
        id
    }

    /// Bind an action to a symbol in one mode
    pub fn bind<F>(&mut self, symbol: SymbolId, mode: M, action: F) -> &mut Self
    where
        F: Fn(&mut ParseContext<'_, M, S>) + Send + Sync + 'static,
    {
        self.bind_action(symbol, mode, Arc::new(action))
    }

    /// Bind one action to a symbol in several modes
    pub fn bind_modes<F>(&mut self, symbol: SymbolId, modes: &[M], action: F) -> &mut Self
    where
        F: Fn(&mut ParseContext<'_, M, S>) + Send + Sync + 'static,
    {
        let action: Action<M, S> = Arc::new(action);
        for &mode in modes {
            self.bind_action(symbol, mode, Arc::clone(&action));
        }
        self
    }

    /// Bind one action to several symbols in one mode
    pub fn bind_symbols<F>(&mut self, mode: M, symbols: &[SymbolId], action: F) -> &mut Self
    where
        F: Fn(&mut ParseContext<'_, M, S>) + Send + Sync + 'static,
    {
        let action: Action<M, S> = Arc::new(action);
        for &symbol in symbols {
            self.bind_action(symbol, mode, Arc::clone(&action));
        }
        self
    }

    /// Register `symbol` for `mode` in the trie and record the action
    ///
    /// Binding a path again in the same mode replaces the action.
    pub fn bind_action(&mut self, symbol: SymbolId, mode: M, action: Action<M, S>) -> &mut Self {
        let Some(text) = self.symbols.get(symbol.index()).map(Symbol::text) else {
            log_debug!("ignoring binding for undeclared symbol {:?}", symbol);
            return self;
        };
        let node = self.trie.insert(symbol, text, mode);
        self.actions.insert((node, mode), action);
        self
    }

    /// Set the handler for unrecognized text
    pub fn intermediate<F>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(&mut ParseContext<'_, M, S>) + Send + Sync + 'static,
    {
        self.intermediate = Some(Arc::new(handler));
        self
    }

    /// Build the final grammar
    pub fn build(self) -> Grammar<M, S> {
        Grammar {
            name: self.name,
            trie: self.trie,
            symbols: self.symbols,
            actions: self.actions,
            intermediate: self.intermediate.unwrap_or_else(|| Arc::new(|_| {})),
            start: self.start,
        }
    }
}
