//! Mode-driven symbol recognition engine
//!
//! A grammar is a set of literal symbols, a closed set of modes and a table
//! of actions keyed by `(symbol path, mode)`. The driver scans the text
//! once, recognizing the longest symbol visible in the current mode at the
//! earliest position, and hands every piece of the text (recognized or not)
//! to the grammar's actions. Actions own all semantics: they push and pop
//! modes, swallow extra characters and build whatever state the grammar
//! produces.
//!
//! ## Modules
//!
//! - `symbol`: literal patterns and their identities
//! - `trie`: the mode-gated prefix tree and its search
//! - `span`: the match/intermediate spans the driver dispatches
//! - `grammar`: grammar construction and the action table
//! - `driver`: the parse loop and the context actions see
//! - `debug`: parse tracing and grammar visualization
//! - `parallel`: batch parsing over a shared grammar

pub mod debug;
pub mod driver;
pub mod error;
pub mod grammar;
pub mod parallel;
pub mod span;
pub mod symbol;
pub mod trie;

// ============================================================================
// Core exports
// ============================================================================

pub use driver::{run, run_traced, ParseContext};
pub use error::GrammarError;
pub use grammar::{Action, Grammar, GrammarBuilder, GrammarStats, Language};
pub use span::{Span, SpanKind, SpanStep, Spans};
pub use symbol::{Symbol, SymbolGroup, SymbolId};
pub use trie::{Mode, Trie, TrieHit, TrieMatch, TrieNode, TrieNodeId};

// ============================================================================
// Developer tools
// ============================================================================

pub use debug::{GrammarVisualizer, ParseTrace, TraceAction, TraceEntry};
pub use parallel::{parse_batch, parse_batch_owned};
