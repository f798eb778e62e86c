//! Developer tools
//!
//! - Parse tracing: every span the driver dispatched, with the mode it was
//!   dispatched under and what happened to it
//! - Grammar visualization: the binding table as text and the trie as a
//!   GraphViz DOT diagram

use super::grammar::Grammar;
use super::span::{Span, SpanKind};
use super::trie::{Mode, TrieNodeId};
use std::fmt::Write;

/// What the driver did with a span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceAction {
    /// Handed to the intermediate handler
    Intermediate,
    /// A bound action ran
    Fired,
    /// A match with no action in the current mode
    Unbound,
}

/// A single trace entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceEntry<M: Mode> {
    /// Mode at dispatch time
    pub mode: M,
    /// The span, including any extension applied by the action
    pub span: Span,
    /// What happened
    pub action: TraceAction,
}

/// Record of one parse
#[derive(Debug, Clone)]
pub struct ParseTrace<M: Mode> {
    entries: Vec<TraceEntry<M>>,
}

impl<M: Mode> ParseTrace<M> {
    /// Create a new empty trace
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add an entry
    pub fn record(&mut self, entry: TraceEntry<M>) {
        self.entries.push(entry);
    }

    /// Entries in dispatch order
    pub fn entries(&self) -> &[TraceEntry<M>] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was dispatched
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Concatenated text of all dispatched spans
    ///
    /// For a complete parse this reproduces the input.
    pub fn covered_text(&self, input: &str) -> String {
        self.entries.iter().map(|e| e.span.text(input)).collect()
    }

    /// Format as a readable listing, one span per line
    pub fn format<S>(&self, grammar: &Grammar<M, S>, input: &str) -> String {
        let mut output = String::new();
        for entry in &self.entries {
            let what = match entry.span.kind {
                SpanKind::Intermediate => "text".to_string(),
                SpanKind::Match { symbol, .. } => grammar
                    .symbol(symbol)
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| format!("{:?}", symbol)),
            };
            let mode = format!("{:?}", entry.mode);
            let _ = writeln!(
                output,
                "{:>6}..{:<6} {:<24} {:<10} {:?} {:?}",
                entry.span.start,
                entry.span.next_index(),
                mode,
                what,
                entry.action,
                entry.span.text(input)
            );
        }
        output
    }
}

impl<M: Mode> Default for ParseTrace<M> {
    fn default() -> Self {
        Self::new()
    }
}

/// Grammar visualizer
pub struct GrammarVisualizer<'a, M: Mode, S> {
    grammar: &'a Grammar<M, S>,
}

impl<'a, M: Mode, S> GrammarVisualizer<'a, M, S> {
    /// Create a new grammar visualizer
    pub fn new(grammar: &'a Grammar<M, S>) -> Self {
        Self { grammar }
    }

    /// The binding table, one `symbol: modes` line per declared symbol
    ///
    /// Modes are listed in `Debug` order so output is stable.
    pub fn describe(&self) -> String {
        let mut output = String::new();
        let stats = self.grammar.stats();
        let _ = writeln!(
            output,
            "grammar {:?} (start {:?}): {} symbols, {} bindings, {} trie nodes",
            self.grammar.name(),
            self.grammar.start_mode(),
            stats.symbols,
            stats.bindings,
            stats.trie_nodes
        );

        for (id, symbol) in self.grammar.symbols() {
            let mut modes: Vec<String> = match self.grammar.trie().waypoint_of(id) {
                Some(node) => self
                    .grammar
                    .bindings()
                    .filter(|(n, _)| *n == node)
                    .map(|(_, mode)| format!("{:?}", mode))
                    .collect(),
                None => Vec::new(),
            };
            modes.sort();
            let group = symbol
                .symbol_group()
                .map(|g| format!(" [{}]", g.name))
                .unwrap_or_default();
            let _ = writeln!(output, "  {}{}: {}", symbol, group, modes.join(", "));
        }
        output
    }

    /// Generate a GraphViz DOT diagram of the trie
    pub fn to_dot(&self) -> String {
        let trie = self.grammar.trie();
        let mut output = String::new();
        output.push_str("digraph Trie {\n");
        output.push_str("  node [shape=circle];\n");

        for i in 0..trie.node_count() {
            let id = TrieNodeId::from_index(i);
            let node = trie.node(id);
            let label = match node.ch() {
                Some(c) => format!("{:?}", c),
                None => "root".to_string(),
            };
            let shape = if node.is_waypoint() {
                ", shape=doublecircle"
            } else {
                ""
            };
            let _ = writeln!(output, "  n{} [label={:?}{}]", i, label, shape);
            for child in node.children() {
                let _ = writeln!(output, "  n{} -> n{}", i, child.index());
            }
        }

        output.push_str("}\n");
        output
    }
}
