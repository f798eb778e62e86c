//! Mode-gated multi-pattern trie
//!
//! Symbols are stored as character paths from a charless root. The node
//! terminating a symbol's path is a *waypoint*; it records the canonical
//! symbol for that path and the set of modes in which the path is an active
//! match candidate.
//!
//! # Registration rules
//!
//! - Registering the same symbol instance again for a mode it already holds
//!   changes nothing.
//! - Registering a *different* instance with identical text reuses the
//!   existing path. The newer instance becomes the canonical symbol of the
//!   waypoint while the mode set keeps accumulating.
//!
//! # Search
//!
//! [`Trie::find_from`] scans positions left to right. At each position it
//! walks the trie as far as the input allows, collecting every waypoint
//! active in the current mode. The first position with at least one such
//! waypoint wins and the longest one is reported. A longer path that is not
//! active in the mode is invisible, so a shorter visible waypoint on the
//! same path is reported instead.

use super::span::SpanStep;
use super::symbol::SymbolId;
use ahash::AHashSet;
use hashbrown::HashMap;
use std::fmt;
use std::hash::Hash;

/// A parser mode
///
/// Each grammar has a closed, finite mode space known at definition time,
/// so modes are small copyable values (normally a fieldless enum) used
/// directly as set and map keys.
pub trait Mode: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {}

impl<T> Mode for T where T: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {}

/// Index of a node in a [`Trie`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrieNodeId(u32);

impl TrieNodeId {
    /// The charless root
    pub const ROOT: TrieNodeId = TrieNodeId(0);

    /// Position of the node in the trie arena
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Id of the node at `index` in the trie arena
    #[inline]
    pub fn from_index(index: usize) -> Self {
        TrieNodeId(index as u32)
    }
}

/// One node of the trie
#[derive(Debug, Clone)]
pub struct TrieNode<M: Mode> {
    ch: Option<char>,
    children: HashMap<char, TrieNodeId>,
    waypoint: bool,
    symbol: Option<SymbolId>,
    modes: AHashSet<M>,
}

impl<M: Mode> TrieNode<M> {
    fn new(ch: Option<char>) -> Self {
        Self {
            ch,
            children: HashMap::new(),
            waypoint: false,
            symbol: None,
            modes: AHashSet::new(),
        }
    }

    /// The character on the edge into this node (`None` for the root)
    #[inline]
    pub fn ch(&self) -> Option<char> {
        self.ch
    }

    /// Whether a registered symbol ends here
    #[inline]
    pub fn is_waypoint(&self) -> bool {
        self.waypoint
    }

    /// Canonical symbol of this path (last registered instance)
    #[inline]
    pub fn symbol(&self) -> Option<SymbolId> {
        self.symbol
    }

    /// Whether the symbol ending here is a candidate in `mode`
    #[inline]
    pub fn is_active_in(&self, mode: M) -> bool {
        self.waypoint && self.modes.contains(&mode)
    }

    /// Modes in which this waypoint is active
    pub fn modes(&self) -> impl Iterator<Item = &M> {
        self.modes.iter()
    }

    /// Number of child transitions
    #[inline]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Child nodes, in no particular order
    pub fn children(&self) -> impl Iterator<Item = TrieNodeId> + '_ {
        self.children.values().copied()
    }
}

/// A mode-visible waypoint reached during a search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrieHit {
    /// Terminal node of the matched path
    pub node: TrieNodeId,
    /// Canonical symbol at that node
    pub symbol: SymbolId,
    /// Bytes of input consumed by the path
    pub len: usize,
}

/// Result of a successful search
///
/// `hits` is a stack in walk order: every visible waypoint found at
/// `start`, shortest first. The top is the longest match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrieMatch {
    /// Byte offset where the matching symbols start
    pub start: usize,
    /// Visible waypoints, shortest first
    pub hits: Vec<TrieHit>,
}

impl TrieMatch {
    /// The longest visible match
    #[inline]
    pub fn longest(&self) -> Option<TrieHit> {
        self.hits.last().copied()
    }
}

/// Prefix tree over registered symbols
#[derive(Clone)]
pub struct Trie<M: Mode> {
    nodes: Vec<TrieNode<M>>,
    registered: HashMap<SymbolId, TrieNodeId>,
    resolver: fn(char) -> char,
}

fn identity(c: char) -> char {
    c
}

impl<M: Mode> Trie<M> {
    /// Create an empty trie with only the root
    pub fn new() -> Self {
        Self::with_resolver(identity)
    }

    /// Create an empty trie whose characters pass through `resolver`
    ///
    /// The resolver is applied to symbol text on registration and to input
    /// characters on lookup, e.g. ASCII lowercasing for a case-insensitive
    /// notation.
    pub fn with_resolver(resolver: fn(char) -> char) -> Self {
        Self {
            nodes: vec![TrieNode::new(None)],
            registered: HashMap::new(),
            resolver,
        }
    }

    /// Register `symbol` (with the given text) as active in `mode`
    ///
    /// Returns the waypoint node. See the module docs for the rules on
    /// repeated and same-text registrations.
    pub fn insert(&mut self, symbol: SymbolId, text: &str, mode: M) -> TrieNodeId {
        let node = match self.registered.get(&symbol) {
            Some(&node) => node,
            None => {
                let node = self.walk_or_extend(text);
                let terminal = &mut self.nodes[node.index()];
                if terminal.symbol.is_some() {
                    log_debug!("symbol {:?} takes over path {:?}", symbol, text);
                }
                terminal.symbol = Some(symbol);
                terminal.waypoint = true;
                self.registered.insert(symbol, node);
                node
            }
        };
        self.nodes[node.index()].modes.insert(mode);
        node
    }

    fn walk_or_extend(&mut self, text: &str) -> TrieNodeId {
        let mut current = TrieNodeId::ROOT;
        for c in text.chars() {
            let c = (self.resolver)(c);
            current = match self.nodes[current.index()].children.get(&c) {
                Some(&next) => next,
                None => {
                    let next = TrieNodeId(self.nodes.len() as u32);
                    self.nodes.push(TrieNode::new(Some(c)));
                    self.nodes[current.index()].children.insert(c, next);
                    next
                }
            };
        }
        current
    }

    /// Follow the transition for `c` out of `node`
    #[inline]
    pub fn child(&self, node: TrieNodeId, c: char) -> Option<TrieNodeId> {
        self.nodes[node.index()]
            .children
            .get(&(self.resolver)(c))
            .copied()
    }

    /// Look up a node
    #[inline]
    pub fn node(&self, id: TrieNodeId) -> &TrieNode<M> {
        &self.nodes[id.index()]
    }

    /// Waypoint registered for a symbol instance
    #[inline]
    pub fn waypoint_of(&self, symbol: SymbolId) -> Option<TrieNodeId> {
        self.registered.get(&symbol).copied()
    }

    /// Total number of nodes, root included
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of waypoint nodes
    pub fn waypoint_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.waypoint).count()
    }

    /// Find the next mode-visible symbol at or after `start`
    ///
    /// `start` must lie on a character boundary of `text`. A missing mode
    /// never matches.
    pub fn find_from(&self, text: &str, start: usize, mode: Option<M>) -> Option<TrieMatch> {
        let mode = mode?;
        let rest = text.get(start..)?;
        let mut hits = Vec::new();

        for (offset, _) in rest.char_indices() {
            let at = start + offset;
            let mut node = TrieNodeId::ROOT;
            for (walked, c) in text[at..].char_indices() {
                node = match self.child(node, c) {
                    Some(next) => next,
                    None => break,
                };
                let current = &self.nodes[node.index()];
                if let (true, Some(symbol)) = (current.is_active_in(mode), current.symbol) {
                    hits.push(TrieHit {
                        node,
                        symbol,
                        len: walked + c.len_utf8(),
                    });
                }
            }
            if !hits.is_empty() {
                return Some(TrieMatch { start: at, hits });
            }
        }
        None
    }

    /// Sequence the spans following `from` under `mode`
    ///
    /// See [`SpanStep`] for the shapes this can take.
    #[inline]
    pub fn next_spans(&self, text: &str, from: usize, mode: Option<M>) -> SpanStep {
        SpanStep::from_search(self.find_from(text, from, mode), from, text.len())
    }
}

impl<M: Mode> Default for Trie<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Mode> fmt::Debug for Trie<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trie")
            .field("nodes", &self.nodes.len())
            .field("symbols", &self.registered.len())
            .finish()
    }
}
