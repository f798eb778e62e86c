//! Spans: the uniform unit the driver dispatches
//!
//! A trie search yields either a recognized symbol occurrence or nothing.
//! Span sequencing turns that into an ordered, gap-free run of spans:
//! raw text the trie did not recognize becomes an `Intermediate` span, a
//! recognized symbol becomes a `Match` span. Both expose the same
//! `(start, len, next_index)` shape.
//!
//! All offsets are byte offsets into the UTF-8 input and fall on character
//! boundaries.

use super::symbol::SymbolId;
use super::trie::{Mode, Trie, TrieMatch, TrieNodeId};

/// What a span represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    /// A mode-visible symbol occurrence
    Match {
        /// Canonical symbol of the matched trie path
        symbol: SymbolId,
        /// Terminal trie node of the match (the action table key)
        node: TrieNodeId,
    },
    /// A run of text no mode-visible symbol starts in
    Intermediate,
}

/// A contiguous piece of input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Byte offset of the first character
    pub start: usize,
    /// Byte length as found by the search
    pub len: usize,
    /// Extra bytes swallowed by an action after the span was found
    pub extend: usize,
    /// Match or intermediate
    pub kind: SpanKind,
}

impl Span {
    /// Create a match span
    #[inline]
    pub fn matched(symbol: SymbolId, node: TrieNodeId, start: usize, len: usize) -> Self {
        Self {
            start,
            len,
            extend: 0,
            kind: SpanKind::Match { symbol, node },
        }
    }

    /// Create an intermediate span
    #[inline]
    pub fn intermediate(start: usize, len: usize) -> Self {
        Self {
            start,
            len,
            extend: 0,
            kind: SpanKind::Intermediate,
        }
    }

    /// Offset where scanning resumes after this span
    #[inline]
    pub fn next_index(&self) -> usize {
        self.start + self.len + self.extend
    }

    /// Whether this span is a recognized symbol
    #[inline]
    pub fn is_match(&self) -> bool {
        matches!(self.kind, SpanKind::Match { .. })
    }

    /// Whether this span is raw text
    #[inline]
    pub fn is_intermediate(&self) -> bool {
        matches!(self.kind, SpanKind::Intermediate)
    }

    /// Matched symbol, if this is a match
    #[inline]
    pub fn symbol(&self) -> Option<SymbolId> {
        match self.kind {
            SpanKind::Match { symbol, .. } => Some(symbol),
            SpanKind::Intermediate => None,
        }
    }

    /// The covered text, clamped to the input
    pub fn text<'t>(&self, input: &'t str) -> &'t str {
        let end = self.next_index().min(input.len());
        &input[self.start.min(end)..end]
    }
}

/// The spans produced by one sequencing step
///
/// Either `[match]`, `[intermediate, match]`, `[intermediate]` (the
/// remainder once nothing else matches) or empty (nothing left to cover).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpanStep {
    /// Unrecognized text before the match, or the final remainder
    pub gap: Option<Span>,
    /// The match itself
    pub hit: Option<Span>,
}

impl SpanStep {
    /// Sequence a search result found while scanning from `from`
    ///
    /// `from` is both where the search began and where the previous span
    /// ended, so any text between it and the match start is a gap.
    pub fn from_search(found: Option<TrieMatch>, from: usize, text_len: usize) -> Self {
        match found.and_then(|m| m.longest().map(|hit| (m.start, hit))) {
            Some((start, hit)) => {
                let gap = (start > from).then(|| Span::intermediate(from, start - from));
                Self {
                    gap,
                    hit: Some(Span::matched(hit.symbol, hit.node, start, hit.len)),
                }
            }
            None => Self {
                gap: (text_len > from).then(|| Span::intermediate(from, text_len - from)),
                hit: None,
            },
        }
    }

    /// Number of spans in this step
    pub fn len(&self) -> usize {
        usize::from(self.gap.is_some()) + usize::from(self.hit.is_some())
    }

    /// Whether the step produced nothing
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl IntoIterator for SpanStep {
    type Item = Span;
    type IntoIter = std::iter::Chain<std::option::IntoIter<Span>, std::option::IntoIter<Span>>;

    fn into_iter(self) -> Self::IntoIter {
        self.gap.into_iter().chain(self.hit)
    }
}

/// Iterator over the spans of a whole text under one fixed mode
///
/// The driver interleaves sequencing with mode changes; this iterator is
/// the mode-stable view, useful for tokenizing and for inspecting a trie.
pub struct Spans<'a, 't, M: Mode> {
    trie: &'a Trie<M>,
    text: &'t str,
    mode: M,
    pos: usize,
    pending: Option<Span>,
}

impl<'a, 't, M: Mode> Spans<'a, 't, M> {
    /// Start iterating at the beginning of `text`
    pub fn new(trie: &'a Trie<M>, text: &'t str, mode: M) -> Self {
        Self {
            trie,
            text,
            mode,
            pos: 0,
            pending: None,
        }
    }
}

impl<M: Mode> Iterator for Spans<'_, '_, M> {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        if let Some(span) = self.pending.take() {
            self.pos = span.next_index();
            return Some(span);
        }
        if self.pos >= self.text.len() {
            return None;
        }
        let step = self.trie.next_spans(self.text, self.pos, Some(self.mode));
        let (first, second) = match (step.gap, step.hit) {
            (Some(gap), hit) => (gap, hit),
            (None, Some(hit)) => (hit, None),
            (None, None) => return None,
        };
        self.pending = second;
        self.pos = first.next_index();
        Some(first)
    }
}
