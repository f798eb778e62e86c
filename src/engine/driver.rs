//! The parse driver
//!
//! The driver walks a text once, left to right. At every step it asks the
//! trie for the next spans under the current mode, then dispatches them:
//! intermediate spans go to the grammar's intermediate handler, matches go
//! to the action bound to `(path, current mode)`. Matches without a binding
//! in the current mode are skipped. Scanning resumes at the end of the
//! dispatched span, including whatever the action chose to swallow.
//!
//! Parsing never fails. Malformed input yields whatever state the actions
//! built before the text ran out.
//!
//! The mode stack is never empty: the start mode stays at the bottom and
//! attempts to pop it are refused.

use super::debug::{ParseTrace, TraceAction, TraceEntry};
use super::grammar::Grammar;
use super::span::{Span, SpanKind};
use super::trie::Mode;

/// Per-parse state shared with actions
pub struct ParseContext<'t, M: Mode, S> {
    text: &'t str,
    modes: Vec<M>,
    cursor: usize,
    span: Span,
    state: S,
}

impl<'t, M: Mode, S> ParseContext<'t, M, S> {
    /// Create a context positioned at the start of `text`
    pub fn new(text: &'t str, start: M, state: S) -> Self {
        Self {
            text,
            modes: vec![start],
            cursor: 0,
            span: Span::intermediate(0, 0),
            state,
        }
    }

    /// The whole input
    #[inline]
    pub fn text(&self) -> &'t str {
        self.text
    }

    /// Current mode (top of the stack)
    #[inline]
    pub fn mode(&self) -> M {
        self.modes[self.modes.len() - 1]
    }

    /// Enter a mode
    #[inline]
    pub fn push_mode(&mut self, mode: M) {
        self.modes.push(mode);
    }

    /// Leave the current mode
    ///
    /// Returns `None` and keeps the stack unchanged when only the start mode
    /// is left.
    pub fn pop_mode(&mut self) -> Option<M> {
        if self.modes.len() == 1 {
            log_debug!("refusing to pop base mode {:?}", self.modes[0]);
            return None;
        }
        self.modes.pop()
    }

    /// Replace the current mode with `mode`, returning the one replaced
    pub fn replace_mode(&mut self, mode: M) -> M {
        let top = self.modes.len() - 1;
        std::mem::replace(&mut self.modes[top], mode)
    }

    /// Mode stack depth
    #[inline]
    pub fn depth(&self) -> usize {
        self.modes.len()
    }

    /// The mode stack, bottom first
    #[inline]
    pub fn modes(&self) -> &[M] {
        &self.modes
    }

    /// The span being dispatched
    #[inline]
    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Text covered by the span being dispatched
    #[inline]
    pub fn span_text(&self) -> &'t str {
        self.span.text(self.text)
    }

    /// Swallow the next `chars` characters after the current span
    ///
    /// Stops at the end of the input. Returns the number of bytes added.
    pub fn extend_span(&mut self, chars: usize) -> usize {
        let from = self.span.next_index().min(self.text.len());
        let bytes = self.text[from..]
            .chars()
            .take(chars)
            .map(char::len_utf8)
            .sum();
        self.span.extend += bytes;
        bytes
    }

    /// Slice of the input between two byte offsets, clamped to the input
    pub fn slice(&self, start: usize, end: usize) -> &'t str {
        let end = end.min(self.text.len());
        self.text.get(start.min(end)..end).unwrap_or("")
    }

    /// Offset where the span being dispatched starts
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Grammar state
    #[inline]
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Grammar state, mutably
    #[inline]
    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    /// Consume the context and return the grammar state
    pub fn into_state(self) -> S {
        self.state
    }
}

/// Parse `text` with `grammar`, returning the final state
pub fn run<M: Mode, S>(grammar: &Grammar<M, S>, text: &str, state: S) -> S {
    let mut ctx = ParseContext::new(text, grammar.start_mode(), state);
    drive(grammar, &mut ctx, |_, _, _| {});
    ctx.into_state()
}

/// Parse `text` with `grammar`, recording every dispatched span
pub fn run_traced<M: Mode, S>(grammar: &Grammar<M, S>, text: &str, state: S) -> (S, ParseTrace<M>) {
    let mut ctx = ParseContext::new(text, grammar.start_mode(), state);
    let mut trace = ParseTrace::new();
    drive(grammar, &mut ctx, |mode, span, action| {
        trace.record(TraceEntry { mode, span, action });
    });
    (ctx.into_state(), trace)
}

fn drive<M: Mode, S>(
    grammar: &Grammar<M, S>,
    ctx: &mut ParseContext<'_, M, S>,
    mut observe: impl FnMut(M, Span, TraceAction),
) {
    let len = ctx.text.len();
    log_debug!("parsing {} bytes with grammar {:?}", len, grammar.name());

    while ctx.cursor < len {
        let step = grammar
            .trie()
            .next_spans(ctx.text, ctx.cursor, Some(ctx.mode()));
        if step.is_empty() {
            break;
        }
        for span in step {
            ctx.span = span;
            ctx.cursor = span.start;
            let mode = ctx.mode();
            log_trace!("{:?} {:?} at {}..{}", mode, span.kind, span.start, span.next_index());
            let action = match span.kind {
                SpanKind::Intermediate => {
                    (grammar.intermediate_action())(ctx);
                    TraceAction::Intermediate
                }
                SpanKind::Match { node, symbol: _symbol } => match grammar.action(node, mode) {
                    Some(action) => {
                        action(ctx);
                        TraceAction::Fired
                    }
                    None => {
                        log_trace!("no action for {:?} in {:?}", _symbol, mode);
                        TraceAction::Unbound
                    }
                },
            };
            observe(mode, ctx.span, action);
            ctx.cursor = ctx.span.next_index();
        }
    }

    log_debug!("finished with mode stack depth {}", ctx.depth());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{GrammarBuilder, Symbol};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum M {
        Code,
        Quote,
    }

    /// Collects quoted strings; `\` swallows the next character
    fn quotes() -> Grammar<M, (Vec<String>, usize)> {
        let mut b = GrammarBuilder::<M, (Vec<String>, usize)>::new("quotes", M::Code);
        let quote = b.symbol(Symbol::new("\""));
        let escape = b.symbol(Symbol::new("\\"));
        b.bind(quote, M::Code, |ctx| {
            ctx.push_mode(M::Quote);
            let start = ctx.span().next_index();
            ctx.state_mut().1 = start;
        })
        .bind(quote, M::Quote, |ctx| {
            ctx.pop_mode();
            let text = ctx.slice(ctx.state().1, ctx.span().start).to_string();
            ctx.state_mut().0.push(text);
        })
        .bind(escape, M::Quote, |ctx| {
            ctx.extend_span(1);
        });
        b.build()
    }

    #[test]
    fn test_run_collects_quotes() {
        let (found, _) = run(&quotes(), r#"a "b" c "d\"e" f"#, (Vec::new(), 0));
        assert_eq!(found, vec!["b", r#"d\"e"#]);
    }

    #[test]
    fn test_unbound_match_is_skipped() {
        // `\` outside quotes has no action and is passed over
        let (found, _) = run(&quotes(), r#"\"x""#, (Vec::new(), 0));
        assert_eq!(found, vec!["x"]);
    }

    #[test]
    fn test_unterminated_input_is_partial() {
        let (found, _) = run(&quotes(), r#""done" "open"#, (Vec::new(), 0));
        assert_eq!(found, vec!["done"]);
    }

    #[test]
    fn test_empty_input() {
        let (found, _) = run(&quotes(), "", (Vec::new(), 0));
        assert!(found.is_empty());
    }

    #[test]
    fn test_base_mode_is_never_popped() {
        let mut b = GrammarBuilder::<M, usize>::new("stop", M::Code);
        let bang = b.symbol(Symbol::new("!"));
        b.bind(bang, M::Code, |ctx| {
            if ctx.pop_mode().is_none() {
                *ctx.state_mut() += 1;
            }
        });
        let g = b.build();
        assert_eq!(run(&g, "a!b!c", 0), 2);
    }

    #[test]
    fn test_extend_span_stops_at_end() {
        let mut ctx = ParseContext::new("ab", M::Code, ());
        ctx.span = Span::intermediate(0, 1);
        assert_eq!(ctx.extend_span(5), 1);
        assert_eq!(ctx.span().next_index(), 2);
        assert_eq!(ctx.extend_span(1), 0);
    }

    #[test]
    fn test_extend_span_multibyte() {
        let mut ctx = ParseContext::new("\\é!", M::Code, ());
        ctx.span = Span::intermediate(0, 1);
        assert_eq!(ctx.extend_span(1), 2);
        assert_eq!(ctx.span_text(), "\\é");
    }

    #[test]
    fn test_mode_stack_operations() {
        let mut ctx = ParseContext::new("", M::Code, ());
        ctx.push_mode(M::Quote);
        assert_eq!(ctx.depth(), 2);
        assert_eq!(ctx.replace_mode(M::Code), M::Quote);
        assert_eq!(ctx.modes(), &[M::Code, M::Code]);
        assert_eq!(ctx.pop_mode(), Some(M::Code));
        assert_eq!(ctx.pop_mode(), None);
        assert_eq!(ctx.mode(), M::Code);
        assert_eq!(ctx.depth(), 1);
    }

    #[test]
    fn test_trace_covers_input() {
        let text = r#"x "a\"b" y"#;
        let (_, trace) = run_traced(&quotes(), text, (Vec::new(), 0));
        assert_eq!(trace.covered_text(text), text);
        assert!(trace.entries().iter().any(|e| e.action == TraceAction::Fired));
    }
}
