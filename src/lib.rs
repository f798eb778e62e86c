//! modaltext - mode-gated symbol recognition for text notations
//!
//! A notation is described as a set of literal symbols, a closed set of
//! parser modes and a table of semantic actions keyed by `(symbol, mode)`.
//! One shared engine scans the text once, recognizes the longest symbol
//! visible in the current mode, and hands every piece of the text to the
//! grammar's actions, which build the document.
//!
//! It provides:
//! - A mode-gated multi-pattern trie with longest-match search
//! - Gap-free span sequencing (recognized symbols and the text between them)
//! - A pushdown driver with a mode stack and span extension
//! - A complete JSON grammar with an arena document model
//! - Minimized and expanded JSON serialization
//! - Developer tools (parse tracing, grammar description)
//!
//! ## Quick Start
//!
//! ```rust
//! use modaltext::json::{self, JsonKind};
//!
//! let doc = json::parse(r#"{"a":1,"b":[true,false,null]}"#);
//! let root = doc.root();
//! assert_eq!(root.len(), Ok(1));
//!
//! let object = root.child(0).unwrap();
//! assert_eq!(object.kind(), JsonKind::Object);
//! assert_eq!(object.child(0).unwrap().name(), Some("a"));
//!
//! assert_eq!(doc.to_string(), r#"{"a":1,"b":[true,false,null]}"#);
//! ```
//!
//! ## Defining a Grammar
//!
//! ```rust
//! use modaltext::engine::{GrammarBuilder, Symbol};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Mode {
//!     Text,
//!     Comment,
//! }
//!
//! let mut builder = GrammarBuilder::<Mode, usize>::new("comments", Mode::Text);
//! let open = builder.symbol(Symbol::new("/*"));
//! let close = builder.symbol(Symbol::new("*/"));
//! builder
//!     .bind(open, Mode::Text, |ctx| ctx.push_mode(Mode::Comment))
//!     .bind(close, Mode::Comment, |ctx| {
//!         ctx.pop_mode();
//!         *ctx.state_mut() += 1;
//!     });
//! let grammar = builder.build();
//!
//! assert_eq!(grammar.parse_with("a /* b */ c /* d */", 0), 2);
//! ```
//!
//! ## Feature Flags
//!
//! - `logging` - Enable debug logging using the `log` crate
//! - `parallel` - Parse batches of inputs on rayon's thread pool

// Lint configuration for production quality
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all)]
#![allow(clippy::new_without_default)]
#![allow(clippy::module_inception)]

/// Logging macros - no-ops unless the `logging` feature is enabled
#[cfg(not(feature = "logging"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "logging")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "logging"))]
macro_rules! log_trace {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "logging")]
macro_rules! log_trace {
    ($($arg:tt)*) => { log::trace!($($arg)*) };
}

// Prelude module for convenient imports
pub mod prelude;

// The grammar-independent engine
pub mod engine;

// The JSON grammar, document model and serializer
pub mod json;

/// Re-export commonly used types for convenience
pub use engine::{
    Grammar, GrammarBuilder, GrammarError, Language, Mode, ParseContext, Span, SpanKind, Symbol,
    SymbolGroup, SymbolId,
};
pub use json::{JsonDocument, JsonError, JsonKind, NodeId, NodeRef};
