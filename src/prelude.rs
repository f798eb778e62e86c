//! Prelude module for convenient imports
//!
//! Importing this module with a wildcard import brings the core types into
//! scope:
//!
//! ```
//! use modaltext::prelude::*;
//! ```
//!
//! # Re-exported Items
//!
//! ## Engine
//! - [`GrammarBuilder`] - Builder for constructing grammars
//! - [`Grammar`] - Immutable grammar (trie + action table)
//! - [`ParseContext`] - What actions see during a parse
//! - [`Symbol`] - Literal pattern
//! - [`Mode`] - Trait for parser mode types
//! - [`Language`] - A notation with a parse entry point
//!
//! ## JSON
//! - [`JsonDocument`] - Parsed JSON document
//! - [`NodeRef`] - Borrowed view of a document node
//! - [`JsonKind`] - Node kind
//! - [`WriterConfig`] - Serializer configuration
//!
//! ## Errors
//! - [`GrammarError`] - Grammar definition error
//! - [`JsonError`] - Document access error

// ============================================================================
// Engine
// ============================================================================

pub use crate::engine::{
    Grammar, GrammarBuilder, Language, Mode, ParseContext, Span, SpanKind, Symbol, SymbolGroup,
    SymbolId,
};

// ============================================================================
// JSON
// ============================================================================

pub use crate::json::{
    JsonDocument, JsonKind, JsonLanguage, JsonMode, NodeId, NodeRef, Spacing, WriterConfig,
};

// ============================================================================
// Errors
// ============================================================================

pub use crate::engine::GrammarError;
pub use crate::json::JsonError;
