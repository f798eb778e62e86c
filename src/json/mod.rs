//! JSON on the shared engine
//!
//! - `language`: the grammar (modes, symbols, action table)
//! - `document`: the arena tree the grammar builds
//! - `number`: lazy numeric realization of number literals
//! - `escape`: string decoding and escaping
//! - `serialize`: minimized and expanded output
//! - `value`: conversion to `serde_json::Value`
//! - `debug`: tree dump
//!
//! ```rust
//! use modaltext::json;
//!
//! let doc = json::parse(r#"{"name": "x\"y", "n": -9223372036854775808}"#);
//! let object = doc.root().child(0).unwrap();
//! assert_eq!(object.member("name").unwrap().as_str(), Ok("x\"y"));
//! assert_eq!(object.member("n").unwrap().number().unwrap().as_i64(), Some(i64::MIN));
//! ```

pub mod debug;
pub mod document;
pub mod error;
pub mod escape;
pub mod language;
pub mod number;
pub mod serialize;
pub mod value;

use crate::engine::parallel;
use std::sync::OnceLock;

// ============================================================================
// Core exports
// ============================================================================

pub use document::{Children, JsonDocument, JsonKind, NodeId, NodeRef, NodeValue};
pub use error::JsonError;
pub use language::{JsonLanguage, JsonMode, JsonState};
pub use number::{JsonNumber, NumberClass};
pub use serialize::{Spacing, WriterConfig};

// ============================================================================
// Developer tools
// ============================================================================

pub use debug::TreePrinter;

/// The process-wide JSON grammar
pub fn language() -> &'static JsonLanguage {
    static LANGUAGE: OnceLock<JsonLanguage> = OnceLock::new();
    LANGUAGE.get_or_init(JsonLanguage::new)
}

/// Parse `text` with the shared JSON grammar
pub fn parse(text: &str) -> JsonDocument {
    language().parse(text)
}

/// Parse independent texts, in parallel with the `parallel` feature
///
/// Results are in input order.
pub fn parse_batch(inputs: &[&str]) -> Vec<JsonDocument> {
    parallel::parse_batch(language(), inputs)
}
