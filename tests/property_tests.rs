//! Property-based tests using proptest
//!
//! These tests check parser and serializer behavior across a wide range of
//! generated inputs.

use modaltext::json::{self, escape};
use proptest::prelude::*;
use serde_json::{Map, Value};

/// Arbitrary JSON values without floats
fn json_value() -> impl Strategy<Value = Value> {
    let text = "[a-zA-Z0-9 \"\\\\/\n\t{}:,çé€😀\\[\\]]{0,8}";
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        text.prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 48, 6, move |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec((text, inner), 0..6)
                .prop_map(|members| Value::Object(members.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

// =============================================================================
// Document Round Trips
// =============================================================================

proptest! {
    /// Text written by serde_json reads back as the same value
    #[test]
    fn test_parse_matches_serde(value in json_value()) {
        let text = serde_json::to_string(&value).unwrap();
        let doc = json::parse(&text);
        prop_assert_eq!(doc.to_value().unwrap(), value);
    }

    /// Pretty-printed input builds the same document as compact input
    #[test]
    fn test_whitespace_is_insignificant(value in json_value()) {
        let compact = json::parse(&serde_json::to_string(&value).unwrap());
        let pretty = json::parse(&serde_json::to_string_pretty(&value).unwrap());
        prop_assert_eq!(compact, pretty);
    }

    /// Minimized and expanded output both re-parse to the same document
    #[test]
    fn test_serialized_output_reparses(value in json_value()) {
        let doc = json::parse(&serde_json::to_string(&value).unwrap());
        prop_assert_eq!(&json::parse(&doc.to_string()), &doc);
        prop_assert_eq!(&json::parse(&doc.to_expanded_string()), &doc);
    }

    /// Several top-level values each read back independently
    #[test]
    fn test_top_level_sequence_matches_serde(
        values in prop::collection::vec(json_value(), 1..4),
        separator in prop_oneof![Just(" "), Just("\n")],
    ) {
        let text = values
            .iter()
            .map(|v| serde_json::to_string(v).unwrap())
            .collect::<Vec<_>>()
            .join(separator);
        let doc = json::parse(&text);
        let root = doc.root();
        prop_assert_eq!(root.len(), Ok(values.len()));
        for (i, value) in values.iter().enumerate() {
            prop_assert_eq!(&root.child(i).unwrap().to_value().unwrap(), value);
        }
        prop_assert_eq!(&json::parse(&doc.to_string()), &doc);
        prop_assert_eq!(&json::parse(&doc.to_expanded_string()), &doc);
    }
}

// =============================================================================
// Driver Coverage
// =============================================================================

proptest! {
    /// Every byte of arbitrary input is dispatched exactly once, in order
    #[test]
    fn test_trace_covers_input(text in "[ -~é€\n]{0,40}") {
        let (_, trace) = json::language().parse_traced(&text);
        prop_assert_eq!(trace.covered_text(&text), text.clone());

        let mut cursor = 0;
        for entry in trace.entries() {
            prop_assert_eq!(entry.span.start, cursor);
            cursor = entry.span.next_index();
        }
        prop_assert_eq!(cursor, text.len());
    }
}

// =============================================================================
// String Escapes
// =============================================================================

proptest! {
    /// Escaping then decoding is the identity
    #[test]
    fn test_escape_decode(s in any::<String>()) {
        let escaped = escape::escape(&s);
        prop_assert_eq!(escape::decode(&escaped).into_owned(), s);
    }

    /// Text without backslashes decodes to itself
    #[test]
    fn test_decode_plain(s in "[^\\\\]{0,32}") {
        prop_assert_eq!(escape::decode(&s).into_owned(), s);
    }
}
