//! The JSON grammar
//!
//! JSON is described entirely as a table of `(symbol, mode) -> action`
//! entries over the shared engine. Structural characters drive a mode
//! stack; the text between them is never tokenized. Instead actions record
//! byte bookmarks (where a name or value starts and ends) and slice the
//! input when a value is complete.
//!
//! | symbol | mode | action |
//! |--------|------|--------|
//! | `{` | Start, BeginArray, Colon, Comma, ObjectValueRead | open object |
//! | `}` | BeginObject, EndObject, EndArray | close object |
//! | `}` | Comma | add pending value, close object |
//! | `}` | StringValueComplete | add pending value, pop, close object |
//! | `}` | ObjectValueRead | pop, add bare literal unless added, close object |
//! | `[` | Start, BeginArray, Colon, Comma, ObjectValueRead | open array |
//! | `]` | BeginArray | add pending element unless added, close array |
//! | `]` | EndArray | close array |
//! | `]` | Comma, StringValueComplete | add pending value, close array |
//! | `"` | BeginObject | start a member name |
//! | `"` | Start, BeginArray, Colon, Comma, ObjectValueRead | start a string value |
//! | `"` | StringKeyRead | finish the name, expect `:` |
//! | `"` | StringValueRead | pop, add the string |
//! | `\"` | StringKeyRead, StringValueRead | nothing (consumed as a unit) |
//! | `\` | StringKeyRead, StringValueRead | swallow one more character |
//! | `:` | StringKeyComplete | expect a member value |
//! | `,` | ObjectValueRead | pop, add bare literal unless added |
//! | `,` | StringValueComplete | add pending value, pop |
//! | `,` | BeginArray | add pending element unless added, start the next |
//!
//! EndObject, EndArray, Colon, Comma and StringValueComplete are never
//! entered by any action; their rows are kept so the table stays complete
//! for grammars that extend this one.
//!
//! Raw text outside any container (mode Start) is split on whitespace and
//! every piece becomes a top-level bare literal, so `1 2 3` parses into
//! three numbers.

use super::document::{JsonDocument, JsonKind, NodeId, NodeValue};
use super::escape;
use crate::engine::debug::ParseTrace;
use crate::engine::{driver, Grammar, GrammarBuilder, Language, ParseContext, Symbol, SymbolGroup};

/// Structural characters
pub const BOUNDARY_GROUP: SymbolGroup = SymbolGroup::new("Boundary Operator");
/// Characters that only matter inside strings
pub const TEXT_GROUP: SymbolGroup = SymbolGroup::new("Text Operator");

/// Parser modes of the JSON grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonMode {
    /// Outside any value
    Start,
    /// Inside `{`, expecting a member name or `}`
    BeginObject,
    /// After an object closed
    EndObject,
    /// Inside `[`, reading elements
    BeginArray,
    /// After an array closed
    EndArray,
    /// Inside a member name
    StringKeyRead,
    /// After a member name, expecting `:`
    StringKeyComplete,
    /// Inside a string value
    StringValueRead,
    /// After a string value
    StringValueComplete,
    /// After `:`, reading a member value
    ObjectValueRead,
    /// After `:`
    Colon,
    /// After `,`
    Comma,
}

/// How the pending value is materialized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    /// A quoted string, decoded
    String,
    /// A bare literal: null, bool or number
    Literal,
}

/// Parse state threaded through the JSON actions
#[derive(Debug)]
pub struct JsonState {
    document: JsonDocument,
    node: NodeId,
    name_start: usize,
    node_name: Option<String>,
    value_start: usize,
    value_end: usize,
    pending: Pending,
    value_already_added: bool,
}

impl JsonState {
    fn new() -> Self {
        Self {
            document: JsonDocument::new(),
            node: NodeId::ROOT,
            name_start: 0,
            node_name: None,
            value_start: 0,
            value_end: 0,
            pending: Pending::Literal,
            value_already_added: false,
        }
    }

    /// The document built so far
    pub fn document(&self) -> &JsonDocument {
        &self.document
    }

    /// Consume the state, returning the document
    pub fn into_document(self) -> JsonDocument {
        self.document
    }

    /// Append a child to the current node; object children get the
    /// pending member name
    fn add(&mut self, value: NodeValue) -> Option<NodeId> {
        let in_object = self
            .document
            .get(self.node)
            .map(|n| n.kind() == JsonKind::Object)
            .unwrap_or(false);
        let name = if in_object {
            self.node_name.clone()
        } else {
            None
        };
        match self.document.add_child(self.node, name, value) {
            Ok(id) => Some(id),
            Err(_e) => {
                log_debug!("dropping value: {}", _e);
                None
            }
        }
    }

    fn ascend(&mut self) {
        match self.document.get(self.node).ok().and_then(|n| n.parent()) {
            Some(parent) => self.node = parent.id(),
            None => {
                log_debug!("close bracket at the document root");
            }
        }
    }
}

type Ctx<'c, 't> = &'c mut ParseContext<'t, JsonMode, JsonState>;

/// Bare literal to node value; `None` for blank text
fn literal_value(raw: &str) -> Option<NodeValue> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let value = if trimmed.eq_ignore_ascii_case("null") {
        NodeValue::Unknown(trimmed.to_string())
    } else if trimmed.eq_ignore_ascii_case("true") {
        NodeValue::Bool(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        NodeValue::Bool(false)
    } else {
        NodeValue::Number(trimmed.to_string())
    };
    Some(value)
}

fn open(ctx: Ctx<'_, '_>, mode: JsonMode, value: NodeValue) {
    ctx.push_mode(mode);
    let next = ctx.span().next_index();
    let state = ctx.state_mut();
    if let Some(id) = state.add(value) {
        state.node = id;
    }
    state.value_start = next;
    state.value_already_added = false;
}

fn open_object(ctx: Ctx<'_, '_>) {
    open(ctx, JsonMode::BeginObject, NodeValue::Object);
}

fn open_array(ctx: Ctx<'_, '_>) {
    open(ctx, JsonMode::BeginArray, NodeValue::Array);
}

/// Leave the current container
fn close(ctx: Ctx<'_, '_>) {
    ctx.pop_mode();
    let state = ctx.state_mut();
    state.ascend();
    state.value_already_added = true;
}

/// Materialize the bookmarked value into the current node
fn add_value(ctx: Ctx<'_, '_>) {
    let (start, end) = (ctx.state().value_start, ctx.state().value_end);
    let raw = ctx.slice(start, end);
    let state = ctx.state_mut();
    let value = match state.pending {
        Pending::String => Some(NodeValue::String(escape::decode(raw).into_owned())),
        Pending::Literal => literal_value(raw),
    };
    match value {
        Some(value) => {
            state.add(value);
            state.pending = Pending::Literal;
        }
        None => {
            log_trace!("blank literal at {}..{}", start, end);
        }
    }
}

/// Bookmark the end of a bare literal at the current match and add it
fn add_literal(ctx: Ctx<'_, '_>) {
    let end = ctx.span().start;
    let state = ctx.state_mut();
    state.pending = Pending::Literal;
    state.value_end = end;
    add_value(ctx);
}

/// Close the pending element of an array (at `,` or `]`)
fn finish_element(ctx: Ctx<'_, '_>) {
    let end = ctx.span().start;
    ctx.state_mut().value_end = end;
    if !ctx.state().value_already_added {
        add_value(ctx);
    }
}

fn start_value_string(ctx: Ctx<'_, '_>) {
    ctx.push_mode(JsonMode::StringValueRead);
    let next = ctx.span().next_index();
    ctx.state_mut().value_start = next;
}

fn build_grammar() -> Grammar<JsonMode, JsonState> {
    use JsonMode::*;

    let mut b = GrammarBuilder::new("JSON", Start);
    let open_brace = b.symbol(Symbol::new("{").group(BOUNDARY_GROUP));
    let close_brace = b.symbol(Symbol::new("}").group(BOUNDARY_GROUP));
    let open_bracket = b.symbol(Symbol::new("[").group(BOUNDARY_GROUP));
    let close_bracket = b.symbol(Symbol::new("]").group(BOUNDARY_GROUP));
    let quote = b.symbol(Symbol::new("\"").group(TEXT_GROUP));
    let backslash = b.symbol(Symbol::new("\\").group(TEXT_GROUP));
    let escaped_quote = b.symbol(Symbol::new("\\\"").group(TEXT_GROUP));
    let colon = b.symbol(Symbol::new(":").group(BOUNDARY_GROUP));
    let comma = b.symbol(Symbol::new(",").group(BOUNDARY_GROUP));

    let value_modes = [Start, BeginArray, Colon, Comma, ObjectValueRead];

    // Objects
    b.bind_modes(open_brace, &value_modes, open_object);
    b.bind_modes(close_brace, &[BeginObject, EndObject, EndArray], close);
    b.bind(close_brace, Comma, |ctx| {
        add_value(ctx);
        close(ctx);
    });
    b.bind(close_brace, StringValueComplete, |ctx| {
        add_value(ctx);
        ctx.pop_mode();
        close(ctx);
    });
    b.bind(close_brace, ObjectValueRead, |ctx| {
        ctx.pop_mode();
        if ctx.state().value_already_added {
            ctx.state_mut().value_already_added = false;
        } else {
            add_literal(ctx);
        }
        close(ctx);
    });

    // Arrays
    b.bind_modes(open_bracket, &value_modes, open_array);
    b.bind(close_bracket, BeginArray, |ctx| {
        finish_element(ctx);
        close(ctx);
    });
    b.bind(close_bracket, EndArray, close);
    b.bind_modes(close_bracket, &[Comma, StringValueComplete], |ctx| {
        add_value(ctx);
        close(ctx);
    });

    // Strings
    b.bind(quote, BeginObject, |ctx| {
        ctx.push_mode(StringKeyRead);
        let next = ctx.span().next_index();
        ctx.state_mut().name_start = next;
    });
    b.bind_modes(quote, &value_modes, start_value_string);
    b.bind(quote, StringKeyRead, |ctx| {
        let raw = ctx.slice(ctx.state().name_start, ctx.span().start);
        ctx.state_mut().node_name = Some(escape::decode(raw).into_owned());
        ctx.replace_mode(StringKeyComplete);
    });
    b.bind(quote, StringValueRead, |ctx| {
        ctx.pop_mode();
        let end = ctx.span().start;
        let state = ctx.state_mut();
        state.value_end = end;
        state.pending = Pending::String;
        add_value(ctx);
        ctx.state_mut().value_already_added = true;
    });
    b.bind_modes(escaped_quote, &[StringKeyRead, StringValueRead], |_| {});
    b.bind_modes(backslash, &[StringKeyRead, StringValueRead], |ctx| {
        ctx.extend_span(1);
    });

    // Separators
    b.bind(colon, StringKeyComplete, |ctx| {
        ctx.replace_mode(ObjectValueRead);
        let next = ctx.span().next_index();
        ctx.state_mut().value_start = next;
    });
    b.bind(comma, ObjectValueRead, |ctx| {
        ctx.pop_mode();
        if ctx.state().value_already_added {
            ctx.state_mut().value_already_added = false;
        } else {
            add_literal(ctx);
        }
    });
    b.bind(comma, StringValueComplete, |ctx| {
        add_value(ctx);
        ctx.pop_mode();
    });
    b.bind(comma, BeginArray, |ctx| {
        finish_element(ctx);
        let next = ctx.span().next_index();
        let state = ctx.state_mut();
        state.value_already_added = false;
        state.value_start = next;
    });

    b.intermediate(|ctx| {
        if ctx.mode() != Start {
            return;
        }
        let text = ctx.span_text();
        let state = ctx.state_mut();
        for piece in text.split_whitespace() {
            if let Some(value) = literal_value(piece) {
                state.add(value);
            }
        }
    });

    b.build()
}

/// The JSON notation
pub struct JsonLanguage {
    grammar: Grammar<JsonMode, JsonState>,
}

impl JsonLanguage {
    /// Build the JSON grammar
    pub fn new() -> Self {
        Self {
            grammar: build_grammar(),
        }
    }

    /// The underlying grammar
    pub fn grammar(&self) -> &Grammar<JsonMode, JsonState> {
        &self.grammar
    }

    /// Parse `text` into a document
    ///
    /// Never fails: malformed input yields the part of the document built
    /// before the text ran out.
    pub fn parse(&self, text: &str) -> JsonDocument {
        self.grammar
            .parse_with(text, JsonState::new())
            .into_document()
    }

    /// Parse `text`, also returning the driver's trace
    pub fn parse_traced(&self, text: &str) -> (JsonDocument, ParseTrace<JsonMode>) {
        let (state, trace) = driver::run_traced(&self.grammar, text, JsonState::new());
        (state.into_document(), trace)
    }
}

impl Default for JsonLanguage {
    fn default() -> Self {
        Self::new()
    }
}

impl Language for JsonLanguage {
    type Document = JsonDocument;

    fn parse(&self, text: &str) -> JsonDocument {
        JsonLanguage::parse(self, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> JsonDocument {
        JsonLanguage::new().parse(text)
    }

    #[test]
    fn test_literal_value() {
        assert_eq!(literal_value("  "), None);
        assert_eq!(literal_value(" NULL "), Some(NodeValue::Unknown("NULL".into())));
        assert_eq!(literal_value("True"), Some(NodeValue::Bool(true)));
        assert_eq!(literal_value("false"), Some(NodeValue::Bool(false)));
        assert_eq!(literal_value(" -1.5e3\n"), Some(NodeValue::Number("-1.5e3".into())));
        assert_eq!(literal_value("nope"), Some(NodeValue::Number("nope".into())));
    }

    #[test]
    fn test_object_members() {
        let doc = parse(r#"{"a": 1, "b": "two", "c": null, "d": true}"#);
        let obj = doc.root().child(0).unwrap();
        assert_eq!(obj.kind(), JsonKind::Object);
        assert_eq!(obj.len(), Ok(4));
        assert_eq!(obj.member("a").unwrap().literal(), Ok("1"));
        assert_eq!(obj.member("b").unwrap().as_str(), Ok("two"));
        assert_eq!(obj.member("c").unwrap().kind(), JsonKind::Unknown);
        assert_eq!(obj.member("d").unwrap().as_bool(), Ok(true));
    }

    #[test]
    fn test_array_elements_are_unnamed() {
        let doc = parse(r#"{"list": [1, "x", {"k": 2}, []]}"#);
        let list = doc.root().child(0).unwrap().member("list").unwrap();
        assert_eq!(list.kind(), JsonKind::Array);
        assert_eq!(list.len(), Ok(4));
        for child in list.children().unwrap() {
            assert_eq!(child.name(), None);
        }
        assert_eq!(list.child(2).unwrap().member("k").unwrap().literal(), Ok("2"));
        assert_eq!(list.child(3).unwrap().is_empty(), Ok(true));
    }

    #[test]
    fn test_empty_and_single_element_containers() {
        let doc = parse(r#"[[], [1], {}, ["s"]]"#);
        let outer = doc.root().child(0).unwrap();
        let lens: Vec<_> = outer.children().unwrap().map(|c| c.len().unwrap()).collect();
        assert_eq!(lens, vec![0, 1, 0, 1]);
        assert_eq!(outer.child(3).unwrap().child(0).unwrap().as_str(), Ok("s"));
    }

    #[test]
    fn test_nested_objects() {
        let doc = parse(r#"{"a": {"b": {"c": 1}}, "d": 2}"#);
        let obj = doc.root().child(0).unwrap();
        assert_eq!(obj.len(), Ok(2));
        let c = obj.member("a").unwrap().member("b").unwrap().member("c");
        assert_eq!(c.unwrap().literal(), Ok("1"));
        assert_eq!(obj.member("d").unwrap().literal(), Ok("2"));
    }

    #[test]
    fn test_escaped_quote_in_value() {
        let doc = parse(r#"["x\"y", "a\\", "tab\tq"]"#);
        let arr = doc.root().child(0).unwrap();
        assert_eq!(arr.child(0).unwrap().as_str(), Ok("x\"y"));
        assert_eq!(arr.child(1).unwrap().as_str(), Ok("a\\"));
        assert_eq!(arr.child(2).unwrap().as_str(), Ok("tab\tq"));
    }

    #[test]
    fn test_escaped_name() {
        let doc = parse(r#"{"a\"b": 1, "c\\": 2}"#);
        let obj = doc.root().child(0).unwrap();
        assert_eq!(obj.child(0).unwrap().name(), Some("a\"b"));
        assert_eq!(obj.child(1).unwrap().name(), Some("c\\"));
    }

    #[test]
    fn test_duplicate_names_kept() {
        let doc = parse(r#"{"a": 1, "a": 2}"#);
        let obj = doc.root().child(0).unwrap();
        let values: Vec<_> = obj
            .children()
            .unwrap()
            .map(|c| (c.name(), c.literal().unwrap()))
            .collect();
        assert_eq!(values, vec![(Some("a"), "1"), (Some("a"), "2")]);
    }

    #[test]
    fn test_top_level_scalars() {
        let doc = parse("1 2 3");
        let literals: Vec<_> = doc
            .root()
            .children()
            .unwrap()
            .map(|c| (c.kind(), c.literal().unwrap()))
            .collect();
        assert_eq!(
            literals,
            vec![
                (JsonKind::Number, "1"),
                (JsonKind::Number, "2"),
                (JsonKind::Number, "3")
            ]
        );

        let doc = parse(r#""s" true"#);
        assert_eq!(doc.root().child(0).unwrap().as_str(), Ok("s"));
        assert_eq!(doc.root().child(1).unwrap().as_bool(), Ok(true));
    }

    #[test]
    fn test_concatenated_top_level_values() {
        let doc = parse("[1] [2]");
        let root = doc.root();
        assert_eq!(root.len(), Ok(2));
        let second = root.child(1).unwrap();
        assert_eq!(second.len(), Ok(1));
        assert_eq!(second.child(0).unwrap().literal(), Ok("2"));

        let doc = parse(r#""s" [1]"#);
        let array = doc.root().child(1).unwrap();
        assert_eq!(array.kind(), JsonKind::Array);
        assert_eq!(array.len(), Ok(1));
        assert_eq!(array.child(0).unwrap().literal(), Ok("1"));

        let doc = parse(r#"{"a":1}{"b":[2]}"#);
        let second = doc.root().child(1).unwrap();
        let b = second.member("b").unwrap();
        assert_eq!(b.len(), Ok(1));
        assert_eq!(b.child(0).unwrap().literal(), Ok("2"));
        assert_eq!(doc.to_string(), r#"{"a":1}{"b":[2]}"#);
    }

    #[test]
    fn test_malformed_input_is_partial() {
        let doc = parse(r#"{"a": 1, "b": [2, 3"#);
        let obj = doc.root().child(0).unwrap();
        assert_eq!(obj.member("a").unwrap().literal(), Ok("1"));
        let b = obj.member("b").unwrap();
        assert_eq!(b.len(), Ok(1));

        let doc = parse(r#"{"open": "never closed"#);
        assert_eq!(doc.root().child(0).unwrap().len(), Ok(0));

        assert!(parse("").is_empty());
        assert!(parse("   \n\t").is_empty());
    }

    #[test]
    fn test_grammar_shape() {
        let language = JsonLanguage::new();
        let stats = language.grammar().stats();
        assert_eq!(language.grammar().name(), "JSON");
        assert_eq!(stats.symbols, 9);
        assert_eq!(stats.waypoints, 9);
        // root + 8 single characters + `\"`
        assert_eq!(stats.trie_nodes, 10);
        assert_eq!(stats.modes, 12);
    }
}
