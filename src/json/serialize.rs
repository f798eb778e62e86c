//! JSON serialization
//!
//! Two layouts are supported:
//!
//! - [`Spacing::Minimized`]: no whitespace is inserted. The only exception
//!   is a single space between two adjacent top-level bare literals, which
//!   would otherwise run together (`1 2 3`).
//! - [`Spacing::Expanded`]: one member or element per line, indented by one
//!   [`WriterConfig::indent`] per depth, with the closing bracket at the
//!   parent's indentation. Empty containers stay `{}` / `[]`. Top-level
//!   values are separated by newlines.
//!
//! Strings and member names are escaped with
//! [`escape_into`](super::escape::escape_into).

use super::document::{JsonDocument, JsonKind, NodeRef};
use super::escape::escape_into;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Output layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Spacing {
    /// Compact, single line
    #[default]
    Minimized,
    /// One item per line, indented
    Expanded,
}

/// Serializer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriterConfig {
    /// Output layout
    pub spacing: Spacing,
    /// Indentation unit for [`Spacing::Expanded`]
    pub indent: String,
}

impl WriterConfig {
    /// Compact output
    pub fn minimized() -> Self {
        Self::default()
    }

    /// One item per line, tab indented
    pub fn expanded() -> Self {
        Self {
            spacing: Spacing::Expanded,
            ..Self::default()
        }
    }

    /// Set the indentation unit
    pub fn indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            spacing: Spacing::Minimized,
            indent: "\t".to_string(),
        }
    }
}

struct Writer<'c> {
    out: String,
    config: &'c WriterConfig,
}

impl<'c> Writer<'c> {
    fn new(config: &'c WriterConfig) -> Self {
        Self {
            out: String::new(),
            config,
        }
    }

    fn expanded(&self) -> bool {
        self.config.spacing == Spacing::Expanded
    }

    fn newline(&mut self, depth: usize) {
        if self.expanded() {
            self.out.push('\n');
            for _ in 0..depth {
                self.out.push_str(&self.config.indent);
            }
        }
    }

    fn top_level(&mut self, root: NodeRef<'_>) {
        let mut previous_bare = false;
        for (i, child) in root.children().into_iter().flatten().enumerate() {
            let bare = is_bare(child.kind());
            if i > 0 {
                if self.expanded() {
                    self.out.push('\n');
                } else if previous_bare && bare {
                    self.out.push(' ');
                }
            }
            self.value(child, 0);
            previous_bare = bare;
        }
    }

    fn value(&mut self, node: NodeRef<'_>, depth: usize) {
        match node.kind() {
            JsonKind::Root => self.top_level(node),
            JsonKind::Object => self.container(node, depth, '{', '}', true),
            JsonKind::Array => self.container(node, depth, '[', ']', false),
            JsonKind::String => self.string(node.as_str().unwrap_or_default()),
            JsonKind::Bool => {
                let b = node.as_bool().unwrap_or_default();
                self.out.push_str(if b { "true" } else { "false" });
            }
            JsonKind::Number | JsonKind::Unknown => match node.literal() {
                Ok(literal) if !literal.is_empty() => self.out.push_str(literal),
                _ => self.out.push_str("null"),
            },
        }
    }

    fn container(&mut self, node: NodeRef<'_>, depth: usize, open: char, close: char, named: bool) {
        self.out.push(open);
        if node.is_empty().unwrap_or(true) {
            self.out.push(close);
            return;
        }
        for (i, child) in node.children().into_iter().flatten().enumerate() {
            if i > 0 {
                self.out.push(',');
            }
            self.newline(depth + 1);
            if named {
                self.string(child.name().unwrap_or_default());
                self.out.push(':');
            }
            self.value(child, depth + 1);
        }
        self.newline(depth);
        self.out.push(close);
    }

    fn string(&mut self, s: &str) {
        self.out.push('"');
        escape_into(s, &mut self.out);
        self.out.push('"');
    }
}

fn is_bare(kind: JsonKind) -> bool {
    matches!(kind, JsonKind::Number | JsonKind::Bool | JsonKind::Unknown)
}

impl JsonDocument {
    /// Serialize the whole document
    pub fn to_json_string(&self, config: &WriterConfig) -> String {
        self.root().to_json_string(config)
    }

    /// Serialize with [`WriterConfig::expanded`]
    pub fn to_expanded_string(&self) -> String {
        self.to_json_string(&WriterConfig::expanded())
    }
}

impl NodeRef<'_> {
    /// Serialize this node (without its member name)
    pub fn to_json_string(&self, config: &WriterConfig) -> String {
        let mut writer = Writer::new(config);
        writer.value(*self, 0);
        writer.out
    }
}

impl fmt::Display for JsonDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json_string(&WriterConfig::minimized()))
    }
}

impl fmt::Display for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json_string(&WriterConfig::minimized()))
    }
}
