//! Document dump for debugging

use super::document::{JsonKind, NodeRef};
use std::fmt::Write;

/// Document tree pretty printer
pub struct TreePrinter {
    /// Indentation string
    indent: String,
    /// Maximum depth to print
    max_depth: Option<usize>,
}

impl TreePrinter {
    /// Create a new tree printer
    pub fn new() -> Self {
        Self {
            indent: "  ".to_string(),
            max_depth: None,
        }
    }

    /// Set the indentation string
    pub fn indent(mut self, indent: &str) -> Self {
        self.indent = indent.to_string();
        self
    }

    /// Set the maximum depth to print
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Print a node and its descendants, one per line
    pub fn print(&self, node: NodeRef<'_>) -> String {
        let mut output = String::new();
        self.print_node(node, 0, &mut output);
        output
    }

    fn print_node(&self, node: NodeRef<'_>, depth: usize, output: &mut String) {
        if self.max_depth.is_some_and(|max| depth > max) {
            let _ = writeln!(output, "{}...", self.indent.repeat(depth));
            return;
        }

        let indent = self.indent.repeat(depth);
        let name = node
            .name()
            .map(|n| format!("{:?}: ", n))
            .unwrap_or_default();
        let detail = match node.kind() {
            JsonKind::Root | JsonKind::Object | JsonKind::Array => {
                let len = node.len().unwrap_or_default();
                format!("({} children)", len)
            }
            _ => node.text_value().map(|v| format!("{:?}", v)).unwrap_or_default(),
        };
        let _ = writeln!(output, "{}{}{:?} {}", indent, name, node.kind(), detail);

        if let Ok(children) = node.children() {
            for child in children {
                self.print_node(child, depth + 1, output);
            }
        }
    }
}

impl Default for TreePrinter {
    fn default() -> Self {
        Self::new()
    }
}
