//! JSON document errors
//!
//! Parsing never fails; these errors come from asking a document for
//! something its nodes cannot provide.

use super::document::{JsonKind, NodeId};
use super::number::NumberClass;
use std::fmt;

/// Error raised when accessing or building a JSON document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonError {
    /// The operation does not apply to this node kind
    Unsupported {
        /// What was attempted
        operation: &'static str,
        /// Kind of the node it was attempted on
        kind: JsonKind,
    },
    /// A number literal could not be realized as its class's value
    InvalidNumber {
        /// The raw literal
        literal: String,
        /// The class chosen for it
        class: NumberClass,
        /// Message of the underlying numeric parser
        reason: String,
    },
    /// A container has no child at this index
    NoChild {
        /// The requested index
        index: usize,
        /// Number of children the container has
        len: usize,
    },
    /// An object has no member with this name
    NoMember(String),
    /// The node id does not belong to this document
    UnknownNode(NodeId),
}

impl JsonError {
    pub(crate) fn unsupported(operation: &'static str, kind: JsonKind) -> Self {
        JsonError::Unsupported { operation, kind }
    }
}

impl fmt::Display for JsonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonError::Unsupported { operation, kind } => {
                write!(f, "{} is not supported for {:?} nodes", operation, kind)
            }
            JsonError::InvalidNumber {
                literal,
                class,
                reason,
            } => write!(
                f,
                "cannot read {:?} as {:?} number: {}",
                literal, class, reason
            ),
            JsonError::NoChild { index, len } => {
                write!(f, "no child at index {} (container has {})", index, len)
            }
            JsonError::NoMember(name) => write!(f, "no member named {:?}", name),
            JsonError::UnknownNode(id) => write!(f, "node {} is not in this document", id.index()),
        }
    }
}

impl std::error::Error for JsonError {}
