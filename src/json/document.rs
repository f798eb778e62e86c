//! JSON document model
//!
//! A [`JsonDocument`] is an arena of nodes addressed by [`NodeId`]. Node 0
//! is always the root; every other node has exactly one parent and one
//! position in that parent's child list. Object members carry their name
//! on the child node, and duplicate names are kept in order.
//!
//! Number literals are stored as raw text and realized lazily, see
//! [`NumberClass`](super::number::NumberClass).

use super::error::JsonError;
use super::number::JsonNumber;
use serde::{Deserialize, Serialize};

/// Kind of a document node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JsonKind {
    /// The document root; holds the top-level values
    Root,
    /// `{ ... }`
    Object,
    /// `[ ... ]`
    Array,
    /// A decoded string
    String,
    /// A raw number literal
    Number,
    /// `true` or `false`
    Bool,
    /// `null` or any other unrecognized bare literal
    Unknown,
}

impl JsonKind {
    /// Whether nodes of this kind hold children
    #[inline]
    pub fn is_container(self) -> bool {
        matches!(self, JsonKind::Root | JsonKind::Object | JsonKind::Array)
    }
}

/// Index of a node in a [`JsonDocument`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// The document root
    pub const ROOT: NodeId = NodeId(0);

    /// Position of the node in the document arena
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Content of a node to be added to a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeValue {
    /// An empty object
    Object,
    /// An empty array
    Array,
    /// A decoded string
    String(String),
    /// A raw number literal
    Number(String),
    /// A boolean
    Bool(bool),
    /// An unrecognized literal, `null` included
    Unknown(String),
}

impl NodeValue {
    /// Kind of node this value creates
    pub fn kind(&self) -> JsonKind {
        match self {
            NodeValue::Object => JsonKind::Object,
            NodeValue::Array => JsonKind::Array,
            NodeValue::String(_) => JsonKind::String,
            NodeValue::Number(_) => JsonKind::Number,
            NodeValue::Bool(_) => JsonKind::Bool,
            NodeValue::Unknown(_) => JsonKind::Unknown,
        }
    }
}

#[derive(Debug, Clone)]
enum NodeData {
    Root(Vec<NodeId>),
    Object(Vec<NodeId>),
    Array(Vec<NodeId>),
    String(String),
    Number(String),
    Bool(bool),
    Unknown(String),
}

impl NodeData {
    fn kind(&self) -> JsonKind {
        match self {
            NodeData::Root(_) => JsonKind::Root,
            NodeData::Object(_) => JsonKind::Object,
            NodeData::Array(_) => JsonKind::Array,
            NodeData::String(_) => JsonKind::String,
            NodeData::Number(_) => JsonKind::Number,
            NodeData::Bool(_) => JsonKind::Bool,
            NodeData::Unknown(_) => JsonKind::Unknown,
        }
    }

    fn children(&self) -> Option<&[NodeId]> {
        match self {
            NodeData::Root(c) | NodeData::Object(c) | NodeData::Array(c) => Some(c),
            _ => None,
        }
    }
}

impl From<NodeValue> for NodeData {
    fn from(value: NodeValue) -> Self {
        match value {
            NodeValue::Object => NodeData::Object(Vec::new()),
            NodeValue::Array => NodeData::Array(Vec::new()),
            NodeValue::String(s) => NodeData::String(s),
            NodeValue::Number(n) => NodeData::Number(n),
            NodeValue::Bool(b) => NodeData::Bool(b),
            NodeValue::Unknown(u) => NodeData::Unknown(u),
        }
    }
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    name: Option<String>,
    data: NodeData,
}

/// A parsed (or hand-built) JSON document
#[derive(Debug, Clone)]
pub struct JsonDocument {
    nodes: Vec<Node>,
}

impl JsonDocument {
    /// Create a document holding only the root
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                name: None,
                data: NodeData::Root(Vec::new()),
            }],
        }
    }

    /// The root node
    #[inline]
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            doc: self,
            id: NodeId::ROOT,
        }
    }

    /// Look up a node
    pub fn get(&self, id: NodeId) -> Result<NodeRef<'_>, JsonError> {
        if id.index() < self.nodes.len() {
            Ok(NodeRef { doc: self, id })
        } else {
            Err(JsonError::UnknownNode(id))
        }
    }

    /// Total number of nodes, root included
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the root has no children
    pub fn is_empty(&self) -> bool {
        self.root().is_empty().unwrap_or(true)
    }

    /// Append a new node under `parent`
    ///
    /// Fails with [`JsonError::Unsupported`] when `parent` is a scalar.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        name: Option<String>,
        value: NodeValue,
    ) -> Result<NodeId, JsonError> {
        let id = NodeId(self.nodes.len() as u32);
        let parent_node = self
            .nodes
            .get_mut(parent.index())
            .ok_or(JsonError::UnknownNode(parent))?;
        match &mut parent_node.data {
            NodeData::Root(c) | NodeData::Object(c) | NodeData::Array(c) => c.push(id),
            other => return Err(JsonError::unsupported("add_child", other.kind())),
        }
        self.nodes.push(Node {
            parent: Some(parent),
            name,
            data: value.into(),
        });
        Ok(id)
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
}

impl Default for JsonDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for JsonDocument {
    fn eq(&self, other: &Self) -> bool {
        self.root() == other.root()
    }
}

/// Borrowed view of one node
#[derive(Clone, Copy)]
pub struct NodeRef<'d> {
    doc: &'d JsonDocument,
    id: NodeId,
}

impl<'d> NodeRef<'d> {
    fn data(&self) -> &'d NodeData {
        &self.doc.node(self.id).data
    }

    /// The node's id
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The owning document
    #[inline]
    pub fn document(&self) -> &'d JsonDocument {
        self.doc
    }

    /// The node's kind
    pub fn kind(&self) -> JsonKind {
        self.data().kind()
    }

    /// Member name, for children of an object
    pub fn name(&self) -> Option<&'d str> {
        self.doc.node(self.id).name.as_deref()
    }

    /// The containing node, `None` for the root
    pub fn parent(&self) -> Option<NodeRef<'d>> {
        self.doc.node(self.id).parent.map(|id| NodeRef { doc: self.doc, id })
    }

    /// Child nodes in order
    ///
    /// Fails with [`JsonError::Unsupported`] on scalars.
    pub fn children(&self) -> Result<Children<'d>, JsonError> {
        match self.data().children() {
            Some(ids) => Ok(Children {
                doc: self.doc,
                ids: ids.iter(),
            }),
            None => Err(JsonError::unsupported("children", self.kind())),
        }
    }

    /// Child at `index`
    ///
    /// Fails with [`JsonError::Unsupported`] on scalars and
    /// [`JsonError::NoChild`] when `index` is out of range.
    pub fn child(&self, index: usize) -> Result<NodeRef<'d>, JsonError> {
        let ids = self.child_ids("child")?;
        match ids.get(index) {
            Some(&id) => Ok(NodeRef { doc: self.doc, id }),
            None => Err(JsonError::NoChild {
                index,
                len: ids.len(),
            }),
        }
    }

    /// First object member called `name`
    ///
    /// Only objects have members; any other kind fails with
    /// [`JsonError::Unsupported`].
    pub fn member(&self, name: &str) -> Result<NodeRef<'d>, JsonError> {
        match self.data() {
            NodeData::Object(_) => self
                .children()?
                .find(|child| child.name() == Some(name))
                .ok_or_else(|| JsonError::NoMember(name.to_string())),
            other => Err(JsonError::unsupported("member", other.kind())),
        }
    }

    /// Number of children
    ///
    /// Fails with [`JsonError::Unsupported`] on scalars.
    pub fn len(&self) -> Result<usize, JsonError> {
        self.child_ids("len").map(<[NodeId]>::len)
    }

    /// Whether the container has no children
    pub fn is_empty(&self) -> Result<bool, JsonError> {
        self.child_ids("is_empty").map(<[NodeId]>::is_empty)
    }

    fn child_ids(&self, operation: &'static str) -> Result<&'d [NodeId], JsonError> {
        self.data()
            .children()
            .ok_or_else(|| JsonError::unsupported(operation, self.kind()))
    }

    /// Decoded value of a String node
    pub fn as_str(&self) -> Result<&'d str, JsonError> {
        match self.data() {
            NodeData::String(s) => Ok(s),
            other => Err(JsonError::unsupported("as_str", other.kind())),
        }
    }

    /// Value of a Bool node
    pub fn as_bool(&self) -> Result<bool, JsonError> {
        match self.data() {
            NodeData::Bool(b) => Ok(*b),
            other => Err(JsonError::unsupported("as_bool", other.kind())),
        }
    }

    /// Raw literal of a Number or Unknown node
    pub fn literal(&self) -> Result<&'d str, JsonError> {
        match self.data() {
            NodeData::Number(n) => Ok(n),
            NodeData::Unknown(u) => Ok(u),
            other => Err(JsonError::unsupported("literal", other.kind())),
        }
    }

    /// Realized value of a Number node
    pub fn number(&self) -> Result<JsonNumber, JsonError> {
        match self.data() {
            NodeData::Number(n) => JsonNumber::realize(n),
            other => Err(JsonError::unsupported("number", other.kind())),
        }
    }

    /// Textual form of a scalar
    ///
    /// Strings yield their decoded text, numbers and unknowns their raw
    /// literal, bools `true`/`false`.
    pub fn text_value(&self) -> Result<String, JsonError> {
        match self.data() {
            NodeData::String(s) => Ok(s.clone()),
            NodeData::Number(n) => Ok(n.clone()),
            NodeData::Unknown(u) => Ok(u.clone()),
            NodeData::Bool(b) => Ok(b.to_string()),
            other => Err(JsonError::unsupported("text_value", other.kind())),
        }
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        if self.name() != other.name() {
            return false;
        }
        match (self.data(), other.data()) {
            (NodeData::Root(a), NodeData::Root(b))
            | (NodeData::Object(a), NodeData::Object(b))
            | (NodeData::Array(a), NodeData::Array(b)) => {
                a.len() == b.len()
                    && a.iter().zip(b).all(|(&x, &y)| {
                        NodeRef { doc: self.doc, id: x } == NodeRef { doc: other.doc, id: y }
                    })
            }
            (NodeData::String(a), NodeData::String(b)) => a == b,
            (NodeData::Number(a), NodeData::Number(b)) => a == b,
            (NodeData::Bool(a), NodeData::Bool(b)) => a == b,
            (NodeData::Unknown(a), NodeData::Unknown(b)) => a == b,
            _ => false,
        }
    }
}

impl std::fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id.index())
            .field("kind", &self.kind())
            .field("name", &self.name())
            .finish()
    }
}

/// Iterator over a node's children
#[derive(Clone)]
pub struct Children<'d> {
    doc: &'d JsonDocument,
    ids: std::slice::Iter<'d, NodeId>,
}

impl<'d> Iterator for Children<'d> {
    type Item = NodeRef<'d>;

    fn next(&mut self) -> Option<NodeRef<'d>> {
        self.ids.next().map(|&id| NodeRef { doc: self.doc, id })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl ExactSizeIterator for Children<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> JsonDocument {
        let mut doc = JsonDocument::new();
        let obj = doc.add_child(NodeId::ROOT, None, NodeValue::Object).unwrap();
        doc.add_child(obj, Some("a".into()), NodeValue::Number("1".into()))
            .unwrap();
        doc.add_child(obj, Some("a".into()), NodeValue::Bool(true))
            .unwrap();
        let arr = doc
            .add_child(obj, Some("list".into()), NodeValue::Array)
            .unwrap();
        doc.add_child(arr, None, NodeValue::String("x".into()))
            .unwrap();
        doc.add_child(arr, None, NodeValue::Unknown("null".into()))
            .unwrap();
        doc
    }

    #[test]
    fn test_tree_shape() {
        let doc = sample();
        let root = doc.root();
        assert_eq!(root.kind(), JsonKind::Root);
        assert_eq!(root.len(), Ok(1));
        assert!(root.parent().is_none());

        let obj = root.child(0).unwrap();
        assert_eq!(obj.kind(), JsonKind::Object);
        assert_eq!(obj.len(), Ok(3));
        let names: Vec<_> = obj.children().unwrap().map(|c| c.name()).collect();
        assert_eq!(names, vec![Some("a"), Some("a"), Some("list")]);

        let list = obj.member("list").unwrap();
        assert_eq!(list.parent().map(|p| p.id()), Some(obj.id()));
        assert_eq!(list.child(0).unwrap().as_str(), Ok("x"));
        assert_eq!(list.child(1).unwrap().literal(), Ok("null"));
        assert_eq!(list.child(2).err(), Some(JsonError::NoChild { index: 2, len: 2 }));
        assert_eq!(list.is_empty(), Ok(false));
    }

    #[test]
    fn test_member_first_duplicate_wins() {
        let doc = sample();
        let obj = doc.root().child(0).unwrap();
        assert_eq!(obj.member("a").unwrap().literal(), Ok("1"));
        assert_eq!(
            obj.member("missing").err(),
            Some(JsonError::NoMember("missing".into()))
        );
    }

    #[test]
    fn test_scalar_operations_fail_fast() {
        let doc = sample();
        let number = doc.root().child(0).unwrap().child(0).unwrap();
        assert_eq!(
            number.children().err(),
            Some(JsonError::unsupported("children", JsonKind::Number))
        );
        assert_eq!(
            number.child(0).err(),
            Some(JsonError::unsupported("child", JsonKind::Number))
        );
        assert_eq!(
            number.member("a").err(),
            Some(JsonError::unsupported("member", JsonKind::Number))
        );
        assert_eq!(
            number.len(),
            Err(JsonError::unsupported("len", JsonKind::Number))
        );
        assert_eq!(
            number.is_empty(),
            Err(JsonError::unsupported("is_empty", JsonKind::Number))
        );
        assert!(matches!(
            number.as_bool(),
            Err(JsonError::Unsupported {
                kind: JsonKind::Number,
                ..
            })
        ));

        let obj = doc.root().child(0).unwrap();
        let list = obj.member("list").unwrap();
        assert_eq!(
            list.member("x").err(),
            Some(JsonError::unsupported("member", JsonKind::Array))
        );
        assert!(obj.as_str().is_err());
        assert!(obj.literal().is_err());
        assert!(obj.text_value().is_err());
    }

    #[test]
    fn test_add_child_to_scalar() {
        let mut doc = sample();
        let obj = doc.root().child(0).unwrap().id();
        let number = doc.root().child(0).unwrap().child(0).unwrap().id();
        assert_eq!(
            doc.add_child(number, None, NodeValue::Bool(false)),
            Err(JsonError::unsupported("add_child", JsonKind::Number))
        );
        assert!(doc.add_child(obj, Some("b".into()), NodeValue::Bool(false)).is_ok());
    }

    #[test]
    fn test_unknown_node() {
        let doc = JsonDocument::new();
        assert_eq!(doc.get(NodeId(7)).err(), Some(JsonError::UnknownNode(NodeId(7))));
        assert!(doc.get(NodeId::ROOT).is_ok());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_text_value() {
        let doc = sample();
        let obj = doc.root().child(0).unwrap();
        assert_eq!(obj.child(0).unwrap().text_value(), Ok("1".to_string()));
        assert_eq!(obj.child(1).unwrap().text_value(), Ok("true".to_string()));
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(sample(), sample());

        // Same tree in a separate document
        let mut other = JsonDocument::new();
        let obj = other.add_child(NodeId::ROOT, None, NodeValue::Object).unwrap();
        other.add_child(obj, Some("a".into()), NodeValue::Number("1".into())).unwrap();
        other.add_child(obj, Some("a".into()), NodeValue::Bool(true)).unwrap();
        let arr = other.add_child(obj, Some("list".into()), NodeValue::Array).unwrap();
        other.add_child(arr, None, NodeValue::String("x".into())).unwrap();
        other.add_child(arr, None, NodeValue::Unknown("null".into())).unwrap();
        assert_eq!(sample(), other);

        other.add_child(arr, None, NodeValue::Bool(false)).unwrap();
        assert_ne!(sample(), other);
    }
}
