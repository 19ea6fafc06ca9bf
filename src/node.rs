//! Node graph produced by the composer.
//!
//! A [`Document`] owns every node of one YAML document in an arena. Containers
//! refer to their children through [`NodeId`] handles, so an aliased node is the
//! same `NodeId` wherever it appears and a node may (transitively) contain
//! itself. Traversals must track visited ids; [`Document::walk`] does.

use std::ops::{Index, Range};

use ahash::AHashSet;

use crate::event::{FlowStyle, ScalarStyle};
use crate::location::Location;
use crate::tags::Tag;

/// Handle of a node inside its [`Document`]. Equal ids mean the same node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in the document arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// The three node kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Scalar,
    Sequence,
    Mapping,
}

/// Kind-specific content of a node.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeData {
    Scalar {
        value: String,
        style: ScalarStyle,
    },
    Sequence {
        children: Vec<NodeId>,
        flow_style: FlowStyle,
    },
    Mapping {
        pairs: Vec<(NodeId, NodeId)>,
        flow_style: FlowStyle,
        /// A key carries the merge tag; consumers should apply merge-key semantics.
        merged: bool,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub tag: Tag,
    /// The tag was inferred by the resolver rather than given in the source.
    pub resolved: bool,
    pub start: Location,
    pub end: Location,
    /// The node is reachable from inside its own subtree.
    pub recursive: bool,
    pub data: NodeData,
}

impl Node {
    pub(crate) fn new(tag: Tag, resolved: bool, start: Location, end: Location, data: NodeData) -> Self {
        Self {
            tag,
            resolved,
            start,
            end,
            recursive: false,
            data,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self.data {
            NodeData::Scalar { .. } => NodeKind::Scalar,
            NodeData::Sequence { .. } => NodeKind::Sequence,
            NodeData::Mapping { .. } => NodeKind::Mapping,
        }
    }

    /// Bytes of the input between the start and end marks.
    ///
    /// `None` unless both marks carry byte offsets, which only happens for
    /// string input. A block collection ends where the parser closes it, which
    /// may be past trailing whitespace.
    pub fn byte_range(&self) -> Option<Range<usize>> {
        let start = usize::try_from(self.start.byte_offset()?).ok()?;
        let end = usize::try_from(self.end.byte_offset()?).ok()?;
        Some(start..end)
    }

    /// Scalar text, if this is a scalar.
    pub fn as_scalar(&self) -> Option<&str> {
        match &self.data {
            NodeData::Scalar { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Sequence items, if this is a sequence.
    pub fn children(&self) -> Option<&[NodeId]> {
        match &self.data {
            NodeData::Sequence { children, .. } => Some(children),
            _ => None,
        }
    }

    /// Mapping entries in source order, if this is a mapping.
    pub fn pairs(&self) -> Option<&[(NodeId, NodeId)]> {
        match &self.data {
            NodeData::Mapping { pairs, .. } => Some(pairs),
            _ => None,
        }
    }

    pub fn flow_style(&self) -> Option<FlowStyle> {
        match &self.data {
            NodeData::Scalar { .. } => None,
            NodeData::Sequence { flow_style, .. } | NodeData::Mapping { flow_style, .. } => {
                Some(*flow_style)
            }
        }
    }

    /// True for a mapping with at least one merge key.
    pub fn is_merged(&self) -> bool {
        matches!(self.data, NodeData::Mapping { merged: true, .. })
    }
}

/// One composed YAML document: the node arena and its root.
#[derive(Clone, Debug)]
pub struct Document {
    pub(crate) nodes: Vec<Node>,
    pub(crate) root: NodeId,
    pub(crate) explicit_start: bool,
}

impl Document {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn root_node(&self) -> &Node {
        &self[self.root]
    }

    /// `---` opened this document in the source.
    pub fn explicit_start(&self) -> bool {
        self.explicit_start
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Number of distinct nodes. Aliases do not add nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, node)| (NodeId(i), node))
    }

    /// Depth-first pre-order traversal from the root, visiting each node once.
    ///
    /// Shared and recursive nodes appear at their first position only, so this
    /// terminates on cyclic graphs. Mapping keys are visited before their values.
    pub fn walk(&self) -> Vec<NodeId> {
        let mut seen = AHashSet::with_capacity(self.nodes.len());
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            order.push(id);
            match &self[id].data {
                NodeData::Scalar { .. } => {}
                NodeData::Sequence { children, .. } => stack.extend(children.iter().rev()),
                NodeData::Mapping { pairs, .. } => {
                    for (key, value) in pairs.iter().rev() {
                        stack.push(*value);
                        stack.push(*key);
                    }
                }
            }
        }
        order
    }
}

impl Index<NodeId> for Document {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}
