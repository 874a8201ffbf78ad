//! fOS DOM - Document Object Model
//!
//! Arena-based DOM tree. A single `DomTree` can hold several documents
//! (a top-level page plus the documents of its frames), shadow roots and
//! detached subtrees, all addressed by `NodeId`.

mod attributes;
mod document;
mod forms;
mod node;
mod shadow;
mod style;
mod tree;

pub use attributes::{Attr, NamedNodeMap};
pub use document::{DocumentData, FrameDocument};
pub use forms::InputType;
pub use node::{ElementData, Namespace, Node, NodeData, NodeType};
pub use shadow::{ShadowRootData, ShadowRootInit, ShadowRootMode, SlotAssignmentMode};
pub use style::{BoxStyle, ComputedStyle, Display, InlineStyle, Overflow, Visibility};
pub use tree::{Children, Descendants, DomTree};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check that this id is not the sentinel
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub(crate) fn to_option(self) -> Option<NodeId> {
        self.is_valid().then_some(self)
    }
}

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeId),

    #[error("Node {0:?} is not an element")]
    NotAnElement(NodeId),

    #[error("Cannot insert {child:?} into {parent:?}")]
    HierarchyRequest { parent: NodeId, child: NodeId },

    #[error("Element {0:?} already hosts a shadow root")]
    ShadowRootExists(NodeId),

    #[error("<{0}> cannot host a shadow root")]
    ShadowNotSupported(String),

    #[error("Node {0:?} is not a frame element")]
    NotAFrame(NodeId),

    #[error("Node {0:?} is not a document")]
    NotADocument(NodeId),

    #[error("Node {0:?} is not a slot")]
    NotASlot(NodeId),
}
