//! Tree access
//!
//! The engine never touches a concrete DOM. Everything it needs from the
//! host tree goes through `FocusTree`, so the same rules run over the fOS
//! arena DOM or any other tree that can answer these questions.

use fos_dom::{BoxStyle, ComputedStyle, Namespace, ShadowRootMode};
use std::fmt::Debug;
use std::hash::Hash;

/// Coarse node classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Element,
    Document,
    ShadowRoot,
    /// Text, comments and anything else that can never take focus
    Other,
}

/// Shadow root attached to a host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShadowRootRef<N> {
    pub root: N,
    pub mode: ShadowRootMode,
}

/// What a frame element exposes to the embedding document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameContent<N> {
    /// No nested browsing context
    None,
    /// Scriptable nested document
    SameOrigin(N),
    /// Opaque nested document
    CrossOrigin,
}

/// Read-only view of a document tree
pub trait FocusTree {
    /// Node handle
    type Node: Copy + Eq + Hash + Debug;

    fn node_kind(&self, node: Self::Node) -> NodeKind;

    /// `parentNode`; shadow roots and tree roots have none
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Children in tree order
    fn children(&self, node: Self::Node) -> Vec<Self::Node>;

    /// Local name of an element (lowercase for HTML)
    fn local_name(&self, node: Self::Node) -> Option<&str>;

    fn namespace(&self, node: Self::Node) -> Namespace;

    fn attribute(&self, node: Self::Node, name: &str) -> Option<&str>;

    /// Computed style, `None` when the node has no rendering context
    fn computed_style(&self, node: Self::Node) -> Option<ComputedStyle>;

    /// Non-inherited style of an element from its own declarations, without
    /// any connectivity or ancestor lookups
    fn box_style(&self, node: Self::Node) -> Option<BoxStyle>;

    /// Shadow root attached to `host`, open or closed
    fn shadow_root(&self, host: Self::Node) -> Option<ShadowRootRef<Self::Node>>;

    fn shadow_host(&self, root: Self::Node) -> Option<Self::Node>;

    /// Slot a light-DOM child of a shadow host is assigned to
    fn assigned_slot(&self, node: Self::Node) -> Option<Self::Node>;

    /// Nodes assigned to a slot
    fn assigned_nodes(&self, slot: Self::Node) -> Vec<Self::Node>;

    fn frame_content(&self, frame: Self::Node) -> FrameContent<Self::Node>;

    /// Frame element embedding a document
    fn frame_owner(&self, document: Self::Node) -> Option<Self::Node>;

    /// Checkedness of a checkbox or radio input
    fn is_checked(&self, node: Self::Node) -> bool;

    fn form_owner(&self, node: Self::Node) -> Option<Self::Node>;

    // --- Provided ---

    fn has_attribute(&self, node: Self::Node, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    fn is_element(&self, node: Self::Node) -> bool {
        self.node_kind(node) == NodeKind::Element
    }

    /// HTML element with the given local name
    fn is_html(&self, node: Self::Node, name: &str) -> bool {
        self.namespace(node) == Namespace::Html && self.local_name(node) == Some(name)
    }

    fn element_children(&self, node: Self::Node) -> Vec<Self::Node> {
        self.children(node)
            .into_iter()
            .filter(|&child| self.is_element(child))
            .collect()
    }

    fn parent_element(&self, node: Self::Node) -> Option<Self::Node> {
        self.parent(node).filter(|&p| self.is_element(p))
    }

    /// Light-tree descendants in pre-order
    fn descendants(&self, node: Self::Node) -> Vec<Self::Node> {
        let mut out = Vec::new();
        let mut stack: Vec<_> = self.children(node).into_iter().rev().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).into_iter().rev());
        }
        out
    }

    /// `getRootNode()`
    fn root_node(&self, node: Self::Node) -> Self::Node {
        let mut current = node;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    /// Whether the node reaches a document through its roots and hosts
    fn is_connected(&self, node: Self::Node) -> bool {
        let mut root = self.root_node(node);
        loop {
            match self.node_kind(root) {
                NodeKind::Document => return true,
                NodeKind::ShadowRoot => match self.shadow_host(root) {
                    Some(host) => root = self.root_node(host),
                    None => return false,
                },
                _ => return false,
            }
        }
    }

    /// Parent crossing from a shadow root to its host
    fn composed_parent(&self, node: Self::Node) -> Option<Self::Node> {
        let parent = self.parent(node)?;
        match self.node_kind(parent) {
            NodeKind::ShadowRoot => self.shadow_host(parent),
            _ => Some(parent),
        }
    }

    /// Parent in the rendered (flattened) tree. Children of a shadow host
    /// that no slot takes have no flat-tree parent.
    fn flat_tree_parent(&self, node: Self::Node) -> Option<Self::Node> {
        let parent = self.parent(node)?;
        if self.shadow_root(parent).is_some() {
            return self.assigned_slot(node);
        }
        match self.node_kind(parent) {
            NodeKind::ShadowRoot => self.shadow_host(parent),
            _ => Some(parent),
        }
    }
}
