//! `FocusTree` for the fOS arena DOM

use crate::host::{FocusTree, FrameContent, NodeKind, ShadowRootRef};
use fos_dom::{BoxStyle, ComputedStyle, DomTree, Namespace, NodeData, NodeId};

impl FocusTree for DomTree {
    type Node = NodeId;

    fn node_kind(&self, node: NodeId) -> NodeKind {
        match self.get(node).map(|n| &n.data) {
            Some(NodeData::Element(_)) => NodeKind::Element,
            Some(NodeData::Document(_)) => NodeKind::Document,
            Some(NodeData::ShadowRoot(_)) => NodeKind::ShadowRoot,
            _ => NodeKind::Other,
        }
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        DomTree::parent(self, node)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        DomTree::children(self, node).map(|(id, _)| id).collect()
    }

    fn local_name(&self, node: NodeId) -> Option<&str> {
        DomTree::local_name(self, node)
    }

    fn namespace(&self, node: NodeId) -> Namespace {
        self.element(node).map(|e| e.namespace).unwrap_or_default()
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.get_attribute(node, name)
    }

    fn computed_style(&self, node: NodeId) -> Option<ComputedStyle> {
        DomTree::computed_style(self, node)
    }

    fn box_style(&self, node: NodeId) -> Option<BoxStyle> {
        DomTree::box_style(self, node)
    }

    fn shadow_root(&self, host: NodeId) -> Option<ShadowRootRef<NodeId>> {
        let root = DomTree::shadow_root(self, host)?;
        let mode = self.shadow_root_data(root)?.mode;
        Some(ShadowRootRef { root, mode })
    }

    fn shadow_host(&self, root: NodeId) -> Option<NodeId> {
        DomTree::shadow_host(self, root)
    }

    fn assigned_slot(&self, node: NodeId) -> Option<NodeId> {
        DomTree::assigned_slot(self, node)
    }

    fn assigned_nodes(&self, slot: NodeId) -> Vec<NodeId> {
        DomTree::assigned_nodes(self, slot)
    }

    fn frame_content(&self, frame: NodeId) -> FrameContent<NodeId> {
        match self.frame_document(frame) {
            Some(frame) if frame.same_origin => FrameContent::SameOrigin(frame.document),
            Some(_) => FrameContent::CrossOrigin,
            None => FrameContent::None,
        }
    }

    fn frame_owner(&self, document: NodeId) -> Option<NodeId> {
        DomTree::frame_owner(self, document)
    }

    fn is_checked(&self, node: NodeId) -> bool {
        DomTree::is_checked(self, node)
    }

    fn form_owner(&self, node: NodeId) -> Option<NodeId> {
        DomTree::form_owner(self, node)
    }

    fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        DomTree::descendants(self, node).collect()
    }

    fn root_node(&self, node: NodeId) -> NodeId {
        DomTree::root_node(self, node)
    }

    fn flat_tree_parent(&self, node: NodeId) -> Option<NodeId> {
        DomTree::flat_tree_parent(self, node)
    }
}
