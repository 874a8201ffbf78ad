//! Shadow DOM
//!
//! Shadow roots, slot assignment and the flat tree.

use crate::{DomError, DomResult, DomTree, NodeData, NodeId};

/// Shadow root mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadowRootMode {
    #[default]
    Open,
    Closed,
}

impl ShadowRootMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "open" => Some(Self::Open),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }
}

/// Slot assignment mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlotAssignmentMode {
    #[default]
    Named,
    Manual,
}

/// Shadow root initialization options
#[derive(Debug, Clone, Copy, Default)]
pub struct ShadowRootInit {
    pub mode: ShadowRootMode,
    pub delegates_focus: bool,
    pub slot_assignment: SlotAssignmentMode,
}

impl ShadowRootInit {
    pub fn open() -> Self {
        Self::default()
    }

    pub fn closed() -> Self {
        Self { mode: ShadowRootMode::Closed, ..Self::default() }
    }
}

/// Shadow root node data
#[derive(Debug, Clone)]
pub struct ShadowRootData {
    /// Host element
    pub host: NodeId,
    pub mode: ShadowRootMode,
    /// Whether focus is delegated to the first focusable element
    pub delegates_focus: bool,
    pub slot_assignment: SlotAssignmentMode,
}

/// Elements allowed to host a shadow root besides custom elements
const SHADOW_HOSTS: &[&str] = &[
    "article", "aside", "blockquote", "body", "div", "footer", "h1", "h2",
    "h3", "h4", "h5", "h6", "header", "main", "nav", "p", "section", "span",
];

impl DomTree {
    /// Attach a shadow root to `host`
    pub fn attach_shadow(&mut self, host: NodeId, init: ShadowRootInit) -> DomResult<NodeId> {
        let elem = self.element(host).ok_or(DomError::NotAnElement(host))?;
        let allowed = elem.is_custom()
            || (elem.namespace == crate::Namespace::Html
                && SHADOW_HOSTS.contains(&elem.local_name.as_str()));
        if !allowed {
            return Err(DomError::ShadowNotSupported(elem.local_name.clone()));
        }
        if elem.shadow_root.is_valid() {
            return Err(DomError::ShadowRootExists(host));
        }

        let root = self.push(NodeData::ShadowRoot(ShadowRootData {
            host,
            mode: init.mode,
            delegates_focus: init.delegates_focus,
            slot_assignment: init.slot_assignment,
        }));
        if let Some(elem) = self.element_mut(host) {
            elem.shadow_root = root;
        }
        Ok(root)
    }

    /// Shadow root attached to `host`, whatever its mode
    pub fn shadow_root(&self, host: NodeId) -> Option<NodeId> {
        self.element(host)?.shadow_root.to_option()
    }

    pub fn shadow_root_data(&self, root: NodeId) -> Option<&ShadowRootData> {
        self.get(root)?.as_shadow_root()
    }

    /// Host of a shadow root
    pub fn shadow_host(&self, root: NodeId) -> Option<NodeId> {
        self.shadow_root_data(root).map(|s| s.host)
    }

    pub fn is_slot(&self, id: NodeId) -> bool {
        self.element(id).is_some_and(|e| e.is_html("slot"))
    }

    /// Slot name; the default slot has the empty name
    pub fn slot_name(&self, slot: NodeId) -> &str {
        self.get_attribute(slot, "name").unwrap_or("")
    }

    /// Assign nodes to a slot in a manual-assignment shadow root
    pub fn assign_slot(&mut self, slot: NodeId, nodes: &[NodeId]) -> DomResult<()> {
        if !self.is_slot(slot) {
            return Err(DomError::NotASlot(slot));
        }
        if let Some(elem) = self.element_mut(slot) {
            elem.manually_assigned = nodes.to_vec();
        }
        Ok(())
    }

    /// Slot a light-DOM child of a shadow host is assigned to
    pub fn assigned_slot(&self, id: NodeId) -> Option<NodeId> {
        let host = self.parent(id)?;
        let root = self.shadow_root(host)?;
        let data = self.shadow_root_data(root)?;
        let node = self.get(id)?;

        match data.slot_assignment {
            SlotAssignmentMode::Manual => self.descendants(root).find(|&slot| {
                self.is_slot(slot)
                    && self.element(slot).is_some_and(|e| e.manually_assigned.contains(&id))
            }),
            SlotAssignmentMode::Named => {
                let name = match &node.data {
                    NodeData::Element(e) => e.get_attr("slot").unwrap_or(""),
                    NodeData::Text(_) => "",
                    _ => return None,
                };
                self.descendants(root)
                    .find(|&slot| self.is_slot(slot) && self.slot_name(slot) == name)
            }
        }
    }

    /// Nodes assigned to a slot, in host child order
    pub fn assigned_nodes(&self, slot: NodeId) -> Vec<NodeId> {
        if !self.is_slot(slot) {
            return Vec::new();
        }
        let root = self.root_node(slot);
        let Some(host) = self.shadow_host(root) else {
            return Vec::new();
        };
        self.children(host)
            .map(|(id, _)| id)
            .filter(|&id| self.assigned_slot(id) == Some(slot))
            .collect()
    }

    /// Parent in the flat tree: slotted nodes render inside their slot,
    /// shadow root children render inside the host, and unassigned
    /// children of a shadow host do not render at all.
    pub fn flat_tree_parent(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        if self.shadow_root(parent).is_some() {
            return self.assigned_slot(id);
        }
        match self.shadow_host(parent) {
            Some(host) => Some(host),
            None => Some(parent),
        }
    }
}
