//! DOM Tree (arena-based allocation)

use crate::{DomError, DomResult, ElementData, Namespace, Node, NodeData, NodeId};

/// Arena-based DOM tree
#[derive(Debug, Default)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a new empty DOM tree
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes in the arena, including detached ones
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(data));
        id
    }

    fn node(&self, id: NodeId) -> DomResult<&Node> {
        self.get(id).ok_or(DomError::NodeNotFound(id))
    }

    // --- Creation ---

    /// Create a detached HTML element
    pub fn create_element(&mut self, name: &str) -> NodeId {
        self.create_element_ns(Namespace::Html, name)
    }

    /// Create a detached element in the given namespace
    pub fn create_element_ns(&mut self, namespace: Namespace, name: &str) -> NodeId {
        self.push(NodeData::Element(ElementData::new(name, namespace)))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Text(text.to_string()))
    }

    /// Create a detached comment
    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Comment(text.to_string()))
    }

    // --- Element access ---

    /// Element data, if `id` is an element
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id)?.as_element()
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id)?.as_element_mut()
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.element(id).is_some()
    }

    /// Local name of an element
    pub fn local_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.local_name.as_str())
    }

    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.get_attr(name)
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.element(id).is_some_and(|e| e.has_attr(name))
    }

    /// Set an attribute. Names on HTML elements are lowercased.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<()> {
        let elem = self.element_mut(id).ok_or(DomError::NotAnElement(id))?;
        let name = attr_name(elem, name);
        elem.attrs.set_attribute(&name, value);
        Ok(())
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> DomResult<()> {
        let elem = self.element_mut(id).ok_or(DomError::NotAnElement(id))?;
        let name = attr_name(elem, name);
        elem.attrs.remove_attribute(&name);
        Ok(())
    }

    pub fn toggle_attribute(&mut self, id: NodeId, name: &str, force: Option<bool>) -> DomResult<bool> {
        let elem = self.element_mut(id).ok_or(DomError::NotAnElement(id))?;
        let name = attr_name(elem, name);
        Ok(elem.attrs.toggle_attribute(&name, force))
    }

    /// Replace the `style` attribute
    pub fn set_style(&mut self, id: NodeId, css: &str) -> DomResult<()> {
        self.set_attribute(id, "style", css)
    }

    // --- Navigation ---

    /// Parent node (`parentNode`); shadow roots and tree roots have none
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent.to_option()
    }

    /// Parent, only if it is an element
    pub fn parent_element(&self, id: NodeId) -> Option<NodeId> {
        self.parent(id).filter(|&p| self.is_element(p))
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.first_child.to_option()
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.next_sibling.to_option()
    }

    /// Iterate over the children of a node
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.get(id).map(|n| n.first_child).unwrap_or(NodeId::NONE),
        }
    }

    /// Iterate over the element children of a node
    pub fn child_elements(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id).filter(|(_, n)| n.is_element()).map(|(id, _)| id)
    }

    /// Pre-order iteration over the light-tree descendants of a node
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            root: id,
            next: self.first_child(id).unwrap_or(NodeId::NONE),
        }
    }

    /// Inclusive ancestor test within one light tree
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Inclusive ancestor test that continues from a shadow root to its host
    pub fn shadow_including_contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = match self.get(id).map(|n| &n.data) {
                Some(NodeData::ShadowRoot(shadow)) => shadow.host.to_option(),
                _ => self.parent(id),
            };
        }
        false
    }

    /// Topmost ancestor (`getRootNode`): a document, a shadow root, or the
    /// root of a detached subtree
    pub fn root_node(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    /// Whether the node's root chain, through shadow hosts, ends at a document
    pub fn is_connected(&self, id: NodeId) -> bool {
        let mut root = self.root_node(id);
        loop {
            match self.get(root).map(|n| &n.data) {
                Some(NodeData::Document(_)) => return true,
                Some(NodeData::ShadowRoot(shadow)) => root = self.root_node(shadow.host),
                _ => return false,
            }
        }
    }

    /// First element with the given id among the descendants of `scope`
    pub fn get_element_by_id(&self, scope: NodeId, id: &str) -> Option<NodeId> {
        self.descendants(scope)
            .find(|&node| self.get_attribute(node, "id") == Some(id))
    }

    // --- Mutation ---

    /// Append `child` as the last child of `parent`, moving it if attached
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.insert_before(parent, child, None)
    }

    /// Insert `child` before `reference`, or append when `reference` is `None`
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) -> DomResult<()> {
        self.check_insertion(parent, child)?;
        if let Some(reference) = reference {
            if self.parent(reference) != Some(parent) {
                return Err(DomError::HierarchyRequest { parent, child: reference });
            }
        }
        // Inserting a node before itself keeps it ahead of its next sibling
        let reference = match reference {
            Some(reference) if reference == child => self.next_sibling(child),
            other => other,
        };
        self.detach(child)?;
        self.link_child(parent, child, reference);
        Ok(())
    }

    /// Splice a detached `child` into `parent` before `reference`. Both must
    /// be valid ids and `reference` a child of `parent`.
    pub(crate) fn link_child(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) {
        let prev = match reference {
            Some(reference) => self.nodes[reference.index()].prev_sibling,
            None => self.nodes[parent.index()].last_child,
        };
        let next = reference.unwrap_or(NodeId::NONE);

        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = prev;
            node.next_sibling = next;
        }
        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = child;
        } else {
            self.nodes[parent.index()].last_child = child;
        }
    }

    /// Remove a node from its parent; the subtree stays in the arena
    pub fn detach(&mut self, id: NodeId) -> DomResult<()> {
        let node = self.node(id)?;
        let (parent, prev, next) = (node.parent, node.prev_sibling, node.next_sibling);
        if !parent.is_valid() {
            return Ok(());
        }
        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else {
            self.nodes[parent.index()].last_child = prev;
        }
        let node = &mut self.nodes[id.index()];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
        Ok(())
    }

    fn check_insertion(&self, parent: NodeId, child: NodeId) -> DomResult<()> {
        let parent_node = self.node(parent)?;
        let child_node = self.node(child)?;
        let parent_ok = matches!(
            parent_node.data,
            NodeData::Document(_) | NodeData::Element(_) | NodeData::ShadowRoot(_)
        );
        let child_ok = !matches!(child_node.data, NodeData::Document(_) | NodeData::ShadowRoot(_));
        if !parent_ok || !child_ok || self.shadow_including_contains(child, parent) {
            return Err(DomError::HierarchyRequest { parent, child });
        }
        Ok(())
    }
}

fn attr_name(elem: &ElementData, name: &str) -> String {
    match elem.namespace {
        Namespace::Html => name.to_ascii_lowercase(),
        _ => name.to_string(),
    }
}

/// Iterator over the children of a node
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next.to_option()?;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}

/// Pre-order iterator over light-tree descendants
pub struct Descendants<'a> {
    tree: &'a DomTree,
    root: NodeId,
    next: NodeId,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next.to_option()?;
        self.next = match self.tree.first_child(current) {
            Some(child) => child,
            None => {
                let mut id = current;
                loop {
                    if id == self.root {
                        break NodeId::NONE;
                    }
                    if let Some(sibling) = self.tree.next_sibling(id) {
                        break sibling;
                    }
                    match self.tree.parent(id) {
                        Some(parent) => id = parent,
                        None => break NodeId::NONE,
                    }
                }
            }
        };
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (DomTree, NodeId, NodeId, NodeId, NodeId) {
        let mut tree = DomTree::new();
        let root = tree.create_element("div");
        let a = tree.create_element("span");
        let b = tree.create_element("p");
        let c = tree.create_element("em");
        tree.append_child(root, a).unwrap();
        tree.append_child(root, b).unwrap();
        tree.append_child(b, c).unwrap();
        (tree, root, a, b, c)
    }

    #[test]
    fn test_append_and_children() {
        let (tree, root, a, b, _) = sample();
        let ids: Vec<_> = tree.children(root).map(|(id, _)| id).collect();
        assert_eq!(ids, vec![a, b]);
        assert_eq!(tree.parent(a), Some(root));
    }

    #[test]
    fn test_descendants_preorder() {
        let (tree, root, a, b, c) = sample();
        let ids: Vec<_> = tree.descendants(root).collect();
        assert_eq!(ids, vec![a, b, c]);
        let ids: Vec<_> = tree.descendants(b).collect();
        assert_eq!(ids, vec![c]);
    }

    #[test]
    fn test_insert_before_and_detach() {
        let (mut tree, root, a, b, _) = sample();
        let x = tree.create_element("i");
        tree.insert_before(root, x, Some(b)).unwrap();
        let ids: Vec<_> = tree.child_elements(root).collect();
        assert_eq!(ids, vec![a, x, b]);

        tree.detach(x).unwrap();
        let ids: Vec<_> = tree.child_elements(root).collect();
        assert_eq!(ids, vec![a, b]);
        assert_eq!(tree.parent(x), None);
    }

    #[test]
    fn test_cycle_rejected() {
        let (mut tree, root, _, b, c) = sample();
        assert!(matches!(
            tree.append_child(c, root),
            Err(DomError::HierarchyRequest { .. })
        ));
        assert!(tree.append_child(c, b).is_err());
    }

    #[test]
    fn test_host_cannot_enter_own_shadow_tree() {
        let (mut tree, root, _, b, c) = sample();
        let shadow = tree.attach_shadow(b, crate::ShadowRootInit::open()).unwrap();
        let inner = tree.create_element("span");
        tree.append_child(shadow, inner).unwrap();

        assert!(tree.append_child(shadow, b).is_err());
        assert!(tree.append_child(inner, root).is_err());
        assert!(tree.append_child(inner, c).is_ok());
        assert!(tree.shadow_including_contains(root, inner));
        assert!(!tree.is_connected(inner));
    }

    #[test]
    fn test_insert_before_itself() {
        let (mut tree, root, a, b, _) = sample();
        tree.insert_before(root, a, Some(a)).unwrap();
        let ids: Vec<_> = tree.child_elements(root).collect();
        assert_eq!(ids, vec![a, b]);

        tree.insert_before(root, b, Some(b)).unwrap();
        let ids: Vec<_> = tree.child_elements(root).collect();
        assert_eq!(ids, vec![a, b]);
        assert_eq!(tree.next_sibling(a), Some(b));
        assert_eq!(tree.next_sibling(b), None);
    }

    #[test]
    fn test_attribute_names_lowercased() {
        let (mut tree, root, ..) = sample();
        tree.set_attribute(root, "TabIndex", "3").unwrap();
        assert_eq!(tree.get_attribute(root, "tabindex"), Some("3"));
    }

    #[test]
    fn test_detached_not_connected() {
        let (tree, root, a, ..) = sample();
        assert_eq!(tree.root_node(a), root);
        assert!(!tree.is_connected(a));
    }

    #[test]
    fn test_get_element_by_id() {
        let (mut tree, root, _, _, c) = sample();
        tree.set_attribute(c, "id", "target").unwrap();
        assert_eq!(tree.get_element_by_id(root, "target"), Some(c));
        assert_eq!(tree.get_element_by_id(root, "missing"), None);
    }
}
