//! Candidate collection
//!
//! Walks the subtree under a root and gathers classified elements into
//! `Entry` lists. A shallow walk stays in the light tree. A deep walk
//! follows `walker::boundary` into shadow trees, slots and same-origin
//! frames, each of which becomes a nested scope.

use crate::classify::{Focusability, classify};
use crate::host::{FocusTree, NodeKind};
use crate::options::{DisplayCheck, FocusOptions};
use crate::order::Entry;
use crate::walker::{Boundary, boundary};
use fos_dom::Display;
use std::collections::HashSet;

/// What a collection keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Focusable,
    Tabbable,
}

impl Mode {
    fn accepts(self, focusability: Focusability) -> bool {
        match self {
            Self::Focusable => focusability.is_focusable(),
            Self::Tabbable => focusability.is_tabbable(),
        }
    }
}

pub struct Collector<'a, T: FocusTree> {
    tree: &'a T,
    options: &'a FocusOptions<T::Node>,
    mode: Mode,
    seen: HashSet<T::Node>,
    documents: HashSet<T::Node>,
    /// Whether the root reaches a document; detached trees have no layout
    connected: bool,
}

impl<'a, T: FocusTree> Collector<'a, T> {
    pub fn new(tree: &'a T, options: &'a FocusOptions<T::Node>, mode: Mode) -> Self {
        Self {
            tree,
            options,
            mode,
            seen: HashSet::new(),
            documents: HashSet::new(),
            connected: false,
        }
    }

    /// Collect under `root`. Documents and shadow roots contribute their
    /// children; an element root is itself a candidate only with
    /// `include_container`. Any other node yields nothing.
    pub fn collect(mut self, root: T::Node) -> Vec<Entry<T::Node>> {
        self.connected = self.tree.is_connected(root);
        let entries = match self.tree.node_kind(root) {
            NodeKind::Element => self.walk(vec![root], Some(root)),
            NodeKind::Document => {
                self.documents.insert(root);
                self.walk(self.tree.children(root), None)
            }
            NodeKind::ShadowRoot => self.walk(self.tree.children(root), None),
            NodeKind::Other => Vec::new(),
        };
        tracing::debug!("Collected {} {:?} candidates under {:?}", self.seen.len(), self.mode, root);
        entries
    }

    fn walk(&mut self, nodes: Vec<T::Node>, root: Option<T::Node>) -> Vec<Entry<T::Node>> {
        let mut entries = Vec::new();
        for node in nodes {
            if !self.tree.is_element(node) || self.prunes(node) {
                continue;
            }

            let deep = self.options.config.deep;
            let boundary = if deep {
                boundary(self.tree, node, self.options)
            } else {
                Boundary::Children
            };

            // Slots are containers in a deep walk, never candidates
            let boundary = match boundary {
                Boundary::Slot(content) => {
                    let nested = self.walk(content, None);
                    entries.push(Entry::Scope { owner: node, entries: nested });
                    continue;
                }
                other => other,
            };

            let is_root = root == Some(node);
            if (!is_root || self.options.config.include_container)
                && self.mode.accepts(classify(self.tree, node, self.options))
                && self.seen.insert(node)
            {
                entries.push(Entry::Node(node));
            }

            match boundary {
                Boundary::Shadow(shadow) => {
                    let nested = self.walk(self.tree.children(shadow), None);
                    entries.push(Entry::Scope { owner: node, entries: nested });
                }
                Boundary::Frame(document) => {
                    if self.documents.insert(document) {
                        let nested = self.walk(self.tree.children(document), None);
                        entries.push(Entry::Scope { owner: node, entries: nested });
                    } else {
                        tracing::warn!("Frame {:?} re-enters document {:?}, skipping", node, document);
                    }
                }
                Boundary::Opaque => {}
                Boundary::Children | Boundary::Slot(_) => {
                    let nested = self.walk(self.tree.children(node), None);
                    entries.extend(nested);
                }
            }
        }
        entries
    }

    /// Subtrees that cannot hold any result: inert ones, and connected ones
    /// whose root has `display: none` under a layout-based display check.
    /// Caller hooks can revive nodes, so pruning stands down for them.
    fn prunes(&self, node: T::Node) -> bool {
        if !self.options.has_node_filter() && self.tree.has_attribute(node, "inert") {
            return true;
        }
        if self.options.has_display_override() {
            return false;
        }
        match self.options.config.display_check {
            DisplayCheck::Full | DisplayCheck::LegacyFull | DisplayCheck::NonZeroArea => {
                self.connected
                    && self
                        .tree
                        .box_style(node)
                        .is_some_and(|s| s.display == Display::None)
            }
            DisplayCheck::None => false,
        }
    }
}
