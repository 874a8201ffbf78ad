//! Visibility and containment
//!
//! Answers whether a node is inert, collapsed inside a closed `<details>`,
//! or not rendered according to the configured display check.

use crate::host::{FocusTree, NodeKind};
use crate::kind::is_details_summary;
use crate::options::{DisplayCheck, FocusOptions};
use fos_dom::{Display, Visibility};
use std::collections::HashSet;

/// Inert itself or through any ancestor in the flat tree
pub fn is_inert<T: FocusTree>(tree: &T, node: T::Node) -> bool {
    let mut current = Some(node);
    while let Some(n) = current {
        if tree.is_element(n) && tree.has_attribute(n, "inert") {
            return true;
        }
        current = tree.flat_tree_parent(n).or_else(|| tree.composed_parent(n));
    }
    false
}

/// Inside a `<details>` that is not open. The first summary of a details
/// element stays visible; it is checked against the details' ancestors.
pub fn is_in_closed_details<T: FocusTree>(tree: &T, node: T::Node) -> bool {
    let start = if is_details_summary(tree, node) {
        tree.parent_element(node)
    } else {
        Some(node)
    };
    let mut current = start.and_then(|n| tree.parent_element(n));
    while let Some(ancestor) = current {
        if tree.is_html(ancestor, "details") && !tree.has_attribute(ancestor, "open") {
            return true;
        }
        current = tree.parent_element(ancestor);
    }
    false
}

/// Not perceivable under the given options
pub fn is_hidden<T: FocusTree>(tree: &T, node: T::Node, options: &FocusOptions<T::Node>) -> bool {
    if let Some(hidden) = options.override_display(node) {
        return hidden;
    }

    let style = tree.computed_style(node);
    if style.is_some_and(|s| s.visibility != Visibility::Visible) {
        return true;
    }
    if is_in_closed_details(tree, node) {
        return true;
    }

    match options.config.display_check {
        DisplayCheck::Full => !is_rendered(tree, node, true),
        DisplayCheck::LegacyFull => tree.is_connected(node) && !is_rendered(tree, node, false),
        // Boxless elements report an empty client rect
        DisplayCheck::NonZeroArea => {
            style.is_none_or(|s| s.is_zero_area()) || rendered_root(tree, node).is_none()
        }
        DisplayCheck::None => false,
    }
}

/// Whether the node produces a box. Walks the flat tree, and with
/// `across_frames` continues from a nested document into its frame owner.
pub fn is_rendered<T: FocusTree>(tree: &T, node: T::Node, across_frames: bool) -> bool {
    let mut documents = HashSet::new();
    let mut node = node;
    loop {
        match rendered_root(tree, node) {
            Some(document) if across_frames => match tree.frame_owner(document) {
                Some(owner) => {
                    if !documents.insert(document) {
                        tracing::warn!("Frame owner cycle through {:?}", document);
                        return false;
                    }
                    node = owner;
                }
                None => return true,
            },
            Some(_) => return true,
            None => return false,
        }
    }
}

/// Document the node renders in, if every flat-tree ancestor up to it
/// produces a box. One upward pass; ancestors only need their own
/// non-inherited style.
fn rendered_root<T: FocusTree>(tree: &T, node: T::Node) -> Option<T::Node> {
    if !tree.is_connected(node) {
        return None;
    }
    let style = tree.computed_style(node)?;
    if !style.display.generates_box() {
        return None;
    }
    let zero_area = style.is_zero_area();

    let mut current = node;
    while let Some(parent) = tree.flat_tree_parent(current) {
        if tree.is_element(parent) {
            let s = tree.box_style(parent)?;
            if s.display == Display::None {
                return None;
            }
            // A zero-sized clipping ancestor hides a zero-sized child
            if zero_area && s.overflow.clips() && s.is_zero_area() {
                return None;
            }
        }
        current = parent;
    }
    // Anything else is a child of a shadow host that no slot takes
    (tree.node_kind(current) == NodeKind::Document).then_some(current)
}
