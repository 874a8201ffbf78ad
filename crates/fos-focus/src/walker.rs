//! Boundary walking
//!
//! Decides, per element, which nested scope a deep traversal continues
//! into: a shadow tree, a slot's distributed content, or a same-origin
//! frame document.

use crate::host::{FocusTree, FrameContent};
use crate::options::FocusOptions;
use crate::visibility::is_inert;
use fos_dom::ShadowRootMode;

/// Where traversal continues below an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Boundary<N> {
    /// Ordinary light-tree children
    Children,
    /// Children of a shadow root, forming a scope owned by the host
    Shadow(N),
    /// Assigned nodes of a slot, or its fallback content
    Slot(Vec<N>),
    /// Same-origin document, forming a scope owned by the frame
    Frame(N),
    /// Nothing reachable below (cross-origin frame)
    Opaque,
}

/// Resolve the boundary below `element` for a deep traversal
pub fn boundary<T: FocusTree>(tree: &T, element: T::Node, options: &FocusOptions<T::Node>) -> Boundary<T::Node> {
    if tree.is_html(element, "slot") {
        let assigned = tree.assigned_nodes(element);
        let content = if assigned.is_empty() {
            tree.children(element)
        } else {
            assigned
        };
        return Boundary::Slot(content);
    }

    if let Some(root) = enterable_shadow_root(tree, element, options) {
        return Boundary::Shadow(root);
    }

    match tree.frame_content(element) {
        FrameContent::SameOrigin(document) => Boundary::Frame(document),
        FrameContent::CrossOrigin => {
            tracing::trace!("Skipping cross-origin frame {:?}", element);
            Boundary::Opaque
        }
        FrameContent::None => Boundary::Children,
    }
}

/// Shadow root of `host` if the traversal may enter it. Closed roots need
/// the caller's opener hook; any root can be vetoed by the shadow root
/// filter.
pub fn enterable_shadow_root<T: FocusTree>(
    tree: &T,
    host: T::Node,
    options: &FocusOptions<T::Node>,
) -> Option<T::Node> {
    let shadow = tree.shadow_root(host)?;
    if shadow.mode == ShadowRootMode::Closed && !options.opens_closed_root(host) {
        tracing::trace!("Closed shadow root on {:?} not opened", host);
        return None;
    }
    if !options.allows_shadow_root(host) || is_inert(tree, host) {
        return None;
    }
    Some(shadow.root)
}
