//! fOS Focus
//!
//! Focusable and tabbable element discovery.
//!
//! Given a root node, finds every element that can take focus and the
//! order sequential Tab navigation visits them in:
//! - Per-element rules for links, form controls, media, details/summary,
//!   frames, SVG, `contenteditable` and explicit `tabindex`
//! - Visibility: `display`, `visibility`, `hidden`, `inert`, closed
//!   `<details>`, detached nodes, with selectable display checks
//! - Radio groups, disabled fieldsets and their legends
//! - Deep traversal through shadow roots, slots and same-origin frames
//!
//! The engine works over any tree implementing [`FocusTree`]; the fOS
//! [`fos_dom::DomTree`] implements it out of the box.
//!
//! ```ignore
//! let (tree, document) = fos_html::parse(html)?;
//! let order = fos_focus::tabbable(&tree, document, &FocusOptions::new());
//! ```

mod candidates;
mod classify;
mod dom;
mod host;
mod kind;
mod options;
mod order;
mod visibility;
mod walker;

pub use classify::Focusability;
pub use host::{FocusTree, FrameContent, NodeKind, ShadowRootRef};
pub use kind::{ElementKind, TabIndex};
pub use options::{DisplayCheck, FocusConfig, FocusOptions, NodeOverride, NodePredicate};

use candidates::{Collector, Mode};

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FocusError {
    #[error("Invalid display check: {0}")]
    InvalidDisplayCheck(String),

    #[error("Invalid focus config: {0}")]
    InvalidConfig(String),
}

/// Every focusable element under `root`, in document order.
/// Includes elements with a negative tab index.
pub fn focusable<T: FocusTree>(tree: &T, root: T::Node, options: &FocusOptions<T::Node>) -> Vec<T::Node> {
    let entries = Collector::new(tree, options, Mode::Focusable).collect(root);
    order::flatten(&entries)
}

/// Every tabbable element under `root`, in sequential navigation order
pub fn tabbable<T: FocusTree>(tree: &T, root: T::Node, options: &FocusOptions<T::Node>) -> Vec<T::Node> {
    let entries = Collector::new(tree, options, Mode::Tabbable).collect(root);
    order::sort_by_order(tree, entries)
}

/// Whether a single node can take focus
pub fn is_focusable<T: FocusTree>(tree: &T, node: T::Node, options: &FocusOptions<T::Node>) -> bool {
    classify(tree, node, options).is_focusable()
}

/// Whether a single node is in the sequential navigation order
pub fn is_tabbable<T: FocusTree>(tree: &T, node: T::Node, options: &FocusOptions<T::Node>) -> bool {
    classify(tree, node, options).is_tabbable()
}

/// Classify a single node
pub fn classify<T: FocusTree>(tree: &T, node: T::Node, options: &FocusOptions<T::Node>) -> Focusability {
    classify::classify(tree, node, options)
}

/// Effective tab index: the valid `tabindex` attribute, else 0 for
/// elements in the sequence by default and -1 for everything else
pub fn get_tab_index<T: FocusTree>(tree: &T, node: T::Node) -> i32 {
    classify::tab_index(tree, node)
}
