//! Tab-order sorting
//!
//! Positive indices come first, ascending, ties broken by document order.
//! Zero indices follow in document order. A nested scope sorts as one unit
//! under its owner's index and is expanded in place.

use crate::classify::{scope_tab_index, tab_index};
use crate::host::FocusTree;

/// Collected node or nested scope, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry<N> {
    Node(N),
    Scope { owner: N, entries: Vec<Entry<N>> },
}

/// Flatten to document order
pub fn flatten<N: Copy>(entries: &[Entry<N>]) -> Vec<N> {
    let mut out = Vec::new();
    flatten_into(entries, &mut out);
    out
}

fn flatten_into<N: Copy>(entries: &[Entry<N>], out: &mut Vec<N>) {
    for entry in entries {
        match entry {
            Entry::Node(node) => out.push(*node),
            Entry::Scope { entries, .. } => flatten_into(entries, out),
        }
    }
}

/// Sort into sequential navigation order
pub fn sort_by_order<T: FocusTree>(tree: &T, entries: Vec<Entry<T::Node>>) -> Vec<T::Node> {
    let mut regular = Vec::new();
    let mut ordered: Vec<(i32, usize, Vec<T::Node>)> = Vec::new();

    for (position, entry) in entries.into_iter().enumerate() {
        let (index, content) = match entry {
            Entry::Node(node) => (tab_index(tree, node), vec![node]),
            Entry::Scope { owner, entries } => (scope_tab_index(tree, owner), sort_by_order(tree, entries)),
        };
        if index > 0 {
            ordered.push((index, position, content));
        } else {
            regular.extend(content);
        }
    }

    ordered.sort_unstable_by_key(|&(index, position, _)| (index, position));
    ordered
        .into_iter()
        .flat_map(|(_, _, content)| content)
        .chain(regular)
        .collect()
}
