//! Focusability classification

use crate::host::FocusTree;
use crate::kind::{ElementKind, explicit_tab_index, is_candidate};
use crate::options::FocusOptions;
use crate::visibility::{is_hidden, is_inert};
use fos_dom::InputType;

/// Outcome of classifying one element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focusability {
    NotFocusable,
    /// Reachable programmatically but skipped by Tab
    FocusableOnly,
    /// In the sequential order with this tab index
    Tabbable(i32),
}

impl Focusability {
    pub fn is_focusable(self) -> bool {
        !matches!(self, Self::NotFocusable)
    }

    pub fn is_tabbable(self) -> bool {
        matches!(self, Self::Tabbable(_))
    }
}

/// Effective tab index: the explicit attribute when valid, otherwise the
/// element's default
pub fn tab_index<T: FocusTree>(tree: &T, node: T::Node) -> i32 {
    if !tree.is_element(node) {
        return -1;
    }
    match explicit_tab_index(tree, node) {
        Some(index) => index.value(),
        None => ElementKind::of(tree, node).default_tab_index(tree, node),
    }
}

/// Sort key of a shadow host, slot or frame owning a nested scope. Scopes
/// are never dropped, so negative indices sort with the zeros.
pub fn scope_tab_index<T: FocusTree>(tree: &T, owner: T::Node) -> i32 {
    tab_index(tree, owner).max(0)
}

/// Classify a node, applying the caller's node filter first
pub fn classify<T: FocusTree>(tree: &T, node: T::Node, options: &FocusOptions<T::Node>) -> Focusability {
    if !tree.is_element(node) {
        return Focusability::NotFocusable;
    }
    match options.filter_node(node) {
        Some(false) => Focusability::NotFocusable,
        Some(true) => sequential(tree, node, options),
        None if is_candidate(tree, node) && passes_focus_checks(tree, node, options) => {
            sequential(tree, node, options)
        }
        None => Focusability::NotFocusable,
    }
}

fn sequential<T: FocusTree>(tree: &T, node: T::Node, options: &FocusOptions<T::Node>) -> Focusability {
    let index = tab_index(tree, node);
    if index < 0 || is_non_tabbable_radio(tree, node, options) {
        Focusability::FocusableOnly
    } else {
        Focusability::Tabbable(index)
    }
}

/// State checks on a structurally eligible candidate
fn passes_focus_checks<T: FocusTree>(tree: &T, node: T::Node, options: &FocusOptions<T::Node>) -> bool {
    let kind = ElementKind::of(tree, node);
    !(is_disabled(tree, node, kind)
        || is_inert(tree, node)
        || kind == ElementKind::Input(InputType::Hidden)
        || is_hidden(tree, node, options)
        || is_details_with_summary(tree, node, kind))
}

/// `<details>` whose summary takes focus in its place
fn is_details_with_summary<T: FocusTree>(tree: &T, node: T::Node, kind: ElementKind) -> bool {
    kind == ElementKind::Details
        && tree
            .element_children(node)
            .into_iter()
            .any(|child| tree.is_html(child, "summary"))
}

/// Disabled by its own attribute or by an enclosing disabled fieldset.
/// Controls inside the first legend of a disabled fieldset stay enabled
/// unless an outer disabled fieldset also covers them.
pub fn is_disabled<T: FocusTree>(tree: &T, node: T::Node, kind: ElementKind) -> bool {
    if kind.is_disableable() && tree.has_attribute(node, "disabled") {
        return true;
    }
    if !kind.is_listed_control() {
        return false;
    }

    let mut child = node;
    let mut current = tree.parent_element(node);
    while let Some(ancestor) = current {
        if tree.is_html(ancestor, "fieldset") && tree.has_attribute(ancestor, "disabled") {
            let legend = tree
                .element_children(ancestor)
                .into_iter()
                .find(|&c| tree.is_html(c, "legend"));
            if legend != Some(child) {
                return true;
            }
        }
        child = ancestor;
        current = tree.parent_element(ancestor);
    }
    false
}

/// A radio input that Tab skips. Within a group (same name, same form
/// owner, same root) only the checked radio is in the sequence, or the
/// first radio in tree order when none is checked. Radios that cannot
/// take focus never lead a group.
pub fn is_non_tabbable_radio<T: FocusTree>(tree: &T, node: T::Node, options: &FocusOptions<T::Node>) -> bool {
    if ElementKind::of(tree, node) != ElementKind::Input(InputType::Radio) {
        return false;
    }
    let name = match tree.attribute(node, "name") {
        Some(name) if !name.is_empty() => name,
        _ => return false,
    };
    if !name.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_') {
        tracing::debug!("Radio group name {:?} compared verbatim", name);
    }

    let form = tree.form_owner(node);
    let group: Vec<_> = tree
        .descendants(tree.root_node(node))
        .into_iter()
        .filter(|&radio| {
            ElementKind::of(tree, radio) == ElementKind::Input(InputType::Radio)
                && tree.attribute(radio, "name") == Some(name)
                && tree.form_owner(radio) == form
        })
        .collect();

    let can_focus = |radio: T::Node| {
        let kind = ElementKind::Input(InputType::Radio);
        !(is_disabled(tree, radio, kind) || is_inert(tree, radio) || is_hidden(tree, radio, options))
    };
    let leader = group
        .iter()
        .copied()
        .find(|&radio| tree.is_checked(radio) && can_focus(radio))
        .or_else(|| group.iter().copied().find(|&radio| can_focus(radio)));
    leader.is_some_and(|leader| leader != node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fos_dom::{DomTree, NodeId};

    fn doc() -> (DomTree, NodeId) {
        let mut tree = DomTree::new();
        let (_, body) = tree.create_html_document("https://example.com/");
        (tree, body)
    }

    fn add(tree: &mut DomTree, parent: NodeId, name: &str, attrs: &[(&str, &str)]) -> NodeId {
        let el = tree.create_element(name);
        tree.append_child(parent, el).unwrap();
        for (k, v) in attrs {
            tree.set_attribute(el, k, v).unwrap();
        }
        el
    }

    #[test]
    fn test_default_tab_indices() {
        let (mut tree, body) = doc();
        let link = add(&mut tree, body, "a", &[("href", "#")]);
        let bare = add(&mut tree, body, "a", &[]);
        let video = add(&mut tree, body, "video", &[]);
        let editable = add(&mut tree, body, "div", &[("contenteditable", "")]);
        let div = add(&mut tree, body, "div", &[]);
        let text = tree.create_text("x");

        assert_eq!(tab_index(&tree, link), 0);
        assert_eq!(tab_index(&tree, bare), -1);
        assert_eq!(tab_index(&tree, video), 0);
        assert_eq!(tab_index(&tree, editable), 0);
        assert_eq!(tab_index(&tree, div), -1);
        assert_eq!(tab_index(&tree, text), -1);
    }

    #[test]
    fn test_explicit_overrides_default() {
        let (mut tree, body) = doc();
        let button = add(&mut tree, body, "button", &[("tabindex", "-1")]);
        let div = add(&mut tree, body, "div", &[("tabindex", "3")]);
        let junk = add(&mut tree, body, "div", &[("tabindex", "abc")]);

        assert_eq!(tab_index(&tree, button), -1);
        assert_eq!(tab_index(&tree, div), 3);
        assert_eq!(tab_index(&tree, junk), -1);
        assert_eq!(scope_tab_index(&tree, button), 0);
    }

    #[test]
    fn test_classify() {
        let (mut tree, body) = doc();
        let options = FocusOptions::new();
        let button = add(&mut tree, body, "button", &[]);
        let programmatic = add(&mut tree, body, "div", &[("tabindex", "-1")]);
        let disabled = add(&mut tree, body, "input", &[("disabled", "")]);
        let hidden_input = add(&mut tree, body, "input", &[("type", "hidden")]);
        let junk = add(&mut tree, body, "div", &[("tabindex", "abc")]);

        assert_eq!(classify(&tree, button, &options), Focusability::Tabbable(0));
        assert_eq!(classify(&tree, programmatic, &options), Focusability::FocusableOnly);
        assert_eq!(classify(&tree, disabled, &options), Focusability::NotFocusable);
        assert_eq!(classify(&tree, hidden_input, &options), Focusability::NotFocusable);
        assert_eq!(classify(&tree, junk, &options), Focusability::NotFocusable);
    }

    #[test]
    fn test_fieldset_legend() {
        let (mut tree, body) = doc();
        let fieldset = add(&mut tree, body, "fieldset", &[("disabled", "")]);
        let legend = add(&mut tree, fieldset, "legend", &[]);
        let in_legend = add(&mut tree, legend, "input", &[]);
        let second = add(&mut tree, fieldset, "legend", &[]);
        let in_second = add(&mut tree, second, "input", &[]);
        let plain = add(&mut tree, fieldset, "button", &[]);

        let input = ElementKind::Input(InputType::Text);
        assert!(!is_disabled(&tree, in_legend, input));
        assert!(is_disabled(&tree, in_second, input));
        assert!(is_disabled(&tree, plain, ElementKind::Button));
    }

    #[test]
    fn test_radio_groups() {
        let (mut tree, body) = doc();
        let a = add(&mut tree, body, "input", &[("type", "radio"), ("name", "g")]);
        let b = add(&mut tree, body, "input", &[("type", "radio"), ("name", "g")]);
        let lone = add(&mut tree, body, "input", &[("type", "radio")]);

        let options = FocusOptions::new();

        assert!(!is_non_tabbable_radio(&tree, a, &options));
        assert!(is_non_tabbable_radio(&tree, b, &options));
        assert!(!is_non_tabbable_radio(&tree, lone, &options));

        tree.set_checked(b, true).unwrap();
        assert!(is_non_tabbable_radio(&tree, a, &options));
        assert!(!is_non_tabbable_radio(&tree, b, &options));
    }

    #[test]
    fn test_radio_leader_must_take_focus() {
        let (mut tree, body) = doc();
        let disabled = add(&mut tree, body, "input", &[("type", "radio"), ("name", "g"), ("disabled", "")]);
        let next = add(&mut tree, body, "input", &[("type", "radio"), ("name", "g")]);
        let hidden = add(&mut tree, body, "input", &[("type", "radio"), ("name", "h"), ("style", "display: none")]);
        let visible = add(&mut tree, body, "input", &[("type", "radio"), ("name", "h")]);
        let options = FocusOptions::new();

        assert!(!is_non_tabbable_radio(&tree, next, &options));
        assert!(!is_non_tabbable_radio(&tree, visible, &options));
        assert_eq!(classify(&tree, disabled, &options), Focusability::NotFocusable);
        assert_eq!(classify(&tree, hidden, &options), Focusability::NotFocusable);
        assert_eq!(classify(&tree, next, &options), Focusability::Tabbable(0));

        // A checked radio that cannot take focus does not hold the tab stop
        tree.set_checked(disabled, true).unwrap();
        assert!(!is_non_tabbable_radio(&tree, next, &options));
    }

    #[test]
    fn test_node_filter() {
        let (mut tree, body) = doc();
        let div = add(&mut tree, body, "div", &[]);
        let button = add(&mut tree, body, "button", &[]);

        let options = FocusOptions::new().node_filter(move |n| {
            if n == div {
                Some(true)
            } else if n == button {
                Some(false)
            } else {
                None
            }
        });
        assert_eq!(classify(&tree, div, &options), Focusability::FocusableOnly);
        assert_eq!(classify(&tree, button, &options), Focusability::NotFocusable);
    }
}
