//! Element kinds
//!
//! Every element the focus rules care about maps to one `ElementKind`.
//! The rules below are plain lookups on that closed set.

use crate::host::FocusTree;
use fos_dom::{InputType, Namespace};

/// Element classes with distinct focus behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// `<a>` and `<area>`
    Link,
    Button,
    Input(InputType),
    Select,
    Textarea,
    /// `<audio>` and `<video>`
    Media,
    Details,
    Summary,
    /// `<iframe>` and `<frame>`
    Frame,
    /// `<embed>` and `<object>`
    Embedded,
    Slot,
    Fieldset,
    Legend,
    OptGroup,
    Option,
    /// Any SVG element
    Svg,
    Other,
}

impl ElementKind {
    pub fn of<T: FocusTree>(tree: &T, node: T::Node) -> Self {
        match tree.namespace(node) {
            Namespace::Svg => return Self::Svg,
            Namespace::MathMl => return Self::Other,
            Namespace::Html => {}
        }
        match tree.local_name(node).unwrap_or("") {
            "a" | "area" => Self::Link,
            "button" => Self::Button,
            "input" => Self::Input(InputType::parse(tree.attribute(node, "type").unwrap_or(""))),
            "select" => Self::Select,
            "textarea" => Self::Textarea,
            "audio" | "video" => Self::Media,
            "details" => Self::Details,
            "summary" => Self::Summary,
            "iframe" | "frame" => Self::Frame,
            "embed" | "object" => Self::Embedded,
            "slot" => Self::Slot,
            "fieldset" => Self::Fieldset,
            "legend" => Self::Legend,
            "optgroup" => Self::OptGroup,
            "option" => Self::Option,
            _ => Self::Other,
        }
    }

    /// Focusable without any tabindex attribute
    pub fn is_inherently_focusable<T: FocusTree>(self, tree: &T, node: T::Node) -> bool {
        match self {
            Self::Link => tree.has_attribute(node, "href"),
            Self::Button | Self::Input(_) | Self::Select | Self::Textarea => true,
            Self::Media => tree.has_attribute(node, "controls"),
            Self::Details | Self::Frame | Self::Embedded => true,
            Self::Summary => is_details_summary(tree, node),
            Self::Svg => tree.attribute(node, "focusable") == Some("true"),
            _ => false,
        }
    }

    /// Tab index used when the element carries no valid tabindex
    pub fn default_tab_index<T: FocusTree>(self, tree: &T, node: T::Node) -> i32 {
        let sequential = match self {
            // Media and details sit in the sequence even without controls
            // or an explicit index.
            Self::Media | Self::Details => true,
            _ => self.is_inherently_focusable(tree, node) || is_content_editable(tree, node),
        };
        if sequential { 0 } else { -1 }
    }

    /// Honors its own `disabled` attribute
    pub fn is_disableable(self) -> bool {
        matches!(
            self,
            Self::Button
                | Self::Input(_)
                | Self::Select
                | Self::Textarea
                | Self::OptGroup
                | Self::Option
                | Self::Fieldset
        )
    }

    /// Disabled by an enclosing disabled fieldset
    pub fn is_listed_control(self) -> bool {
        matches!(self, Self::Button | Self::Input(_) | Self::Select | Self::Textarea)
    }
}

/// Parsed `tabindex` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabIndex {
    /// Focusable, skipped by sequential navigation
    Programmatic(i32),
    /// Zero or positive
    Sequential(i32),
}

impl TabIndex {
    /// HTML integer parsing: leading whitespace, optional sign, digits,
    /// trailing garbage ignored. No digits or overflow gives `None`.
    pub fn parse(value: &str) -> Option<Self> {
        let s = value.trim_start_matches([' ', '\t', '\n', '\r', '\x0c']);
        let (negative, rest) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };
        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return None;
        }
        let magnitude: i64 = rest[..digits].parse().ok()?;
        let n = i32::try_from(if negative { -magnitude } else { magnitude }).ok()?;
        Some(if n < 0 { Self::Programmatic(n) } else { Self::Sequential(n) })
    }

    pub fn value(self) -> i32 {
        match self {
            Self::Programmatic(n) | Self::Sequential(n) => n,
        }
    }

    pub fn is_sequential(self) -> bool {
        matches!(self, Self::Sequential(_))
    }
}

/// Explicit, valid tabindex of an element
pub fn explicit_tab_index<T: FocusTree>(tree: &T, node: T::Node) -> Option<TabIndex> {
    let value = tree.attribute(node, "tabindex")?;
    let parsed = TabIndex::parse(value);
    if parsed.is_none() {
        tracing::trace!("Ignoring malformed tabindex {:?} on {:?}", value, node);
    }
    parsed
}

/// HTML element with `contenteditable` other than "false"
pub fn is_content_editable<T: FocusTree>(tree: &T, node: T::Node) -> bool {
    tree.namespace(node) == Namespace::Html
        && tree
            .attribute(node, "contenteditable")
            .is_some_and(|v| !v.trim().eq_ignore_ascii_case("false"))
}

/// First `<summary>` child of a `<details>`
pub fn is_details_summary<T: FocusTree>(tree: &T, node: T::Node) -> bool {
    if !tree.is_html(node, "summary") {
        return false;
    }
    let Some(parent) = tree.parent_element(node) else {
        return false;
    };
    tree.is_html(parent, "details")
        && tree
            .element_children(parent)
            .into_iter()
            .find(|&child| tree.is_html(child, "summary"))
            == Some(node)
}

/// Structurally eligible: matches the candidate rules before any
/// visibility or state checks
pub fn is_candidate<T: FocusTree>(tree: &T, node: T::Node) -> bool {
    if !tree.is_element(node) {
        return false;
    }
    let kind = ElementKind::of(tree, node);
    (kind != ElementKind::Slot && explicit_tab_index(tree, node).is_some())
        || is_content_editable(tree, node)
        || kind.is_inherently_focusable(tree, node)
}
