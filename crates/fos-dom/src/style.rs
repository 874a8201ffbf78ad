//! Inline and computed style
//!
//! Only the properties that decide whether an element renders a box are
//! modelled: `display`, `visibility`, `overflow`, `width` and `height`.
//! Computed values combine UA defaults with the `style` attribute.

use crate::{DomTree, Namespace, NodeId};

/// CSS `display`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    #[default]
    Inline,
    Block,
    InlineBlock,
    Flex,
    Grid,
    Contents,
    None,
}

impl Display {
    pub fn parse(value: &str) -> Option<Self> {
        Some(match value.to_ascii_lowercase().as_str() {
            "inline" => Self::Inline,
            "block" | "list-item" | "table" | "flow-root" => Self::Block,
            "inline-block" | "inline-table" => Self::InlineBlock,
            "flex" | "inline-flex" => Self::Flex,
            "grid" | "inline-grid" => Self::Grid,
            "contents" => Self::Contents,
            "none" => Self::None,
            _ => return None,
        })
    }

    /// Whether the element generates a box of its own
    pub fn generates_box(self) -> bool {
        !matches!(self, Self::None | Self::Contents)
    }
}

/// CSS `visibility` (inherited)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
    Collapse,
}

impl Visibility {
    pub fn parse(value: &str) -> Option<Self> {
        Some(match value.to_ascii_lowercase().as_str() {
            "visible" => Self::Visible,
            "hidden" => Self::Hidden,
            "collapse" => Self::Collapse,
            _ => return None,
        })
    }
}

/// CSS `overflow`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    Clip,
    Scroll,
    Auto,
}

impl Overflow {
    pub fn parse(value: &str) -> Option<Self> {
        // `overflow: hidden auto` sets both axes; the first one is enough here
        let first = value.split_whitespace().next()?;
        Some(match first.to_ascii_lowercase().as_str() {
            "visible" => Self::Visible,
            "hidden" => Self::Hidden,
            "clip" => Self::Clip,
            "scroll" => Self::Scroll,
            "auto" => Self::Auto,
            _ => return None,
        })
    }

    pub fn clips(self) -> bool {
        !matches!(self, Self::Visible)
    }
}

/// Declarations parsed from a `style` attribute
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InlineStyle {
    pub display: Option<Display>,
    pub visibility: Option<Visibility>,
    pub overflow: Option<Overflow>,
    pub width: Option<f32>,
    pub height: Option<f32>,
}

impl InlineStyle {
    /// Parse a declaration block. Unknown properties and values are ignored,
    /// later declarations win.
    pub fn parse(css: &str) -> Self {
        let mut style = Self::default();
        for declaration in css.split(';') {
            let Some((property, value)) = declaration.split_once(':') else {
                continue;
            };
            let value = value.trim();
            let value = value.strip_suffix("!important").unwrap_or(value).trim();
            match property.trim().to_ascii_lowercase().as_str() {
                "display" => style.display = Display::parse(value).or(style.display),
                "visibility" => style.visibility = Visibility::parse(value).or(style.visibility),
                "overflow" => style.overflow = Overflow::parse(value).or(style.overflow),
                "width" => style.width = parse_length(value),
                "height" => style.height = parse_length(value),
                _ => {}
            }
        }
        style
    }
}

/// Lengths resolve to pixels when absolute, `None` when they depend on layout.
/// Any zero length is zero regardless of unit.
fn parse_length(value: &str) -> Option<f32> {
    let value = value.trim().to_ascii_lowercase();
    let split = value
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+'))
        .unwrap_or(value.len());
    let (number, unit) = value.split_at(split);
    let number: f32 = number.parse().ok()?;
    if number == 0.0 {
        return Some(0.0);
    }
    match unit {
        "" | "px" => Some(number.max(0.0)),
        _ => None,
    }
}

/// Properties that are not inherited, resolved from the element alone
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoxStyle {
    pub display: Display,
    pub overflow: Overflow,
    /// Used width in px, `None` when sized by content
    pub width: Option<f32>,
    /// Used height in px, `None` when sized by content
    pub height: Option<f32>,
}

impl BoxStyle {
    /// Both dimensions explicitly zero
    pub fn is_zero_area(&self) -> bool {
        self.width == Some(0.0) && self.height == Some(0.0)
    }
}

/// Resolved style of an element
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ComputedStyle {
    pub display: Display,
    pub visibility: Visibility,
    pub overflow: Overflow,
    /// Used width in px, `None` when sized by content
    pub width: Option<f32>,
    /// Used height in px, `None` when sized by content
    pub height: Option<f32>,
}

impl ComputedStyle {
    /// Both dimensions explicitly zero
    pub fn is_zero_area(&self) -> bool {
        self.width == Some(0.0) && self.height == Some(0.0)
    }
}

const UA_DISPLAY_NONE: &[&str] = &[
    "head", "script", "style", "template", "title", "meta", "link", "base",
    "noscript", "datalist", "param", "source", "track",
];

const UA_DISPLAY_BLOCK: &[&str] = &[
    "html", "body", "div", "p", "section", "article", "aside", "header",
    "footer", "nav", "main", "form", "fieldset", "legend", "ul", "ol", "li",
    "h1", "h2", "h3", "h4", "h5", "h6", "details", "summary", "dialog",
    "blockquote", "pre", "figure", "hr", "table",
];

impl DomTree {
    /// Parsed `style` attribute of an element
    pub fn inline_style(&self, id: NodeId) -> InlineStyle {
        self.element(id)
            .and_then(|e| e.get_attr("style"))
            .map(InlineStyle::parse)
            .unwrap_or_default()
    }

    /// `display`, `overflow` and sizes of an element. Unlike
    /// `computed_style` this neither checks connectivity nor looks at
    /// ancestors, so it is constant time.
    pub fn box_style(&self, id: NodeId) -> Option<BoxStyle> {
        let elem = self.element(id)?;
        let inline = self.inline_style(id);

        let display = if elem.namespace == Namespace::Html && elem.has_attr("hidden") {
            Display::None
        } else if let Some(display) = inline.display {
            display
        } else {
            ua_display(elem.namespace, &elem.local_name, elem.has_attr("open"))
        };

        Some(BoxStyle {
            display,
            overflow: inline.overflow.unwrap_or_default(),
            width: inline.width,
            height: inline.height,
        })
    }

    /// Computed style of an element. `None` for non-elements and for
    /// elements not connected to a document, which have no rendering.
    pub fn computed_style(&self, id: NodeId) -> Option<ComputedStyle> {
        let own = self.box_style(id)?;
        if !self.is_connected(id) {
            return None;
        }
        Some(ComputedStyle {
            display: own.display,
            visibility: self.inherited_visibility(id),
            overflow: own.overflow,
            width: own.width,
            height: own.height,
        })
    }

    /// `visibility` declared on the nearest flat-tree inclusive ancestor
    fn inherited_visibility(&self, id: NodeId) -> Visibility {
        let mut current = Some(id);
        while let Some(node) = current {
            if let Some(visibility) = self.inline_style(node).visibility {
                return visibility;
            }
            current = self.flat_tree_parent(node);
        }
        Visibility::default()
    }
}

fn ua_display(namespace: Namespace, name: &str, open: bool) -> Display {
    if namespace != Namespace::Html {
        return Display::Inline;
    }
    match name {
        "slot" => Display::Contents,
        "dialog" if !open => Display::None,
        _ if UA_DISPLAY_NONE.contains(&name) => Display::None,
        _ if UA_DISPLAY_BLOCK.contains(&name) => Display::Block,
        _ => Display::Inline,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_inline_declarations() {
        let style = InlineStyle::parse("display: none; visibility:hidden ;width:0;height: 10px");
        assert_eq!(style.display, Some(Display::None));
        assert_eq!(style.visibility, Some(Visibility::Hidden));
        assert_eq!(style.width, Some(0.0));
        assert_eq!(style.height, Some(10.0));
    }

    #[test]
    fn test_later_declaration_wins() {
        let style = InlineStyle::parse("display:none;display:block !important");
        assert_eq!(style.display, Some(Display::Block));
    }

    #[test]
    fn test_unknown_values_are_ignored() {
        let style = InlineStyle::parse("display: wobbly; color: red; overflow: hidden auto");
        assert_eq!(style.display, None);
        assert_eq!(style.overflow, Some(Overflow::Hidden));
    }

    #[test]
    fn test_lengths() {
        assert_eq!(parse_length("0"), Some(0.0));
        assert_eq!(parse_length("0em"), Some(0.0));
        assert_eq!(parse_length("12.5px"), Some(12.5));
        assert_eq!(parse_length("50%"), None);
        assert_eq!(parse_length("auto"), None);
    }

    #[test]
    fn test_zero_area() {
        let style = ComputedStyle { width: Some(0.0), height: Some(0.0), ..Default::default() };
        assert!(style.is_zero_area());
        let style = ComputedStyle { width: Some(0.0), ..Default::default() };
        assert!(!style.is_zero_area());
    }

    #[test]
    fn test_visibility_inherits_through_ancestors() {
        let mut tree = DomTree::new();
        let (_, body) = tree.create_html_document("https://example.com/");
        let outer = tree.create_element("div");
        let inner = tree.create_element("div");
        let button = tree.create_element("button");
        tree.append_child(body, outer).unwrap();
        tree.append_child(outer, inner).unwrap();
        tree.append_child(inner, button).unwrap();
        tree.set_style(outer, "visibility: hidden").unwrap();

        let style = tree.computed_style(button).unwrap();
        assert_eq!(style.visibility, Visibility::Hidden);

        tree.set_style(inner, "visibility: visible").unwrap();
        let style = tree.computed_style(button).unwrap();
        assert_eq!(style.visibility, Visibility::Visible);
    }

    #[test]
    fn test_box_style_ignores_connectivity() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        tree.set_attribute(div, "hidden", "").unwrap();
        assert_eq!(tree.computed_style(div), None);
        assert_eq!(tree.box_style(div).map(|s| s.display), Some(Display::None));
    }

    #[test]
    fn test_deep_chain_resolves() {
        let mut tree = DomTree::new();
        let (_, body) = tree.create_html_document("https://example.com/");
        let mut parent = body;
        for _ in 0..5000 {
            let div = tree.create_element("div");
            tree.append_child(parent, div).unwrap();
            parent = div;
        }
        let style = tree.computed_style(parent).unwrap();
        assert_eq!(style.visibility, Visibility::Visible);
    }

    #[test]
    fn test_ua_display() {
        assert_eq!(ua_display(Namespace::Html, "script", false), Display::None);
        assert_eq!(ua_display(Namespace::Html, "dialog", false), Display::None);
        assert_eq!(ua_display(Namespace::Html, "dialog", true), Display::Block);
        assert_eq!(ua_display(Namespace::Html, "slot", false), Display::Contents);
        assert_eq!(ua_display(Namespace::Svg, "title", false), Display::Inline);
    }
}
