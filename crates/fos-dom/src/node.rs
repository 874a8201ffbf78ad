//! DOM Node - arena node with sibling links
//!
//! Nodes reference each other through `NodeId` indices instead of pointers.
//! Unset links hold `NodeId::NONE`.

use crate::{DocumentData, NamedNodeMap, NodeId, ShadowRootData};

/// DOM Node - Core structure
#[derive(Debug)]
pub struct Node {
    /// Parent node (NONE for roots and detached nodes)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    pub(crate) fn new(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Node type of this node
    pub fn node_type(&self) -> NodeType {
        match self.data {
            NodeData::Document(_) => NodeType::Document,
            NodeData::Element(_) => NodeType::Element,
            NodeData::Text(_) => NodeType::Text,
            NodeData::Comment(_) => NodeType::Comment,
            NodeData::ShadowRoot(_) => NodeType::DocumentFragment,
        }
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Check if this is text
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }

    #[inline]
    pub fn is_document(&self) -> bool {
        matches!(self.data, NodeData::Document(_))
    }

    #[inline]
    pub fn is_shadow_root(&self) -> bool {
        matches!(self.data, NodeData::ShadowRoot(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }

    #[inline]
    pub fn as_document(&self) -> Option<&DocumentData> {
        match &self.data {
            NodeData::Document(d) => Some(d),
            _ => None,
        }
    }

    #[inline]
    pub fn as_shadow_root(&self) -> Option<&ShadowRootData> {
        match &self.data {
            NodeData::ShadowRoot(s) => Some(s),
            _ => None,
        }
    }
}

/// Node type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Element,
    Text,
    Comment,
    Document,
    /// Shadow roots are document fragments
    DocumentFragment,
}

/// Node-specific data
#[derive(Debug)]
pub enum NodeData {
    Document(DocumentData),
    Element(ElementData),
    Text(String),
    Comment(String),
    ShadowRoot(ShadowRootData),
}

/// Element namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Namespace {
    #[default]
    Html,
    Svg,
    MathMl,
}

impl Namespace {
    pub const HTML_URI: &'static str = "http://www.w3.org/1999/xhtml";
    pub const SVG_URI: &'static str = "http://www.w3.org/2000/svg";
    pub const MATHML_URI: &'static str = "http://www.w3.org/1998/Math/MathML";

    /// Map a namespace URI; unknown namespaces are treated as HTML
    pub fn from_uri(uri: &str) -> Self {
        match uri {
            Self::SVG_URI => Self::Svg,
            Self::MATHML_URI => Self::MathMl,
            _ => Self::Html,
        }
    }
}

/// Element-specific data
#[derive(Debug)]
pub struct ElementData {
    /// Local name, lowercased for HTML elements
    pub local_name: String,
    pub namespace: Namespace,
    pub attrs: NamedNodeMap,
    /// Attached shadow root
    pub shadow_root: NodeId,
    /// Nested browsing context document (iframe/frame)
    pub content_document: NodeId,
    /// Checkedness set through the API rather than the `checked` attribute
    pub checkedness: Option<bool>,
    /// Nodes assigned to this slot in manual assignment mode
    pub manually_assigned: Vec<NodeId>,
}

impl ElementData {
    pub fn new(local_name: &str, namespace: Namespace) -> Self {
        let local_name = match namespace {
            Namespace::Html => local_name.to_ascii_lowercase(),
            _ => local_name.to_string(),
        };
        Self {
            local_name,
            namespace,
            attrs: NamedNodeMap::new(),
            shadow_root: NodeId::NONE,
            content_document: NodeId::NONE,
            checkedness: None,
            manually_assigned: Vec::new(),
        }
    }

    /// Get an attribute value
    #[inline]
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get_attribute(name)
    }

    #[inline]
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.has_attribute(name)
    }

    /// Check for an HTML element with the given local name
    #[inline]
    pub fn is_html(&self, name: &str) -> bool {
        self.namespace == Namespace::Html && self.local_name == name
    }

    /// Custom element names contain a hyphen
    pub fn is_custom(&self) -> bool {
        self.namespace == Namespace::Html && self.local_name.contains('-')
    }
}
