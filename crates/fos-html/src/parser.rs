//! HTML5 Parser implementation
//!
//! Uses html5ever's build-in RcDom and converts to our DOM format.
//! This is simpler and more reliable than implementing TreeSink directly.

use crate::ParseError;
use fos_dom::{DomTree, Namespace, NodeId, ShadowRootInit, ShadowRootMode};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

/// HTML5 parser
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self
    }

    /// Parse a full document into `tree`, returning the document node
    pub fn parse_document(&self, tree: &mut DomTree, html: &str, url: &str) -> Result<NodeId, ParseError> {
        tracing::debug!("Parsing HTML document: {}", url);

        let dom = self.parse_rcdom(html)?;
        let document = tree.create_document(url);
        self.convert_node(&dom.document, tree, document)?;

        tracing::debug!("Arena holds {} nodes", tree.len());
        Ok(document)
    }

    /// Parse `html` as body content and append the resulting nodes to
    /// `parent`, which may be an element, a document or a shadow root.
    /// Returns the top-level nodes that were appended.
    pub fn parse_fragment(&self, tree: &mut DomTree, parent: NodeId, html: &str) -> Result<Vec<NodeId>, ParseError> {
        let dom = self.parse_rcdom(html)?;
        let Some(body) = find_body(&dom.document) else {
            return Ok(Vec::new());
        };

        let mut added = Vec::new();
        for child in body.children.borrow().iter() {
            if let Some(id) = self.convert_node(child, tree, parent)? {
                added.push(id);
            }
        }
        Ok(added)
    }

    fn parse_rcdom(&self, html: &str) -> Result<RcDom, ParseError> {
        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut html.as_bytes())?;
        Ok(dom)
    }

    /// Convert an RcDom node and its subtree, appending it to `parent`
    fn convert_node(&self, handle: &Handle, tree: &mut DomTree, parent: NodeId) -> Result<Option<NodeId>, ParseError> {
        match &handle.data {
            RcNodeData::Document => {
                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, parent)?;
                }
                Ok(None)
            }
            RcNodeData::Text { contents } => {
                let text = contents.borrow().to_string();
                if text.trim().is_empty() {
                    return Ok(None);
                }
                let id = tree.create_text(&text);
                tree.append_child(parent, id)?;
                Ok(Some(id))
            }
            RcNodeData::Comment { contents } => {
                let id = tree.create_comment(&contents.to_string());
                tree.append_child(parent, id)?;
                Ok(Some(id))
            }
            RcNodeData::Element { name, attrs, template_contents, .. } => {
                let namespace = Namespace::from_uri(&name.ns);
                let local: &str = &name.local;

                if namespace == Namespace::Html && local == "template" {
                    let mode = attrs
                        .borrow()
                        .iter()
                        .find(|a| &*a.name.local == "shadowrootmode")
                        .and_then(|a| ShadowRootMode::parse(&a.value));
                    let delegates_focus = attrs
                        .borrow()
                        .iter()
                        .any(|a| &*a.name.local == "shadowrootdelegatesfocus");
                    let content = template_contents.borrow().clone();

                    if let Some(mode) = mode {
                        let init = ShadowRootInit { mode, delegates_focus, ..Default::default() };
                        match tree.attach_shadow(parent, init) {
                            Ok(root) => {
                                let source = content.as_ref().unwrap_or(handle);
                                for child in source.children.borrow().iter() {
                                    self.convert_node(child, tree, root)?;
                                }
                                return Ok(None);
                            }
                            Err(err) => {
                                tracing::debug!("Declarative shadow root ignored: {}", err);
                            }
                        }
                    }
                }

                let id = tree.create_element_ns(namespace, local);
                for attr in attrs.borrow().iter() {
                    tree.set_attribute(id, &attr.name.local, &attr.value)?;
                }
                tree.append_child(parent, id)?;

                // Template contents stay inert and are not part of the tree
                if template_contents.borrow().is_none() {
                    for child in handle.children.borrow().iter() {
                        self.convert_node(child, tree, id)?;
                    }
                }
                Ok(Some(id))
            }
            RcNodeData::Doctype { .. } | RcNodeData::ProcessingInstruction { .. } => Ok(None),
        }
    }
}

impl Default for HtmlParser {
    fn default() -> Self {
        Self::new()
    }
}

fn find_body(document: &Handle) -> Option<Handle> {
    let html = find_child_element(document, "html")?;
    find_child_element(&html, "body")
}

fn find_child_element(parent: &Handle, local: &str) -> Option<Handle> {
    parent
        .children
        .borrow()
        .iter()
        .find(|child| matches!(&child.data, RcNodeData::Element { name, .. } if &*name.local == local))
        .cloned()
}
