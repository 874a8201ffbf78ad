//! Documents and frames
//!
//! Documents live in the same arena as their elements. A frame element
//! links to its nested document through `ElementData::content_document`,
//! and the nested document remembers its frame owner.

use crate::{DomError, DomResult, DomTree, NodeData, NodeId};
use url::Url;

/// Document node data
#[derive(Debug, Clone)]
pub struct DocumentData {
    /// Document URL
    pub url: String,
    /// Embedding frame element, for nested documents
    pub frame_owner: NodeId,
}

/// Nested document reachable from a frame element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameDocument {
    pub document: NodeId,
    /// Whether the embedder may script into the nested document
    pub same_origin: bool,
}

impl DomTree {
    /// Create a new, empty document
    pub fn create_document(&mut self, url: &str) -> NodeId {
        self.push(NodeData::Document(DocumentData {
            url: url.to_string(),
            frame_owner: NodeId::NONE,
        }))
    }

    /// Create a document with the basic `html`/`head`/`body` structure,
    /// returning `(document, body)`
    pub fn create_html_document(&mut self, url: &str) -> (NodeId, NodeId) {
        let document = self.create_document(url);
        let html = self.create_element("html");
        let head = self.create_element("head");
        let body = self.create_element("body");
        self.link_child(document, html, None);
        self.link_child(html, head, None);
        self.link_child(html, body, None);
        (document, body)
    }

    /// Document URL
    pub fn document_url(&self, document: NodeId) -> Option<&str> {
        self.get(document)?.as_document().map(|d| d.url.as_str())
    }

    /// Document that owns `id`, following shadow roots to their hosts
    pub fn owner_document(&self, id: NodeId) -> Option<NodeId> {
        let mut root = self.root_node(id);
        loop {
            match self.get(root).map(|n| &n.data) {
                Some(NodeData::Document(_)) => return Some(root),
                Some(NodeData::ShadowRoot(shadow)) => root = self.root_node(shadow.host),
                _ => return None,
            }
        }
    }

    /// The `<html>` element
    pub fn document_element(&self, document: NodeId) -> Option<NodeId> {
        self.child_elements(document).next()
    }

    /// The `<body>` element
    pub fn body(&self, document: NodeId) -> Option<NodeId> {
        let html = self.document_element(document)?;
        self.child_elements(html)
            .find(|&id| self.element(id).is_some_and(|e| e.is_html("body")))
    }

    /// Load `document` into a frame element
    pub fn attach_frame_document(&mut self, frame: NodeId, document: NodeId) -> DomResult<()> {
        let is_frame = self
            .element(frame)
            .is_some_and(|e| e.is_html("iframe") || e.is_html("frame"));
        if !is_frame {
            return Err(DomError::NotAFrame(frame));
        }
        match self.get(document).map(|n| &n.data) {
            Some(NodeData::Document(_)) => {}
            Some(_) => return Err(DomError::NotADocument(document)),
            None => return Err(DomError::NodeNotFound(document)),
        }

        // A document is loaded in at most one frame at a time
        if let Some(previous) = self.element(frame).and_then(|e| e.content_document.to_option()) {
            self.set_frame_owner(previous, NodeId::NONE);
        }
        if let Some(owner) = self.frame_owner(document) {
            if let Some(elem) = self.element_mut(owner) {
                elem.content_document = NodeId::NONE;
            }
        }
        self.set_frame_owner(document, frame);
        if let Some(elem) = self.element_mut(frame) {
            elem.content_document = document;
        }
        Ok(())
    }

    fn set_frame_owner(&mut self, document: NodeId, frame: NodeId) {
        if let Some(NodeData::Document(data)) = self.get_mut(document).map(|n| &mut n.data) {
            data.frame_owner = frame;
        }
    }

    /// Frame element embedding `document`
    pub fn frame_owner(&self, document: NodeId) -> Option<NodeId> {
        self.get(document)?.as_document()?.frame_owner.to_option()
    }

    /// Nested document of a frame element. Frames outside a document have
    /// no browsing context.
    pub fn frame_document(&self, frame: NodeId) -> Option<FrameDocument> {
        let document = self.element(frame)?.content_document.to_option()?;
        let embedder = self.owner_document(frame)?;
        Some(FrameDocument {
            document,
            same_origin: self.same_origin(embedder, document),
        })
    }

    /// Origin comparison between two documents. `about:blank` and
    /// `about:srcdoc` documents inherit the embedder's origin; opaque
    /// origins never match.
    pub fn same_origin(&self, embedder: NodeId, document: NodeId) -> bool {
        let (Some(outer), Some(inner)) = (self.document_url(embedder), self.document_url(document)) else {
            return false;
        };
        if matches!(inner, "" | "about:blank" | "about:srcdoc") {
            return true;
        }
        match (Url::parse(outer), Url::parse(inner)) {
            (Ok(outer), Ok(inner)) => {
                let (outer, inner) = (outer.origin(), inner.origin());
                outer.is_tuple() && outer == inner
            }
            _ => {
                tracing::trace!("Unparseable document URL, treating frame as cross-origin");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_document_structure() {
        let mut tree = DomTree::new();
        let (document, body) = tree.create_html_document("https://example.com/");
        assert_eq!(tree.body(document), Some(body));
        assert!(tree.is_connected(body));
        assert_eq!(tree.owner_document(body), Some(document));
        assert_eq!(tree.document_url(document), Some("https://example.com/"));
    }

    #[test]
    fn test_frame_origin() {
        let mut tree = DomTree::new();
        let (_, body) = tree.create_html_document("https://example.com/page");
        let frame = tree.create_element("iframe");
        tree.append_child(body, frame).unwrap();

        let (same, _) = tree.create_html_document("https://example.com/inner");
        tree.attach_frame_document(frame, same).unwrap();
        assert_eq!(
            tree.frame_document(frame),
            Some(FrameDocument { document: same, same_origin: true })
        );
        assert_eq!(tree.frame_owner(same), Some(frame));

        let (other, _) = tree.create_html_document("https://other.example/");
        tree.attach_frame_document(frame, other).unwrap();
        assert!(!tree.frame_document(frame).unwrap().same_origin);
    }

    #[test]
    fn test_reattach_clears_previous_links() {
        let mut tree = DomTree::new();
        let (_, body) = tree.create_html_document("https://example.com/");
        let first = tree.create_element("iframe");
        let second = tree.create_element("iframe");
        tree.append_child(body, first).unwrap();
        tree.append_child(body, second).unwrap();

        let (old, _) = tree.create_html_document("https://example.com/old");
        let (new, _) = tree.create_html_document("https://example.com/new");
        tree.attach_frame_document(first, old).unwrap();
        tree.attach_frame_document(first, new).unwrap();
        assert_eq!(tree.frame_owner(old), None);
        assert_eq!(tree.frame_owner(new), Some(first));

        tree.attach_frame_document(second, new).unwrap();
        assert_eq!(tree.frame_owner(new), Some(second));
        assert_eq!(tree.frame_document(first), None);
    }

    #[test]
    fn test_about_blank_inherits_origin() {
        let mut tree = DomTree::new();
        let (outer, _) = tree.create_html_document("https://example.com/");
        let (blank, _) = tree.create_html_document("about:blank");
        assert!(tree.same_origin(outer, blank));

        let (data, _) = tree.create_html_document("data:text/html,hi");
        assert!(!tree.same_origin(outer, data));
    }

    #[test]
    fn test_attach_frame_requires_frame_element() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let document = tree.create_document("about:blank");
        assert_eq!(tree.attach_frame_document(div, document), Err(DomError::NotAFrame(div)));
    }

    #[test]
    fn test_detached_frame_has_no_document() {
        let mut tree = DomTree::new();
        let frame = tree.create_element("iframe");
        let document = tree.create_document("about:blank");
        tree.attach_frame_document(frame, document).unwrap();
        assert_eq!(tree.frame_document(frame), None);
    }
}
