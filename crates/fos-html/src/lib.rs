//! fOS HTML Parser
//!
//! HTML5 parsing on top of html5ever, converted into the `fos-dom` arena.

mod parser;

pub use fos_dom::{DomTree, NodeId};
pub use parser::HtmlParser;

/// Parse an HTML string into a fresh tree, returning `(tree, document)`
pub fn parse(html: &str) -> Result<(DomTree, NodeId), ParseError> {
    let mut tree = DomTree::new();
    let document = HtmlParser::new().parse_document(&mut tree, html, "about:blank")?;
    Ok((tree, document))
}

/// Parse error
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Failed to read HTML input: {0}")]
    Io(#[from] std::io::Error),

    #[error("DOM construction failed: {0}")]
    Dom(#[from] fos_dom::DomError),
}
