//! Edge case tests for fos-html
//!
//! Malformed markup and unusual input.

use fos_html::parse;

// ============================================================================
// EMPTY AND MINIMAL INPUT
// ============================================================================

#[test]
fn test_parse_null_bytes() {
    let (tree, _) = parse("Hello\0World").unwrap();
    assert!(tree.len() > 1);
}

#[test]
fn test_parse_only_whitespace() {
    let (tree, document) = parse("   \t\n\r\n   ").unwrap();
    assert!(tree.body(document).is_some());
}

#[test]
fn test_parse_only_doctype() {
    let (tree, document) = parse("<!DOCTYPE html>").unwrap();
    assert!(tree.document_element(document).is_some());
}

// ============================================================================
// MALFORMED HTML
// ============================================================================

#[test]
fn test_parse_unclosed_tags() {
    let (tree, document) = parse("<div id=a><p><span id=s>text").unwrap();
    let span = tree.get_element_by_id(document, "s").unwrap();
    let div = tree.get_element_by_id(document, "a").unwrap();
    assert!(tree.contains(div, span));
}

#[test]
fn test_parse_mismatched_tags() {
    let (tree, _) = parse("<div><p></div></p>").unwrap();
    assert!(tree.len() > 1);
}

#[test]
fn test_parse_orphan_closing_tag() {
    let (tree, document) = parse("</div>").unwrap();
    let body = tree.body(document).unwrap();
    assert_eq!(tree.child_elements(body).count(), 0);
}

#[test]
fn test_parse_duplicate_attributes() {
    // First occurrence wins
    let (tree, document) = parse(r#"<div id="x" tabindex="1" tabindex="2"></div>"#).unwrap();
    let div = tree.get_element_by_id(document, "x").unwrap();
    assert_eq!(tree.get_attribute(div, "tabindex"), Some("1"));
}

// ============================================================================
// TEMPLATES AND COMMENTS
// ============================================================================

#[test]
fn test_template_contents_not_in_tree() {
    let (tree, document) = parse("<template><button id=b></button></template>").unwrap();
    assert!(tree.get_element_by_id(document, "b").is_none());
}

#[test]
fn test_comments_kept() {
    let (tree, document) = parse("<div id=d><!-- note --></div>").unwrap();
    let div = tree.get_element_by_id(document, "d").unwrap();
    let (_, comment) = tree.children(div).next().unwrap();
    assert_eq!(comment.node_type(), fos_dom::NodeType::Comment);
}

#[test]
fn test_deeply_nested() {
    let html = "<div>".repeat(200) + "<button id=deep></button>" + &"</div>".repeat(200);
    let (tree, document) = parse(&html).unwrap();
    let button = tree.get_element_by_id(document, "deep").unwrap();
    assert!(tree.is_connected(button));
}
