//! Tests for stylesheet source discovery.

#![allow(unused_results)]

use livesheet_css::{SourceKind, StylesheetSource, collect_stylesheet_sources};
use livesheet_dom::{DomTree, ElementData, NodeId};

fn add(tree: &mut DomTree, parent: NodeId, data: ElementData) -> NodeId {
    let id = tree.create_element(data);
    tree.append_child(parent, id);
    id
}

#[test]
fn test_sources_in_document_order() {
    let mut tree = DomTree::with_skeleton();
    let head = tree.head().unwrap();
    let html = tree.document_element().unwrap();
    let body = *tree.children(html).last().unwrap();

    let link = add(
        &mut tree,
        head,
        ElementData::new("link")
            .with_attr("rel", "stylesheet")
            .with_attr("href", "css/app.css")
            .with_attr("media", "screen"),
    );
    let style = add(&mut tree, head, ElementData::new("style").with_attr("title", "theme"));
    let late = add(&mut tree, body, ElementData::new("STYLE"));

    let sources = collect_stylesheet_sources(&tree, Some("https://site.test/index.html"));

    assert_eq!(
        sources,
        vec![
            StylesheetSource {
                node: link,
                kind: SourceKind::External {
                    href: "https://site.test/css/app.css".to_string(),
                    media: Some("screen".to_string()),
                },
            },
            StylesheetSource {
                node: style,
                kind: SourceKind::Inline {
                    title: Some("theme".to_string())
                },
            },
            StylesheetSource {
                node: late,
                kind: SourceKind::Inline { title: None },
            },
        ]
    );
}

#[test]
fn test_non_stylesheet_links_are_ignored() {
    let mut tree = DomTree::with_skeleton();
    let head = tree.head().unwrap();
    let _ = add(
        &mut tree,
        head,
        ElementData::new("link").with_attr("rel", "icon").with_attr("href", "favicon.ico"),
    );
    let _ = add(
        &mut tree,
        head,
        ElementData::new("link").with_attr("rel", "stylesheet").with_attr("href", "  "),
    );
    let alternate = add(
        &mut tree,
        head,
        ElementData::new("link")
            .with_attr("rel", "Alternate StyleSheet")
            .with_attr("href", "https://cdn.test/dark.css"),
    );

    let sources = collect_stylesheet_sources(&tree, None);

    assert_eq!(sources.len(), 1);
    assert_eq!(sources[0].node, alternate);
}

#[test]
fn test_detached_elements_are_not_sources() {
    let mut tree = DomTree::with_skeleton();
    let _detached = tree.create_element(ElementData::new("style"));

    assert!(collect_stylesheet_sources(&tree, None).is_empty());
}
