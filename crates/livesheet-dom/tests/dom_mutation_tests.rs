//! Tests for DOM tree mutation methods: remove_child, insert_before,
//! replace_child and the textContent accessors.

#![allow(unused_results)]

use livesheet_dom::{DomTree, ElementData, NodeId, NodeType};

/// Helper to create an element node and return its NodeId.
fn alloc_element(tree: &mut DomTree, tag: &str) -> NodeId {
    tree.create_element(ElementData::new(tag))
}

fn parent_with_three(tree: &mut DomTree) -> (NodeId, NodeId, NodeId, NodeId) {
    let parent = alloc_element(tree, "head");
    tree.append_child(NodeId::ROOT, parent);

    let a = alloc_element(tree, "link");
    let b = alloc_element(tree, "style");
    let c = alloc_element(tree, "meta");
    tree.append_child(parent, a);
    tree.append_child(parent, b);
    tree.append_child(parent, c);
    (parent, a, b, c)
}

// ========== remove_child ==========

#[test]
fn test_remove_child_single_child() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let child = alloc_element(&mut tree, "p");
    tree.append_child(parent, child);

    tree.remove_child(parent, child);

    assert_eq!(tree.children(parent).len(), 0);
    assert_eq!(tree.parent(child), None);
    assert_eq!(tree.prev_sibling(child), None);
    assert_eq!(tree.next_sibling(child), None);
    assert!(!tree.is_connected(child));
}

#[test]
fn test_remove_child_middle_of_three() {
    let mut tree = DomTree::new();
    let (parent, a, b, c) = parent_with_three(&mut tree);

    tree.remove_child(parent, b);

    assert_eq!(tree.children(parent), &[a, c]);
    assert_eq!(tree.next_sibling(a), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(a));
}

#[test]
fn test_remove_child_not_a_child_is_noop() {
    let mut tree = DomTree::new();
    let (parent, a, b, c) = parent_with_three(&mut tree);
    let stranger = alloc_element(&mut tree, "p");

    tree.remove_child(parent, stranger);

    assert_eq!(tree.children(parent), &[a, b, c]);
}

// ========== insert_before ==========

#[test]
fn test_insert_before_first_child() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let existing = alloc_element(&mut tree, "b");
    tree.append_child(parent, existing);

    let new_child = alloc_element(&mut tree, "a");
    tree.insert_before(parent, new_child, existing);

    assert_eq!(tree.children(parent), &[new_child, existing]);
    assert_eq!(tree.parent(new_child), Some(parent));
    assert_eq!(tree.next_sibling(new_child), Some(existing));
    assert_eq!(tree.prev_sibling(new_child), None);
    assert_eq!(tree.prev_sibling(existing), Some(new_child));
}

#[test]
fn test_insert_before_moves_attached_node() {
    let mut tree = DomTree::new();
    let (parent, a, b, c) = parent_with_three(&mut tree);

    tree.insert_before(parent, c, a);

    assert_eq!(tree.children(parent), &[c, a, b]);
    assert_eq!(tree.next_sibling(b), None);
    assert_eq!(tree.prev_sibling(a), Some(c));
}

// ========== replace_child ==========

#[test]
fn test_replace_child_keeps_position() {
    let mut tree = DomTree::new();
    let (parent, a, b, c) = parent_with_three(&mut tree);

    let replacement = alloc_element(&mut tree, "style");
    tree.replace_child(parent, replacement, a);

    assert_eq!(tree.children(parent), &[replacement, b, c]);
    assert_eq!(tree.prev_sibling(replacement), None);
    assert_eq!(tree.next_sibling(replacement), Some(b));
    assert_eq!(tree.prev_sibling(b), Some(replacement));
    assert!(!tree.is_connected(a));
    assert!(tree.is_connected(replacement));
}

#[test]
fn test_replace_last_child() {
    let mut tree = DomTree::new();
    let (parent, a, b, c) = parent_with_three(&mut tree);

    let replacement = alloc_element(&mut tree, "style");
    tree.replace_child(parent, replacement, c);

    assert_eq!(tree.children(parent), &[a, b, replacement]);
    assert_eq!(tree.next_sibling(b), Some(replacement));
    assert_eq!(tree.parent(c), None);
}

// ========== text content ==========

#[test]
fn test_set_text_content_replaces_in_place() {
    let mut tree = DomTree::with_skeleton();
    let style = alloc_element(&mut tree, "style");
    let head = tree.head().unwrap();
    tree.append_child(head, style);

    tree.set_text_content(style, "a { color: red }");
    let before = tree.len();
    tree.set_text_content(style, "a { color: blue }");

    assert_eq!(tree.text_content(style), "a { color: blue }");
    assert_eq!(tree.len(), before);
    assert_eq!(tree.children(style).len(), 1);
}

#[test]
fn test_set_text_content_empty_clears() {
    let mut tree = DomTree::new();
    let style = alloc_element(&mut tree, "style");
    tree.set_text_content(style, "body {}");
    tree.set_text_content(style, "");

    assert!(tree.children(style).is_empty());
    assert_eq!(tree.text_content(style), "");
}

#[test]
fn test_text_content_concatenates_text_children() {
    let mut tree = DomTree::new();
    let style = alloc_element(&mut tree, "style");
    let first = tree.alloc(NodeType::Text("a {}".to_string()));
    let comment = tree.alloc(NodeType::Comment("ignored".to_string()));
    let second = tree.alloc(NodeType::Text("\nb {}".to_string()));
    tree.append_child(style, first);
    tree.append_child(style, comment);
    tree.append_child(style, second);

    assert_eq!(tree.text_content(style), "a {}\nb {}");
}

// ========== traversal ==========

#[test]
fn test_iter_all_is_tree_order() {
    let mut tree = DomTree::with_skeleton();
    let head = tree.head().unwrap();
    let link = alloc_element(&mut tree, "link");
    let style = alloc_element(&mut tree, "style");
    tree.append_child(head, link);
    tree.append_child(head, style);

    let tags: Vec<String> = tree
        .iter_all()
        .filter_map(|id| tree.as_element(id).map(|e| e.tag_name.clone()))
        .collect();

    assert_eq!(tags, ["html", "head", "link", "style", "body"]);
}

#[test]
fn test_attributes_roundtrip() {
    let mut tree = DomTree::new();
    let link = tree.create_element(ElementData::new("link").with_attr("rel", "stylesheet"));

    assert_eq!(tree.attribute(link, "rel"), Some("stylesheet"));
    tree.set_attribute(link, "media", "print");
    assert_eq!(tree.attribute(link, "media"), Some("print"));
    assert!(tree.remove_attribute(link, "media"));
    assert!(!tree.remove_attribute(link, "media"));
}
