//! Shared fixtures for the editor tests.

#![allow(dead_code)]

use livesheet_editor::{FetchError, ResourceFetcher};
use livesheet_dom::{DomTree, ElementData, NodeId};
use std::cell::RefCell;
use std::collections::HashMap;

pub const BASE_URL: &str = "https://site.test/index.html";

/// Serves canned bodies and records every URL asked for.
#[derive(Default)]
pub struct MockFetcher {
    bodies: HashMap<String, Result<String, String>>,
    pub requested: RefCell<Vec<String>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serve(mut self, url: &str, body: &str) -> Self {
        let _ = self.bodies.insert(url.to_string(), Ok(body.to_string()));
        self
    }

    pub fn fail(mut self, url: &str, status: &str) -> Self {
        let _ = self.bodies.insert(url.to_string(), Err(status.to_string()));
        self
    }
}

impl ResourceFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.requested.borrow_mut().push(url.to_string());
        match self.bodies.get(url) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(status)) => Err(FetchError::Status(status.clone())),
            None => Err(FetchError::Status("404 Not Found".to_string())),
        }
    }
}

pub fn add(tree: &mut DomTree, parent: NodeId, data: ElementData) -> NodeId {
    let id = tree.create_element(data);
    tree.append_child(parent, id);
    id
}

pub fn add_link(tree: &mut DomTree, href: &str) -> NodeId {
    let head = tree.head().unwrap();
    add(
        tree,
        head,
        ElementData::new("link")
            .with_attr("rel", "stylesheet")
            .with_attr("href", href),
    )
}

pub fn add_style(tree: &mut DomTree, title: Option<&str>, css: &str) -> NodeId {
    let head = tree.head().unwrap();
    let mut data = ElementData::new("style");
    if let Some(title) = title {
        data = data.with_attr("title", title);
    }
    let style = add(tree, head, data);
    tree.set_text_content(style, css);
    style
}

/// A page with two titled inline sheets, `a` and `b`.
pub fn two_sheet_page() -> DomTree {
    let mut tree = DomTree::with_skeleton();
    add_style(&mut tree, Some("a"), "a { color: red }");
    add_style(&mut tree, Some("b"), "b { color: blue }");
    tree
}
