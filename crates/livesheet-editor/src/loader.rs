//! [§ 4.2.4.3 Fetching and processing a resource from a link element](https://html.spec.whatwg.org/multipage/semantics.html#link-type-stylesheet)
//!
//! One load pass over a page: find every stylesheet, make each one an
//! editable `<style>` owned by a [`StylesheetEntry`], and report back once all
//! of them are ready.
//!
//! Linked sheets are fetched concurrently through the injected
//! [`ResourceFetcher`], rewritten so their relative references survive being
//! inlined, and swapped in for their `<link>` in place. A sheet that cannot be
//! fetched becomes a comment saying so; the load as a whole never fails.

use crate::barrier::{Arrival, JoinBarrier};
use crate::config::EditorConfig;
use crate::entry::{SheetOrigin, StylesheetEntry};
use crate::naming::{NameCandidate, NameResolver};
use futures::StreamExt;
use futures::stream::FuturesUnordered;
use livesheet_common::net::ResourceFetcher;
use livesheet_common::warning::{clear_warnings, warn_once};
use livesheet_css::{SourceKind, StylesheetSource, collect_stylesheet_sources, rewrite};
use livesheet_dom::{DomTree, ElementData, NodeId};

/// Content of the sheet created when a page has none.
pub const NO_STYLESHEET_PLACEHOLDER: &str = "/* No stylesheet found. */";

/// Content standing in for a sheet that could not be fetched.
///
/// `<` and `>` in the URL are escaped so the comment can never be mistaken
/// for markup.
#[must_use]
pub fn load_failure_comment(url: &str) -> String {
    format!(
        "/* Unable to load {} */",
        url.replace('<', "&lt;").replace('>', "&gt;")
    )
}

/// Content of a blank sheet added by the user.
#[must_use]
pub fn new_sheet_comment(index: usize) -> String {
    format!("/* Stylesheet: {index} */\n")
}

/// Attach `node` at the end of the document head, falling back to the
/// document element and then the document itself.
pub fn append_to_head(dom: &mut DomTree, node: NodeId) {
    let parent = dom
        .head()
        .or_else(|| dom.document_element())
        .unwrap_or(NodeId::ROOT);
    dom.append_child(parent, node);
}

/// Everything a finished load pass produced.
#[derive(Debug, Clone)]
pub struct LoadedSheets {
    /// Entries in document order.
    pub entries: Vec<StylesheetEntry>,
    /// Name of the first entry, the one the editor opens on.
    pub initial: String,
    /// The session's resolver, for names handed out after loading.
    pub names: NameResolver,
}

/// Runs the load pass over a page.
#[derive(Debug, Clone, Default)]
pub struct StylesheetLoader {
    base_url: Option<String>,
}

impl StylesheetLoader {
    /// A loader resolving `href`s against the configured base URL.
    #[must_use]
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
        }
    }

    /// Load every stylesheet in `dom` into an editable entry.
    ///
    /// # Algorithm
    ///
    /// STEP 1: Collect `<link rel="stylesheet">` and `<style>` elements in
    ///         document order. With none, add a placeholder `<style>`.
    ///
    /// STEP 2: Name each source. Inline sources settle immediately: the
    ///         element itself becomes the live node. External sources get a
    ///         fresh detached `<style>` (with the link's `media`) and one
    ///         fetch each.
    ///
    /// STEP 3: As fetches settle, in whatever order, fill the replacement with
    ///         the rewritten text (or a failure comment) and put it where the
    ///         `<link>` was.
    ///
    /// STEP 4: Complete once all N sources have settled.
    pub async fn load<F: ResourceFetcher>(&self, dom: &mut DomTree, fetcher: &F) -> LoadedSheets {
        // STEP 1
        clear_warnings();
        let mut sources = collect_stylesheet_sources(dom, self.base_url.as_deref());
        if sources.is_empty() {
            log::debug!("no stylesheets found, adding a placeholder");
            let style = dom.create_element(ElementData::new("style"));
            dom.set_text_content(style, NO_STYLESHEET_PLACEHOLDER);
            append_to_head(dom, style);
            sources.push(StylesheetSource {
                node: style,
                kind: SourceKind::Inline { title: None },
            });
        }
        log::debug!("loading {} stylesheet(s)", sources.len());

        // STEP 2
        let mut names = NameResolver::new();
        let mut barrier = JoinBarrier::new(sources.len());
        let mut entries = Vec::with_capacity(sources.len());
        let mut fetches = FuturesUnordered::new();

        for source in sources {
            match source.kind {
                SourceKind::Inline { title } => {
                    let candidate = title
                        .as_deref()
                        .map_or(NameCandidate::Anonymous, NameCandidate::Title);
                    entries.push(StylesheetEntry {
                        name: names.resolve(candidate),
                        origin: SheetOrigin::Inline,
                        live_node: source.node,
                    });
                    let _ = barrier.arrive();
                }
                SourceKind::External { href, media } => {
                    let style = dom.create_element(ElementData::new("style"));
                    if let Some(media) = &media {
                        dom.set_attribute(style, "media", media);
                    }
                    let slot = entries.len();
                    entries.push(StylesheetEntry {
                        name: names.resolve(NameCandidate::Url(&href)),
                        origin: SheetOrigin::External {
                            source_url: href.clone(),
                            media,
                        },
                        live_node: style,
                    });

                    let link = source.node;
                    fetches.push(async move {
                        let result = fetcher.fetch(&href).await;
                        (slot, link, href, result)
                    });
                }
            }
        }

        // STEP 3
        while !barrier.is_complete() {
            let Some((slot, link, href, result)) = fetches.next().await else {
                break;
            };

            let content = match result {
                Ok(text) => rewrite(&text, &href),
                Err(err) => {
                    let _ = warn_once("loader", &format!("Unable to load {href}: {err}"));
                    load_failure_comment(&href)
                }
            };

            let style = entries[slot].live_node;
            dom.set_text_content(style, &content);
            match dom.parent(link) {
                Some(parent) => dom.replace_child(parent, style, link),
                None => append_to_head(dom, style),
            }

            match barrier.arrive() {
                Arrival::Waiting(remaining) => {
                    log::debug!("loaded {href}, {remaining} sheet(s) outstanding");
                }
                Arrival::Complete | Arrival::AlreadyComplete => log::debug!("loaded {href}"),
            }
        }

        // STEP 4
        let initial = entries
            .first()
            .map(|entry| entry.name.clone())
            .unwrap_or_default();
        log::info!("loaded {} stylesheet(s), editing '{initial}'", entries.len());

        LoadedSheets {
            entries,
            initial,
            names,
        }
    }
}
