//! The overlay shell.
//!
//! Nothing is loaded until the user first asks for the editor. The first
//! toggle runs the load pass over the page and opens a session on it; every
//! toggle after that goes straight to the session.

use crate::config::EditorConfig;
use crate::loader::StylesheetLoader;
use crate::session::EditorSession;
use livesheet_common::net::ResourceFetcher;
use livesheet_dom::DomTree;
use std::mem;

#[derive(Debug)]
enum OverlayState {
    Unloaded(DomTree),
    Ready(Box<EditorSession>),
}

/// Lazily loaded editor for one page.
#[derive(Debug)]
pub struct Overlay {
    config: EditorConfig,
    state: OverlayState,
}

impl Overlay {
    /// An overlay over `dom`. Nothing is fetched yet.
    #[must_use]
    pub const fn new(config: EditorConfig, dom: DomTree) -> Self {
        Self {
            config,
            state: OverlayState::Unloaded(dom),
        }
    }

    /// Whether the load pass has run.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self.state, OverlayState::Ready(_))
    }

    /// Show or hide the editor, loading the page's stylesheets on first use.
    pub async fn toggle<F: ResourceFetcher>(&mut self, fetcher: &F) {
        if let OverlayState::Unloaded(dom) = &mut self.state {
            let loaded = StylesheetLoader::new(&self.config).load(dom, fetcher).await;
            let session = EditorSession::new(self.config.clone(), mem::take(dom), loaded);
            self.state = OverlayState::Ready(Box::new(session));
        }
        if let OverlayState::Ready(session) = &mut self.state {
            session.toggle();
        }
    }

    /// The session, once loaded.
    #[must_use]
    pub fn session(&mut self) -> Option<&mut EditorSession> {
        match &mut self.state {
            OverlayState::Ready(session) => Some(session),
            OverlayState::Unloaded(_) => None,
        }
    }

    /// The page, whether or not it has been loaded.
    #[must_use]
    pub fn dom(&self) -> &DomTree {
        match &self.state {
            OverlayState::Unloaded(dom) => dom,
            OverlayState::Ready(session) => session.dom(),
        }
    }
}
