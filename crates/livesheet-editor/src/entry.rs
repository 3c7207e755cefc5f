//! The editable record behind each stylesheet.

use livesheet_dom::{DomTree, NodeId};
use strum_macros::Display;

/// Where an entry's stylesheet came from.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum SheetOrigin {
    /// Fetched from a `<link rel="stylesheet">`.
    #[strum(serialize = "external")]
    External {
        /// URL the sheet was fetched from.
        source_url: String,
        /// The link's `media` attribute, carried over to the replacement.
        media: Option<String>,
    },
    /// Already inline in the page, or added by the user.
    #[strum(serialize = "inline")]
    Inline,
}

/// One editable stylesheet.
///
/// The entry owns `live_node`: the one `<style>` element through which this
/// sheet affects the page. Its text content is the sheet's content; nothing
/// else holds a copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StylesheetEntry {
    /// Unique name within the session.
    pub name: String,
    /// Where the sheet came from.
    pub origin: SheetOrigin,
    /// The `<style>` element rendering this sheet.
    pub live_node: NodeId,
}

impl StylesheetEntry {
    /// Source URL for external sheets.
    #[must_use]
    pub fn source_url(&self) -> Option<&str> {
        match &self.origin {
            SheetOrigin::External { source_url, .. } => Some(source_url),
            SheetOrigin::Inline => None,
        }
    }

    /// Inherited media query for external sheets.
    #[must_use]
    pub fn media(&self) -> Option<&str> {
        match &self.origin {
            SheetOrigin::External { media, .. } => media.as_deref(),
            SheetOrigin::Inline => None,
        }
    }

    /// Current CSS text, read from the live node.
    #[must_use]
    pub fn content(&self, dom: &DomTree) -> String {
        dom.text_content(self.live_node)
    }
}
