//! Stylesheet naming.
//!
//! Every sheet gets a short, readable, unique name for the sheet list: the
//! path of its URL, the `title` of an inline `<style>`, or a synthetic
//! `style[N]` when neither is usable.

use livesheet_common::url::strip_scheme_and_host;
use std::collections::HashSet;

/// Longest name handed out, in characters.
pub const MAX_NAME_LEN: usize = 40;

/// What a name can be derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameCandidate<'a> {
    /// The sheet's source URL. Scheme and host are dropped.
    Url(&'a str),
    /// An inline sheet's `title` attribute.
    Title(&'a str),
    /// Nothing to go on.
    Anonymous,
}

/// Hands out unique names for one load session.
///
/// The synthetic counter is shared by the whole session, so sheets added by
/// the user later continue the `style[N]` sequence.
#[derive(Debug, Clone, Default)]
pub struct NameResolver {
    assigned: HashSet<String>,
    next_synthetic: usize,
}

impl NameResolver {
    /// An empty resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive a unique name from `candidate`.
    ///
    /// The candidate is truncated to [`MAX_NAME_LEN`] characters first, so
    /// uniqueness holds for what is actually returned. An empty or already
    /// taken candidate falls back to [`Self::next_synthetic`].
    pub fn resolve(&mut self, candidate: NameCandidate<'_>) -> String {
        let base = match candidate {
            NameCandidate::Url(url) => strip_scheme_and_host(url),
            NameCandidate::Title(title) => title,
            NameCandidate::Anonymous => "",
        };
        let name = truncate_chars(base, MAX_NAME_LEN);

        if name.is_empty() || self.assigned.contains(name) {
            return self.next_synthetic().1;
        }
        let _ = self.assigned.insert(name.to_string());
        name.to_string()
    }

    /// Take the next free `style[N]` name, returning `N` alongside it.
    pub fn next_synthetic(&mut self) -> (usize, String) {
        loop {
            let index = self.next_synthetic;
            self.next_synthetic += 1;
            let name = format!("style[{index}]");
            if self.assigned.insert(name.clone()) {
                return (index, name);
            }
        }
    }

    /// Whether `name` has been handed out.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.assigned.contains(name)
    }

    /// Number of names handed out.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    /// Whether no name has been handed out yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }
}

fn truncate_chars(value: &str, max: usize) -> &str {
    value
        .char_indices()
        .nth(max)
        .map_or(value, |(end, _)| &value[..end])
}
