//! Headless model of the editor's text box.
//!
//! Mirrors the parts of a `<textarea>` the editor relies on: its value, the
//! selection (in characters), the vertical scroll offset and focus. Replacing
//! the whole value behaves like a textarea does: the caret moves to the end and
//! the scroll offset jumps back to the top.

/// Editor text box state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBox {
    value: String,
    selection_start: usize,
    selection_end: usize,
    scroll_top: u32,
    focused: bool,
}

impl TextBox {
    /// An empty, unfocused text box.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the whole text. The caret moves to the end and the view
    /// scrolls back to the top.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        let end = self.char_len();
        self.selection_start = end;
        self.selection_end = end;
        self.scroll_top = 0;
    }

    /// Length of the text in characters.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    /// Selection as `(start, end)` character offsets.
    #[must_use]
    pub const fn selection(&self) -> (usize, usize) {
        (self.selection_start, self.selection_end)
    }

    /// Set the selection, clamped to the text. A reversed range collapses to
    /// its end, as `setSelectionRange` does.
    pub fn set_selection_range(&mut self, start: usize, end: usize) {
        let len = self.char_len();
        let end = end.min(len);
        self.selection_start = start.min(end);
        self.selection_end = end;
    }

    /// Type `text` over the selection, leaving the caret after it.
    pub fn insert_at_cursor(&mut self, text: &str) {
        let start = self.byte_offset(self.selection_start);
        let end = self.byte_offset(self.selection_end);
        self.value.replace_range(start..end, text);
        let caret = self.selection_start + text.chars().count();
        self.selection_start = caret;
        self.selection_end = caret;
    }

    /// The text with `insert` spliced in at character offset `at`.
    #[must_use]
    pub fn value_with_inserted(&self, at: usize, insert: &str) -> String {
        let at = self.byte_offset(at);
        let mut value = String::with_capacity(self.value.len() + insert.len());
        value.push_str(&self.value[..at]);
        value.push_str(insert);
        value.push_str(&self.value[at..]);
        value
    }

    /// Vertical scroll offset.
    #[must_use]
    pub const fn scroll_top(&self) -> u32 {
        self.scroll_top
    }

    /// Scroll to `offset`.
    pub fn set_scroll_top(&mut self, offset: u32) {
        self.scroll_top = offset;
    }

    /// Give the text box input focus.
    pub fn focus(&mut self) {
        self.focused = true;
    }

    /// Take input focus away.
    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Whether the text box has input focus.
    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.value
            .char_indices()
            .nth(chars)
            .map_or(self.value.len(), |(offset, _)| offset)
    }
}
