//! The live edit session.
//!
//! Once the loader has made every stylesheet editable, an [`EditorSession`]
//! owns the page and the editor text and keeps the two in step:
//!
//! - Key-ups push a debounce deadline forward; when typing pauses the editor
//!   text is written into the current sheet's live `<style>`.
//! - Hiding the overlay writes immediately, so the page always shows the last
//!   edit once the editor is out of the way.
//! - Tab indents instead of moving focus, without making the view jump.
//!
//! Switching to another sheet never writes the sheet being left; only the
//! debounce and hiding do.

use crate::config::EditorConfig;
use crate::debounce::{Debouncer, Schedule, sleep_until_deadline};
use crate::entry::{SheetOrigin, StylesheetEntry};
use crate::keys::{KeyCode, TAB};
use crate::loader::{LoadedSheets, append_to_head, new_sheet_comment};
use crate::naming::NameResolver;
use crate::textbox::TextBox;
use livesheet_css::unminify;
use livesheet_dom::{DomTree, ElementData};
use strum_macros::Display;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::Instant;

/// Attribute set on the document element while animations are paused.
pub const NO_ANIMATIONS_ATTR: &str = "data-ls-na";

/// Whether the overlay is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Visibility {
    /// Overlay hidden. The initial state.
    Hidden,
    /// Overlay shown, editor focused.
    Visible,
}

/// Whether a key press was consumed by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The host should run its default action.
    Default,
    /// The editor handled the key; suppress the default action.
    Handled,
}

/// Input the session reacts to, as delivered by the host UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// Toggle request from a shortcut or a host message.
    Toggle,
    /// A key went down in the editor.
    KeyDown(KeyCode),
    /// Text typed into the editor.
    Input(String),
    /// A key came up in the editor.
    KeyUp(KeyCode),
    /// The editor was clicked.
    Click,
    /// The editor was scrolled to an offset.
    Scroll(u32),
    /// The caret or selection moved.
    Select(usize, usize),
    /// Another sheet was picked in the sheet list.
    SelectSheet(String),
    /// The "add" button was pressed.
    AddSheet,
    /// The "no animations" switch changed.
    PauseAnimations(bool),
}

/// Editor state for one page, from the end of loading onwards.
#[derive(Debug)]
pub struct EditorSession {
    config: EditorConfig,
    indent_unit: String,
    dom: DomTree,
    entries: Vec<StylesheetEntry>,
    names: NameResolver,
    current: Option<String>,
    editor: TextBox,
    visibility: Visibility,
    debouncer: Debouncer,
    scroll_snapshot: u32,
    commits: usize,
}

impl EditorSession {
    /// Take over a loaded page, opening the editor on the initial sheet.
    /// The overlay starts hidden.
    #[must_use]
    pub fn new(config: EditorConfig, dom: DomTree, loaded: LoadedSheets) -> Self {
        let mut session = Self {
            indent_unit: config.indent_unit(),
            debouncer: Debouncer::new(config.debounce()),
            config,
            dom,
            entries: loaded.entries,
            names: loaded.names,
            current: None,
            editor: TextBox::new(),
            visibility: Visibility::Hidden,
            scroll_snapshot: 0,
            commits: 0,
        };
        session.set_current(&loaded.initial);
        session
    }

    // ========== accessors ==========

    /// Current overlay state.
    #[must_use]
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Whether the overlay is showing.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        matches!(self.visibility, Visibility::Visible)
    }

    /// Name of the sheet in the editor.
    #[must_use]
    pub fn current_name(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Every entry, in sheet-list order.
    #[must_use]
    pub fn entries(&self) -> &[StylesheetEntry] {
        &self.entries
    }

    /// Sheet names in sheet-list order.
    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    /// Look an entry up by name.
    #[must_use]
    pub fn entry(&self, name: &str) -> Option<&StylesheetEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// What the page currently renders for `name`.
    #[must_use]
    pub fn content(&self, name: &str) -> Option<String> {
        self.entry(name).map(|entry| entry.content(&self.dom))
    }

    /// The page.
    #[must_use]
    pub const fn dom(&self) -> &DomTree {
        &self.dom
    }

    /// Hand the page back, ending the session.
    #[must_use]
    pub fn into_dom(self) -> DomTree {
        self.dom
    }

    /// The editor text box.
    #[must_use]
    pub const fn editor(&self) -> &TextBox {
        &self.editor
    }

    /// How many times editor text has been written into the page.
    #[must_use]
    pub const fn commit_count(&self) -> usize {
        self.commits
    }

    /// Whether a debounced write is waiting.
    #[must_use]
    pub const fn has_pending_commit(&self) -> bool {
        self.debouncer.is_pending()
    }

    // ========== state machine ==========

    /// Show or hide the overlay.
    ///
    /// Hiding writes the editor text into the page at once, dropping any
    /// pending debounce.
    pub fn toggle(&mut self) {
        match self.visibility {
            Visibility::Hidden => {
                self.visibility = Visibility::Visible;
                self.editor.focus();
            }
            Visibility::Visible => {
                self.visibility = Visibility::Hidden;
                self.editor.blur();
                let _ = self.debouncer.cancel();
                self.commit();
            }
        }
        log::debug!("overlay {}", self.visibility);
    }

    /// Open `name` in the editor. Returns `false` for an unknown name.
    ///
    /// Nothing is written for the sheet being left. A pending debounce is
    /// dropped so it cannot fire against the newly opened sheet.
    pub fn select_sheet(&mut self, name: &str) -> bool {
        if self.entry(name).is_none() {
            return false;
        }
        if self.debouncer.cancel() {
            log::debug!("switching sheets, pending edit discarded");
        }
        self.set_current(name);
        true
    }

    /// Add a blank sheet at the end of the head and open it.
    pub fn add_sheet(&mut self) -> String {
        let (index, name) = self.names.next_synthetic();
        let style = self.dom.create_element(ElementData::new("style"));
        self.dom.set_text_content(style, &new_sheet_comment(index));
        append_to_head(&mut self.dom, style);
        self.entries.push(StylesheetEntry {
            name: name.clone(),
            origin: SheetOrigin::Inline,
            live_node: style,
        });
        let _ = self.select_sheet(&name);
        name
    }

    /// Pause or resume page animations while editing.
    pub fn set_animations_paused(&mut self, paused: bool) {
        let Some(root) = self.dom.document_element() else {
            return;
        };
        if paused {
            self.dom.set_attribute(root, NO_ANIMATIONS_ATTR, "");
        } else {
            let _ = self.dom.remove_attribute(root, NO_ANIMATIONS_ATTR);
        }
    }

    // ========== editor input ==========

    /// A key went down. The toggle key toggles; Tab indents. Every key-down
    /// records the scroll offset.
    pub fn key_down(&mut self, key: KeyCode) -> KeyOutcome {
        if key == self.config.toggle_key {
            self.toggle();
            return KeyOutcome::Handled;
        }
        if self.visibility == Visibility::Hidden {
            return KeyOutcome::Default;
        }

        let outcome = if key == TAB {
            self.insert_indent();
            KeyOutcome::Handled
        } else {
            KeyOutcome::Default
        };
        self.scroll_snapshot = self.editor.scroll_top();
        outcome
    }

    /// Text typed at the caret.
    pub fn input(&mut self, text: &str) {
        if self.visibility == Visibility::Visible {
            self.editor.insert_at_cursor(text);
        }
    }

    /// A key came up: schedule writing the editor text into the page.
    pub fn key_up(&mut self, key: KeyCode) {
        if key == self.config.toggle_key
            || self.current.is_none()
            || self.visibility == Visibility::Hidden
        {
            return;
        }
        match self.debouncer.schedule() {
            Schedule::Immediate => self.commit(),
            Schedule::Deferred(_) => log::trace!("commit deferred"),
        }
    }

    /// The editor was clicked: record the scroll offset.
    pub fn click(&mut self) {
        self.scroll_snapshot = self.editor.scroll_top();
    }

    /// The editor was scrolled.
    pub fn scroll_to(&mut self, offset: u32) {
        self.editor.set_scroll_top(offset);
    }

    /// The caret or selection moved.
    pub fn set_selection(&mut self, start: usize, end: usize) {
        self.editor.set_selection_range(start, end);
    }

    /// Write the editor text into the page if the debounce deadline has
    /// passed. Returns whether a write happened.
    pub fn fire_due_commit(&mut self) -> bool {
        if self.debouncer.take_due(Instant::now()) {
            self.commit();
            true
        } else {
            false
        }
    }

    /// Apply one host event.
    pub fn handle(&mut self, event: EditorEvent) {
        match event {
            EditorEvent::Toggle => self.toggle(),
            EditorEvent::KeyDown(key) => {
                let _ = self.key_down(key);
            }
            EditorEvent::Input(text) => self.input(&text),
            EditorEvent::KeyUp(key) => self.key_up(key),
            EditorEvent::Click => self.click(),
            EditorEvent::Scroll(offset) => self.scroll_to(offset),
            EditorEvent::Select(start, end) => self.set_selection(start, end),
            EditorEvent::SelectSheet(name) => {
                if !self.select_sheet(&name) {
                    log::debug!("no sheet named '{name}'");
                }
            }
            EditorEvent::AddSheet => {
                let _ = self.add_sheet();
            }
            EditorEvent::PauseAnimations(paused) => self.set_animations_paused(paused),
        }
    }

    /// Drive the session from a stream of host events until the sender side
    /// closes, firing debounced writes as their deadlines pass.
    ///
    /// An edit still waiting on the debounce when the stream closes is written
    /// before returning.
    pub async fn run(mut self, mut events: UnboundedReceiver<EditorEvent>) -> Self {
        loop {
            let deadline = self.debouncer.deadline();
            tokio::select! {
                event = events.recv() => match event {
                    Some(event) => self.handle(event),
                    None => break,
                },
                () = sleep_until_deadline(deadline) => {
                    let _ = self.fire_due_commit();
                }
            }
        }
        if self.debouncer.cancel() {
            self.commit();
        }
        self
    }

    // ========== internals ==========

    fn insert_indent(&mut self) {
        let (start, _) = self.editor.selection();
        let value = self.editor.value_with_inserted(start, &self.indent_unit);
        self.editor.set_value(value);
        let caret = start + self.indent_unit.chars().count();
        self.editor.set_selection_range(caret, caret);
        self.editor.set_scroll_top(self.scroll_snapshot);
    }

    fn set_current(&mut self, name: &str) {
        let Some(text) = self.content(name) else {
            return;
        };
        let text = self.display_text(&text);
        self.current = Some(name.to_string());
        self.editor.set_value(text);
        self.editor.set_selection_range(0, 0);
        if self.visibility == Visibility::Visible {
            self.editor.focus();
        }
    }

    fn display_text(&self, raw: &str) -> String {
        let text = if self.config.unminify {
            unminify(raw)
        } else {
            raw.into()
        };
        if self.config.use_spaces {
            text.replace('\t', &self.indent_unit)
        } else {
            text.into_owned()
        }
    }

    fn commit(&mut self) {
        let Some(entry) = self
            .current
            .as_deref()
            .and_then(|name| self.entries.iter().find(|entry| entry.name == name))
        else {
            return;
        };
        self.dom.set_text_content(entry.live_node, self.editor.value());
        self.commits += 1;
        log::debug!("committed '{}' ({} bytes)", entry.name, self.editor.value().len());
    }
}
