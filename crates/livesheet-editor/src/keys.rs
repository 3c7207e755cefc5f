//! Key codes the editor cares about.

/// A keyboard key code, as reported by the host's key events.
pub type KeyCode = u32;

/// The Tab key.
pub const TAB: KeyCode = 9;

/// The F9 key, the default overlay toggle.
pub const F9: KeyCode = 120;
