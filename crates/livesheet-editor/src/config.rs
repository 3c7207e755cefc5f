//! Editor configuration.
//!
//! Everything the editor treats as static for a session: which key toggles
//! the overlay, how Tab indents, how long typing must pause before the page
//! is updated, and whether minified sheets are reformatted for display.
//! Values come from defaults, a JSON file, environment variables, or the
//! caller directly.

use crate::keys::{F9, KeyCode};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while reading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config '{path}': {source}")]
    Io {
        /// Path that was read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid configuration JSON.
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Static configuration for the loader and the editor session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Key that shows and hides the overlay. Never treated as an edit.
    pub toggle_key: KeyCode,
    /// Width of one indentation step, in spaces. `0` is treated as `1`, so
    /// Tab always inserts something.
    pub tab_size: usize,
    /// Indent with `tab_size` spaces instead of a tab character.
    pub use_spaces: bool,
    /// Idle time after the last keystroke before the page is updated.
    /// `0` updates the page on every keystroke.
    pub debounce_ms: u64,
    /// Reformat single-line (minified) sheets before showing them.
    pub unminify: bool,
    /// Base URL the page was loaded from, for resolving relative `href`s.
    pub base_url: Option<String>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            toggle_key: F9,
            tab_size: 8,
            use_spaces: false,
            debounce_ms: 300,
            unminify: false,
            base_url: None,
        }
    }
}

impl EditorConfig {
    /// What one press of Tab inserts.
    #[must_use]
    pub fn indent_unit(&self) -> String {
        if self.use_spaces {
            " ".repeat(self.tab_size.max(1))
        } else {
            "\t".to_string()
        }
    }

    /// The debounce period, or `None` when debouncing is disabled.
    #[must_use]
    pub const fn debounce(&self) -> Option<Duration> {
        if self.debounce_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.debounce_ms))
        }
    }

    /// Parse configuration from JSON. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not valid config JSON.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it is not valid config JSON.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Load configuration from environment variables, over the defaults.
    ///
    /// Reads the following environment variables:
    /// - `LIVESHEET_TOGGLE_KEY`: toggle key code (default: 120, F9)
    /// - `LIVESHEET_TAB_SIZE`: spaces per indent (default: 8)
    /// - `LIVESHEET_USE_SPACES`: `1`/`true` to indent with spaces
    /// - `LIVESHEET_DEBOUNCE_MS`: idle time before updating (default: 300)
    /// - `LIVESHEET_UNMINIFY`: `1`/`true` to reformat minified sheets
    /// - `LIVESHEET_BASE_URL`: base URL for relative `href`s
    ///
    /// Unparseable values are ignored.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply any `LIVESHEET_*` environment variables on top of `self`.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(key) = env_parse("LIVESHEET_TOGGLE_KEY") {
            self.toggle_key = key;
        }
        if let Some(size) = env_parse("LIVESHEET_TAB_SIZE") {
            self.tab_size = size;
        }
        if let Some(flag) = env_flag("LIVESHEET_USE_SPACES") {
            self.use_spaces = flag;
        }
        if let Some(ms) = env_parse("LIVESHEET_DEBOUNCE_MS") {
            self.debounce_ms = ms;
        }
        if let Some(flag) = env_flag("LIVESHEET_UNMINIFY") {
            self.unminify = flag;
        }
        if let Ok(url) = env::var("LIVESHEET_BASE_URL")
            && !url.is_empty()
        {
            self.base_url = Some(url);
        }
        self
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|val| val.trim().parse().ok())
}

fn env_flag(name: &str) -> Option<bool> {
    env::var(name).ok().map(|val| {
        let val = val.trim();
        val == "1" || val.eq_ignore_ascii_case("true")
    })
}
