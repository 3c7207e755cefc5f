//! Deduplicated warnings.
//!
//! Loading a page can hit the same problem many times over (the same broken
//! stylesheet linked from several places, the same unsupported `data:` URL).
//! Each unique message is reported once, through the `log` facade.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Global set of warnings we've already emitted (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about a recoverable problem (logged once per unique message).
///
/// Returns `true` if this call emitted the warning.
///
/// # Example
/// ```ignore
/// warn_once("loader", "Unable to load https://site.test/x.css: HTTP error: 404");
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let should_log = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_log {
        log::warn!(target: "livesheet", "[{component}] {message}");
    }
    should_log
}

/// Clear all recorded warnings (call when a new load session starts).
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
