//! Diagnostics with colored terminal output.
//!
//! Every condition the overlay recovers from locally (a link removed while a
//! session is live, a malformed ancestor chain) is reported here instead of
//! being surfaced to the event dispatcher. Messages are deduplicated so a
//! condition hit on every scroll tick prints once.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about a recoverable condition (prints once per unique message)
///
/// # Example
/// ```ignore
/// warn_once("Session", "line target 12 detached; skipping scroll adjustment");
/// ```
pub fn warn_once(component: &str, message: &str) {
    if first_occurrence(component, message) {
        eprintln!("{}", format!("[Linkline {component}] ⚠ {message}").yellow());
    }
}

/// Records the warning and reports whether it had not been seen before.
fn first_occurrence(component: &str, message: &str) -> bool {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(format!("[{component}] {message}"))
}

/// Clear all recorded warnings (call when a new page is initialized)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
