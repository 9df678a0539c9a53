//! Parser warnings with colored terminal output.
//!
//! Provides deduplication so a document full of the same mistake reports it
//! once. Used by the tokenizer and tree builder when parse-error logging is
//! switched on.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Report a warning for `component`, printing it once per unique message.
///
/// Returns `true` if this call printed the message.
///
/// # Example
/// ```
/// use heron_common::warning::{clear_warnings, warn_once};
///
/// clear_warnings();
/// assert!(warn_once("Tokenizer", "unexpected-null-character"));
/// assert!(!warn_once("Tokenizer", "unexpected-null-character"));
/// ```
#[must_use]
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let should_print = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_print {
        eprintln!("{}", format!("[Heron {component}] ⚠ {message}").yellow());
    }
    should_print
}

/// Clear all recorded warnings (call before parsing a new document)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
