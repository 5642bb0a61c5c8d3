use std::fmt;

use serde::Serialize;

/// Serializes a value to JSON only when a log line is actually formatted.
///
/// Snapshot events carry several block references; encoding them eagerly on
/// every event would be wasted work whenever the snapshot sink is disabled.
pub(crate) struct LazyJson<'a, T: Serialize>(pub(crate) &'a T);

impl<T: Serialize> fmt::Display for LazyJson<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self.0) {
            Ok(encoded) => f.write_str(&encoded),
            Err(_) => f.write_str("null"),
        }
    }
}
