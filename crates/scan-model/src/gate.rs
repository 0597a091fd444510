//! Caller-owned gating flags.

use serde::{Deserialize, Serialize};

/// Flags that suppress evaluation without touching filter logic.
///
/// The host owns and mutates these (typically flipping `already_read` after
/// an accept). Filters only read them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GateState {
    /// A code has already been accepted; ignore further detections.
    pub already_read: bool,
    /// The hosting view is active.
    pub is_focused: bool,
}

impl GateState {
    pub fn new(already_read: bool, is_focused: bool) -> Self {
        Self {
            already_read,
            is_focused,
        }
    }

    /// Focused and nothing read yet.
    pub fn open() -> Self {
        Self::new(false, true)
    }

    /// Whether detections should be evaluated at all.
    pub fn is_open(&self) -> bool {
        self.is_focused && !self.already_read
    }
}

impl Default for GateState {
    fn default() -> Self {
        Self::open()
    }
}
