// Events exchanged with the host shell

use crate::buffer::BufferId;

/// Buffer notifications the host feeds into the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    /// The focused element of the page changed (or focus was lost).
    FocusChanged,
    /// The buffer navigated to a new location.
    LocationChanged,
    /// The user pressed a key or clicked inside the buffer.
    UserInput,
}

/// Payload delivered to mode-change hooks after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeTransition {
    pub buffer: BufferId,
    /// Previous mode name; `None` for the first transition of a buffer.
    pub from: Option<String>,
    /// Newly active mode name.
    pub to: String,
}
