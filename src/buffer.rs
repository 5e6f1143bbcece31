// Per-viewport input state owned by the host shell

use std::fmt;
use std::time::Instant;

use crate::mode::KeymapId;
use crate::page::ElementRef;

/// Identifier the host assigns to a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferId(pub u64);

impl fmt::Display for BufferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "buffer#{}", self.0)
    }
}

/// Snapshot taken when caret mode engages, restored when it disengages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaretRestore {
    pub caret_visible: bool,
    pub focused: Option<ElementRef>,
}

/// Input state of one browser viewport.
///
/// The mode and keymap slots are written only by
/// [`ModeRegistry::enable`](crate::registry::ModeRegistry::enable); the
/// mode is `None` only between creation and the first transition.
#[derive(Debug)]
pub struct Buffer {
    id: BufferId,
    input_mode: Option<String>,
    keymap: Option<KeymapId>,
    last_user_input: Option<Instant>,
    pub(crate) caret_restore: Option<CaretRestore>,
}

impl Buffer {
    pub fn new(id: BufferId) -> Self {
        Self {
            id,
            input_mode: None,
            keymap: None,
            last_user_input: None,
            caret_restore: None,
        }
    }

    pub fn id(&self) -> BufferId {
        self.id
    }

    /// Name of the active input mode.
    pub fn input_mode(&self) -> Option<&str> {
        self.input_mode.as_deref()
    }

    /// Keymap the host's key dispatch should consult.
    pub fn keymap(&self) -> Option<&KeymapId> {
        self.keymap.as_ref()
    }

    pub fn last_user_input(&self) -> Option<Instant> {
        self.last_user_input
    }

    /// Records interactive input; focus taken by the page shortly after
    /// is considered user-initiated.
    pub fn note_user_input(&mut self, at: Instant) {
        self.last_user_input = Some(at);
    }

    pub(crate) fn set_mode(&mut self, name: &str, keymap: KeymapId) {
        self.input_mode = Some(name.to_string());
        self.keymap = Some(keymap);
    }
}
