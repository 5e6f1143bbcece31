// Input-mode descriptors and the base mode set

use std::fmt;

/// Names of the base modes installed by
/// [`ModeRegistry::with_base_modes`](crate::registry::ModeRegistry::with_base_modes).
pub const NORMAL: &str = "normal";
pub const SELECT: &str = "select";
pub const TEXT: &str = "text";
pub const TEXTAREA: &str = "textarea";
pub const RICHEDIT: &str = "richedit";
pub const CHECKBOX: &str = "checkbox";
pub const QUOTE_NEXT: &str = "quote_next";
pub const QUOTE: &str = "quote";
pub const CARET: &str = "caret";

/// Identifier of a keymap owned by the host shell. The engine only
/// selects keymaps; it never interprets them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeymapId(String);

impl KeymapId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeymapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for KeymapId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for KeymapId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Mode descriptor. Immutable once registered; registered at startup and
/// never removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputMode {
    name: String,
    display_name: Option<String>,
    keymap: KeymapId,
    doc: Option<String>,
    form_entry: bool,
}

impl InputMode {
    pub fn new(name: impl Into<String>, keymap: impl Into<KeymapId>) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            keymap: keymap.into(),
            doc: None,
            form_entry: false,
        }
    }

    /// Badge text shown by status indicators; modes without one (normal,
    /// caret) display nothing.
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Marks the mode as a form-entry mode, making it subject to
    /// automatic-focus suppression.
    pub fn form_entry(mut self) -> Self {
        self.form_entry = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn keymap(&self) -> &KeymapId {
        &self.keymap
    }

    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    pub fn is_form_entry(&self) -> bool {
        self.form_entry
    }
}

/// Descriptor table for the base mode set.
pub fn base_modes() -> Vec<InputMode> {
    vec![
        InputMode::new(NORMAL, "content-normal"),
        InputMode::new(SELECT, "content-select")
            .with_display_name("input:SELECT")
            .form_entry(),
        InputMode::new(TEXT, "content-text")
            .with_display_name("input:TEXT")
            .form_entry(),
        InputMode::new(TEXTAREA, "content-textarea")
            .with_display_name("input:TEXTAREA")
            .form_entry(),
        InputMode::new(RICHEDIT, "content-richedit")
            .with_display_name("input:RICHEDIT")
            .form_entry(),
        InputMode::new(CHECKBOX, "content-checkbox")
            .with_display_name("input:CHECKBOX/RADIOBUTTON")
            .form_entry(),
        InputMode::new(QUOTE_NEXT, "content-quote-next")
            .with_display_name("input:PASS-THROUGH(next)")
            .with_doc(
                "Sends the next key combo to the page, bypassing the \
                 shell's key handling. Disengages after one key combo.",
            ),
        InputMode::new(QUOTE, "content-quote")
            .with_display_name("input:PASS-THROUGH")
            .with_doc(
                "Sends all key combos to the page, bypassing the shell's \
                 key handling, until the Escape key is pressed.",
            ),
        InputMode::new(CARET, "content-caret"),
    ]
}
