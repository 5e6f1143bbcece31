// Focus classification: maps the focused element to an input mode and
// decides when a focus change is allowed to switch modes at all.

use std::collections::HashSet;
use std::sync::Arc;

use crate::buffer::Buffer;
use crate::clock::{Clock, SystemClock};
use crate::config::FocusConfig;
use crate::error::Result;
use crate::event::PageEvent;
use crate::mode::{self, InputMode};
use crate::page::{EditFlag, ElementKind, ElementRef, Page};
use crate::registry::ModeRegistry;

/// Mode a focused element classifies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Normal,
    Text,
    TextArea,
    Select,
    Checkbox,
    RichEdit,
}

impl FocusTarget {
    pub fn mode_name(self) -> &'static str {
        match self {
            Self::Normal => mode::NORMAL,
            Self::Text => mode::TEXT,
            Self::TextArea => mode::TEXTAREA,
            Self::Select => mode::SELECT,
            Self::Checkbox => mode::CHECKBOX,
            Self::RichEdit => mode::RICHEDIT,
        }
    }

    /// Everything except normal puts keystrokes into the page.
    pub fn is_form_entry(self) -> bool {
        self != Self::Normal
    }
}

/// Classifies the currently focused element.
///
/// With nothing focused the answer is normal, regardless of document
/// design mode. Text input types are compared lowercased; checkbox and
/// radio classify as checkbox, submit and reset buttons are not text
/// entry and classify by editability like any other element.
pub fn target_for(page: &dyn Page) -> FocusTarget {
    let Some(element) = page.focused_element() else {
        return FocusTarget::Normal;
    };

    match page.element_kind(element) {
        ElementKind::TextInput { input_type } => {
            let ty = input_type.map(|t| t.to_ascii_lowercase());
            match ty.as_deref() {
                Some("checkbox") | Some("radio") => return FocusTarget::Checkbox,
                Some("submit") | Some("reset") => {}
                _ => return FocusTarget::Text,
            }
        }
        ElementKind::TextArea => return FocusTarget::TextArea,
        ElementKind::Select => return FocusTarget::Select,
        ElementKind::Other => {}
    }

    if in_rich_edit(page, element) {
        FocusTarget::RichEdit
    } else {
        FocusTarget::Normal
    }
}

/// Rich editing applies when the focused frame has design mode on, or
/// when the nearest ancestor with an explicit editability flag says
/// editable.
fn in_rich_edit(page: &dyn Page, element: ElementRef) -> bool {
    if page.design_mode_on() {
        return true;
    }

    let mut visited = HashSet::new();
    let mut cursor = Some(element);
    while let Some(el) = cursor {
        if !visited.insert(el) {
            tracing::warn!("parent cycle while probing editability at {:?}", el);
            return false;
        }
        match page.edit_flag(el) {
            EditFlag::Editable => return true,
            EditFlag::NotEditable => return false,
            EditFlag::Inherit => cursor = page.parent(el),
        }
    }
    false
}

/// Drives mode selection from page events.
///
/// Focus-driven reclassification only runs while the buffer is in normal
/// mode, unset, or a form-entry mode; quote and caret modes stay until
/// left explicitly. A forced sync bypasses both that gate and the
/// automatic-focus suppression.
pub struct Classifier {
    config: FocusConfig,
    clock: Arc<dyn Clock>,
}

impl Classifier {
    pub fn new(config: FocusConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: FocusConfig, clock: Arc<dyn Clock>) -> Self {
        Self { config, clock }
    }

    pub fn config(&self) -> &FocusConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: FocusConfig) {
        self.config = config;
    }

    /// Stamps the buffer with the current time. Call on every keystroke
    /// and mouse press the user sends to the page.
    pub fn note_user_input(&self, buffer: &mut Buffer) {
        buffer.note_user_input(self.clock.now());
    }

    pub fn handle_event(
        &self,
        registry: &mut ModeRegistry,
        buffer: &mut Buffer,
        page: &mut dyn Page,
        event: PageEvent,
    ) -> Result<()> {
        match event {
            PageEvent::FocusChanged => self.classify(registry, buffer, page, false),
            PageEvent::LocationChanged => registry.enable(buffer, page, mode::NORMAL),
            PageEvent::UserInput => {
                self.note_user_input(buffer);
                Ok(())
            }
        }
    }

    /// Forced resync to the current focus, for explicit user commands.
    pub fn sync_to_focus(
        &self,
        registry: &mut ModeRegistry,
        buffer: &mut Buffer,
        page: &mut dyn Page,
    ) -> Result<()> {
        self.classify(registry, buffer, page, true)
    }

    /// Reclassifies the buffer from the focused element.
    ///
    /// A non-forced call on a form-entry focus target may instead blur
    /// the element and enable normal mode: that happens when automatic
    /// focus prevention is on, the buffer is not already in a form-entry
    /// mode, and the last user input is missing or older than the
    /// configured window. Pages that grab focus on load lose it again;
    /// a focus the user just caused keeps it.
    pub fn classify(
        &self,
        registry: &mut ModeRegistry,
        buffer: &mut Buffer,
        page: &mut dyn Page,
        forced: bool,
    ) -> Result<()> {
        let in_form_mode = buffer
            .input_mode()
            .and_then(|name| registry.get(name))
            .is_some_and(InputMode::is_form_entry);
        let in_normal = matches!(buffer.input_mode(), None | Some(mode::NORMAL));

        if !(forced || in_form_mode || in_normal) {
            tracing::trace!(
                "{} keeps sticky mode {:?}",
                buffer.id(),
                buffer.input_mode()
            );
            return Ok(());
        }

        let target = target_for(page);

        if target.is_form_entry()
            && !forced
            && self.config.prevent_automatic_focus
            && !in_form_mode
            && self.stale_user_input(buffer)
        {
            if let Some(element) = page.focused_element() {
                tracing::debug!(
                    "{} blurring page-initiated focus on {:?}",
                    buffer.id(),
                    element
                );
                page.blur(element);
            }
            return registry.enable(buffer, page, mode::NORMAL);
        }

        let name = target.mode_name();
        if registry.contains(name) {
            registry.enable(buffer, page, name)
        } else {
            tracing::error!("classification target {} is not a registered mode", name);
            registry.enable(buffer, page, mode::NORMAL)
        }
    }

    fn stale_user_input(&self, buffer: &Buffer) -> bool {
        match buffer.last_user_input() {
            None => true,
            Some(at) => {
                self.clock.now().duration_since(at) > self.config.automatic_focus_window()
            }
        }
    }
}
