// Scenario files: a declared page plus a step list replayed against the
// mode engine.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use color_eyre::eyre::{bail, eyre, Result, WrapErr};
use serde::Deserialize;

use coracle_input::config::{FieldsConfig, InputConfig};
use coracle_input::page::EditFlag;
use coracle_input::{
    focus_next_field, focus_previous_field, mode, Buffer, BufferId, Classifier, ElementKind,
    ElementRef, FrameRef, KeymapId, MemoryPage, ModeIndicator, ModeRegistry, Page, PageEvent,
};

#[derive(Debug, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub frames: Vec<FrameDecl>,
    #[serde(default)]
    pub elements: Vec<ElementDecl>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// Subframe declaration. The top frame is predefined under the name
/// `top`; parents must be declared before their children.
#[derive(Debug, Deserialize)]
pub struct FrameDecl {
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub design_mode: bool,
}

#[derive(Debug, Deserialize)]
pub struct ElementDecl {
    pub name: String,
    pub kind: ElementKindDecl,
    #[serde(rename = "type", default)]
    pub input_type: Option<String>,
    #[serde(default)]
    pub frame: Option<String>,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub editable: Option<bool>,
    #[serde(default)]
    pub size: Option<(u32, u32)>,
    #[serde(default)]
    pub hidden: bool,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKindDecl {
    TextInput,
    Textarea,
    Select,
    Other,
}

fn default_count() -> i32 {
    1
}

#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Page moves focus to an element, as scripts do on load.
    Focus { element: String },
    /// Focused element loses focus.
    Blur,
    /// The user presses a key that goes to the page.
    UserInput,
    /// Buffer navigates to a new location.
    Navigate,
    /// Forced resync of the mode to the current focus.
    Sync,
    /// Explicitly enable a mode by name.
    Enable { mode: String },
    NextField {
        #[serde(default = "default_count")]
        count: i32,
    },
    PreviousField {
        #[serde(default = "default_count")]
        count: i32,
    },
    SetCaretBrowsing { value: bool },
    WaitMs { ms: u64 },
}

impl Step {
    pub fn describe(&self) -> String {
        match self {
            Step::Focus { element } => format!("focus {}", element),
            Step::Blur => "blur".to_string(),
            Step::UserInput => "user_input".to_string(),
            Step::Navigate => "navigate".to_string(),
            Step::Sync => "sync".to_string(),
            Step::Enable { mode } => format!("enable {}", mode),
            Step::NextField { count } => format!("next_field {}", count),
            Step::PreviousField { count } => format!("previous_field {}", count),
            Step::SetCaretBrowsing { value } => format!("set_caret_browsing {}", value),
            Step::WaitMs { ms } => format!("wait {}ms", ms),
        }
    }
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read scenario {}", path.display()))?;
        toml::from_str(&content)
            .wrap_err_with(|| format!("Failed to parse scenario {}", path.display()))
    }
}

/// Replays scenario steps against one buffer and an in-memory page.
pub struct Runner {
    registry: ModeRegistry,
    classifier: Classifier,
    buffer: Buffer,
    page: MemoryPage,
    indicator: ModeIndicator,
    fields: FieldsConfig,
    caret_browsing: bool,
    elements: HashMap<String, ElementRef>,
}

impl Runner {
    pub fn new(scenario: &Scenario, config: &InputConfig) -> Result<Self> {
        let mut page = MemoryPage::new();
        let mut frames: HashMap<String, FrameRef> = HashMap::new();
        frames.insert("top".to_string(), page.top_frame());

        for decl in &scenario.frames {
            if frames.contains_key(&decl.name) {
                bail!("Duplicate frame name {}", decl.name);
            }
            let parent = match &decl.parent {
                Some(name) => *frames
                    .get(name)
                    .ok_or_else(|| eyre!("Unknown parent frame {}", name))?,
                None => page.top_frame(),
            };
            let frame = page.add_frame(parent);
            if decl.design_mode {
                page.set_design_mode(frame, true);
            }
            frames.insert(decl.name.clone(), frame);
        }

        let mut elements: HashMap<String, ElementRef> = HashMap::new();
        for decl in &scenario.elements {
            if elements.contains_key(&decl.name) {
                bail!("Duplicate element name {}", decl.name);
            }
            let frame = match &decl.frame {
                Some(name) => *frames
                    .get(name)
                    .ok_or_else(|| eyre!("Unknown frame {}", name))?,
                None => page.top_frame(),
            };
            let kind = match decl.kind {
                ElementKindDecl::TextInput => ElementKind::text_input(decl.input_type.as_deref()),
                ElementKindDecl::Textarea => ElementKind::TextArea,
                ElementKindDecl::Select => ElementKind::Select,
                ElementKindDecl::Other => ElementKind::Other,
            };
            let element = page.add_element(frame, kind);
            if let Some(parent) = &decl.parent {
                let parent = *elements
                    .get(parent)
                    .ok_or_else(|| eyre!("Unknown parent element {}", parent))?;
                page.set_parent(element, parent);
            }
            match decl.editable {
                Some(true) => page.set_edit_flag(element, EditFlag::Editable),
                Some(false) => page.set_edit_flag(element, EditFlag::NotEditable),
                None => {}
            }
            if let Some((width, height)) = decl.size {
                page.set_size(element, width, height);
            }
            if decl.hidden {
                page.set_css_hidden(element, true);
            }
            elements.insert(decl.name.clone(), element);
        }

        let mut registry = ModeRegistry::with_base_modes();
        registry.add_mode_change_hook(|t| {
            println!(
                "  {}: mode {} -> {}",
                t.buffer,
                t.from.as_deref().unwrap_or("-"),
                t.to
            );
            Ok(())
        });

        let mut runner = Self {
            registry,
            classifier: Classifier::new(config.focus.clone()),
            buffer: Buffer::new(BufferId(1)),
            page,
            indicator: ModeIndicator::new(),
            fields: config.fields.clone(),
            caret_browsing: false,
            elements,
        };
        if config.caret.browse_with_caret {
            runner.set_caret_browsing(true)?;
        }
        Ok(runner)
    }

    pub fn apply(&mut self, step: &Step) -> Result<()> {
        match step {
            Step::Focus { element } => {
                let element = *self
                    .elements
                    .get(element)
                    .ok_or_else(|| eyre!("Unknown element {}", element))?;
                self.page.focus_element(element);
                self.classifier.handle_event(
                    &mut self.registry,
                    &mut self.buffer,
                    &mut self.page,
                    PageEvent::FocusChanged,
                )?;
            }
            Step::Blur => {
                if let Some(element) = self.page.focused_element() {
                    self.page.blur(element);
                }
                self.classifier.handle_event(
                    &mut self.registry,
                    &mut self.buffer,
                    &mut self.page,
                    PageEvent::FocusChanged,
                )?;
            }
            Step::UserInput => {
                self.classifier.note_user_input(&mut self.buffer);
            }
            Step::Navigate => {
                self.classifier.handle_event(
                    &mut self.registry,
                    &mut self.buffer,
                    &mut self.page,
                    PageEvent::LocationChanged,
                )?;
            }
            Step::Sync => {
                self.classifier.sync_to_focus(
                    &mut self.registry,
                    &mut self.buffer,
                    &mut self.page,
                )?;
            }
            Step::Enable { mode } => {
                self.registry
                    .enable(&mut self.buffer, &mut self.page, mode)?;
            }
            Step::NextField { count } => {
                // Field navigation is always user-driven.
                self.classifier.note_user_input(&mut self.buffer);
                focus_next_field(&mut self.page, &self.fields, *count)?;
                self.classifier.classify(
                    &mut self.registry,
                    &mut self.buffer,
                    &mut self.page,
                    false,
                )?;
            }
            Step::PreviousField { count } => {
                self.classifier.note_user_input(&mut self.buffer);
                focus_previous_field(&mut self.page, &self.fields, *count)?;
                self.classifier.classify(
                    &mut self.registry,
                    &mut self.buffer,
                    &mut self.page,
                    false,
                )?;
            }
            Step::SetCaretBrowsing { value } => {
                self.set_caret_browsing(*value)?;
            }
            Step::WaitMs { ms } => {
                std::thread::sleep(Duration::from_millis(*ms));
            }
        }
        self.indicator.refresh(&self.registry, &self.buffer);
        Ok(())
    }

    /// Caret browsing flips are edge triggered: turning it on enters
    /// caret mode, turning it off leaves to normal and resyncs to the
    /// restored focus. Setting the current value again does nothing.
    pub fn set_caret_browsing(&mut self, on: bool) -> Result<()> {
        if on == self.caret_browsing {
            return Ok(());
        }
        self.caret_browsing = on;
        if on {
            self.registry
                .enable(&mut self.buffer, &mut self.page, mode::CARET)?;
        } else {
            self.registry
                .enable(&mut self.buffer, &mut self.page, mode::NORMAL)?;
            self.classifier
                .sync_to_focus(&mut self.registry, &mut self.buffer, &mut self.page)?;
        }
        self.indicator.refresh(&self.registry, &self.buffer);
        Ok(())
    }

    pub fn apply_config(&mut self, config: &InputConfig) -> Result<()> {
        self.classifier.set_config(config.focus.clone());
        self.fields = config.fields.clone();
        self.set_caret_browsing(config.caret.browse_with_caret)
    }

    pub fn mode(&self) -> Option<&str> {
        self.buffer.input_mode()
    }

    pub fn keymap(&self) -> Option<&KeymapId> {
        self.buffer.keymap()
    }

    pub fn indicator(&self) -> &ModeIndicator {
        &self.indicator
    }
}
