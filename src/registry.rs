// Mode registry: descriptor table, transition engine, and hook fan-out

use std::collections::HashMap;
use std::fmt;

use crate::buffer::Buffer;
use crate::caret::CaretEffects;
use crate::error::{InputError, Result};
use crate::event::ModeTransition;
use crate::hooks::{HookId, ModeChangeHooks};
use crate::mode::{self, base_modes, InputMode, KeymapId};
use crate::page::Page;

/// Per-mode enable/disable side effects.
///
/// The base set attaches effects only to caret mode; every other mode
/// keeps the default no-ops and its enable only installs the keymap.
pub trait ModeEffects {
    fn on_enable(&self, buffer: &mut Buffer, page: &mut dyn Page) -> Result<()> {
        let _ = (buffer, page);
        Ok(())
    }

    fn on_disable(&self, buffer: &mut Buffer, page: &mut dyn Page) -> Result<()> {
        let _ = (buffer, page);
        Ok(())
    }
}

/// Registered input modes and the name → keymap table.
///
/// Built once at startup and handed to the classifier call sites; the
/// table itself is read-only after registration.
pub struct ModeRegistry {
    modes: Vec<InputMode>,
    index: HashMap<String, usize>,
    effects: HashMap<String, Box<dyn ModeEffects>>,
    hooks: ModeChangeHooks,
}

impl ModeRegistry {
    pub fn new() -> Self {
        Self {
            modes: Vec::new(),
            index: HashMap::new(),
            effects: HashMap::new(),
            hooks: ModeChangeHooks::new(),
        }
    }

    /// Registry preloaded with the nine base modes and the caret effects.
    pub fn with_base_modes() -> Self {
        let mut registry = Self::new();
        for descriptor in base_modes() {
            let defined = registry.define(descriptor);
            debug_assert!(defined.is_ok(), "base mode table contains a duplicate");
        }
        registry
            .effects
            .insert(mode::CARET.to_string(), Box::new(CaretEffects));
        registry
    }

    /// Registers a mode descriptor. Duplicate names are rejected to catch
    /// configuration errors at startup.
    pub fn define(&mut self, descriptor: InputMode) -> Result<()> {
        if self.index.contains_key(descriptor.name()) {
            return Err(InputError::DuplicateMode {
                name: descriptor.name().to_string(),
            });
        }
        tracing::debug!("registered input mode {}", descriptor.name());
        self.index
            .insert(descriptor.name().to_string(), self.modes.len());
        self.modes.push(descriptor);
        Ok(())
    }

    /// Registers a mode together with its enable/disable effects.
    pub fn define_with_effects(
        &mut self,
        descriptor: InputMode,
        effects: Box<dyn ModeEffects>,
    ) -> Result<()> {
        let name = descriptor.name().to_string();
        self.define(descriptor)?;
        self.effects.insert(name, effects);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&InputMode> {
        self.index.get(name).map(|&i| &self.modes[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Registered modes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &InputMode> {
        self.modes.iter()
    }

    /// Keymap bound to a mode name.
    pub fn keymap_for(&self, name: &str) -> Result<&KeymapId> {
        self.get(name)
            .map(InputMode::keymap)
            .ok_or_else(|| InputError::UnknownMode {
                name: name.to_string(),
            })
    }

    /// Keymap bound to the buffer's active mode. Fails when no mode has
    /// been enabled on the buffer yet.
    pub fn keymap(&self, buffer: &Buffer) -> Result<&KeymapId> {
        let name = buffer.input_mode().ok_or(InputError::NoActiveMode)?;
        self.keymap_for(name)
    }

    pub fn add_mode_change_hook(
        &mut self,
        hook: impl FnMut(&ModeTransition) -> Result<()> + 'static,
    ) -> HookId {
        self.hooks.add(hook)
    }

    pub fn remove_mode_change_hook(&mut self, id: HookId) -> bool {
        self.hooks.remove(id)
    }

    /// Activates `name` on the buffer. This is the only path that mutates
    /// the buffer's mode and keymap slots.
    ///
    /// Re-enabling the active mode is a no-op that fires nothing; the
    /// first enable after buffer creation always fires. Order on a real
    /// transition: previous mode's disable effect (a failure here aborts
    /// with the buffer untouched), slot update, new mode's enable effect,
    /// then the mode-change hook fan-out.
    pub fn enable(&mut self, buffer: &mut Buffer, page: &mut dyn Page, name: &str) -> Result<()> {
        let keymap = self.keymap_for(name)?.clone();
        if buffer.input_mode() == Some(name) {
            return Ok(());
        }
        let previous = buffer.input_mode().map(str::to_string);

        if let Some(prev) = previous.as_deref() {
            if let Some(effects) = self.effects.get(prev) {
                effects.on_disable(buffer, page)?;
            }
        }

        buffer.set_mode(name, keymap);

        if let Some(effects) = self.effects.get(name) {
            effects.on_enable(buffer, page)?;
        }

        tracing::debug!(
            "{} input mode {} -> {}",
            buffer.id(),
            previous.as_deref().unwrap_or("-"),
            name
        );

        let transition = ModeTransition {
            buffer: buffer.id(),
            from: previous,
            to: name.to_string(),
        };
        self.hooks.fire(&transition)
    }
}

impl Default for ModeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ModeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModeRegistry")
            .field("modes", &self.modes)
            .field("effects", &self.effects.keys())
            .field("hooks", &self.hooks)
            .finish()
    }
}
