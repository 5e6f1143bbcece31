// Mode-change hook list with error-aggregating fan-out

use std::fmt;

use crate::error::{InputError, Result};
use crate::event::ModeTransition;

/// Handle returned by [`ModeChangeHooks::add`], used to remove the hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HookId(u64);

type HookFn = Box<dyn FnMut(&ModeTransition) -> Result<()>>;

/// Ordered list of mode-change listeners.
///
/// Hooks run synchronously in registration order. A failing hook never
/// prevents later hooks from running; failures are collected and returned
/// as one aggregate error after the fan-out.
#[derive(Default)]
pub struct ModeChangeHooks {
    entries: Vec<(HookId, HookFn)>,
    next_id: u64,
}

impl ModeChangeHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, hook: impl FnMut(&ModeTransition) -> Result<()> + 'static) -> HookId {
        let id = HookId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(hook)));
        id
    }

    /// Returns false when the id was not registered.
    pub fn remove(&mut self, id: HookId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn fire(&mut self, transition: &ModeTransition) -> Result<()> {
        let total = self.entries.len();
        let mut failures: Vec<String> = Vec::new();
        for (id, hook) in &mut self.entries {
            if let Err(e) = hook(transition) {
                tracing::warn!("mode-change hook {} failed: {}", id.0, e);
                failures.push(e.to_string());
            }
        }
        if failures.is_empty() {
            Ok(())
        } else {
            Err(InputError::HookFanout {
                failed: failures.len(),
                total,
                first: failures.swap_remove(0),
            })
        }
    }
}

impl fmt::Debug for ModeChangeHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModeChangeHooks")
            .field("entries", &self.entries.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
