// Status-line indicator mirroring the active input mode

use crate::buffer::Buffer;
use crate::registry::ModeRegistry;

/// Style class hook for a mode name, for themes to match on.
pub fn style_class_for(name: &str) -> String {
    format!("input-mode-{}", name.replace('_', "-"))
}

/// Badge text and style class for the status line.
///
/// Refresh with a buffer that has no mode yet leaves the previous
/// contents in place.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ModeIndicator {
    badge: Option<String>,
    style_class: Option<String>,
}

impl ModeIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn badge(&self) -> Option<&str> {
        self.badge.as_deref()
    }

    pub fn style_class(&self) -> Option<&str> {
        self.style_class.as_deref()
    }

    pub fn refresh(&mut self, registry: &ModeRegistry, buffer: &Buffer) {
        let Some(name) = buffer.input_mode() else {
            return;
        };
        self.style_class = Some(style_class_for(name));
        self.badge = registry
            .get(name)
            .and_then(|m| m.display_name())
            .map(str::to_string);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::BufferId;
    use crate::mode;
    use crate::page::MemoryPage;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_style_class_replaces_underscores() {
        assert_eq!(style_class_for(mode::QUOTE_NEXT), "input-mode-quote-next");
        assert_eq!(style_class_for(mode::NORMAL), "input-mode-normal");
    }

    #[test]
    fn test_refresh_shows_badge_for_form_modes() {
        let mut registry = ModeRegistry::with_base_modes();
        let mut buffer = Buffer::new(BufferId(1));
        let mut page = MemoryPage::new();
        let mut indicator = ModeIndicator::new();

        registry
            .enable(&mut buffer, &mut page, mode::TEXT)
            .unwrap();
        indicator.refresh(&registry, &buffer);
        assert_eq!(indicator.badge(), Some("input:TEXT"));
        assert_eq!(indicator.style_class(), Some("input-mode-text"));

        registry
            .enable(&mut buffer, &mut page, mode::CHECKBOX)
            .unwrap();
        indicator.refresh(&registry, &buffer);
        assert_eq!(indicator.badge(), Some("input:CHECKBOX/RADIOBUTTON"));
    }

    #[test]
    fn test_normal_mode_has_class_but_no_badge() {
        let mut registry = ModeRegistry::with_base_modes();
        let mut buffer = Buffer::new(BufferId(1));
        let mut page = MemoryPage::new();
        let mut indicator = ModeIndicator::new();

        registry
            .enable(&mut buffer, &mut page, mode::NORMAL)
            .unwrap();
        indicator.refresh(&registry, &buffer);
        assert_eq!(indicator.badge(), None);
        assert_eq!(indicator.style_class(), Some("input-mode-normal"));
    }

    #[test]
    fn test_unset_mode_leaves_indicator_untouched() {
        let mut registry = ModeRegistry::with_base_modes();
        let mut buffer = Buffer::new(BufferId(1));
        let mut page = MemoryPage::new();
        let mut indicator = ModeIndicator::new();

        registry
            .enable(&mut buffer, &mut page, mode::TEXTAREA)
            .unwrap();
        indicator.refresh(&registry, &buffer);

        let fresh = Buffer::new(BufferId(2));
        indicator.refresh(&registry, &fresh);
        assert_eq!(indicator.badge(), Some("input:TEXTAREA"));
        assert_eq!(indicator.style_class(), Some("input-mode-textarea"));
    }
}
