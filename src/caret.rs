// Caret mode side effects: caret visibility and focus stash/restore

use crate::buffer::{Buffer, CaretRestore};
use crate::error::Result;
use crate::page::Page;
use crate::registry::ModeEffects;

/// Enable shows the caret and moves focus to the document root so caret
/// movement commands act on the page body. Disable puts back exactly the
/// caret visibility and focused element captured at enable time.
pub struct CaretEffects;

impl ModeEffects for CaretEffects {
    fn on_enable(&self, buffer: &mut Buffer, page: &mut dyn Page) -> Result<()> {
        buffer.caret_restore = Some(CaretRestore {
            caret_visible: page.caret_visible(),
            focused: page.focused_element(),
        });
        page.set_caret_visible(true);
        page.focus_root();
        Ok(())
    }

    fn on_disable(&self, buffer: &mut Buffer, page: &mut dyn Page) -> Result<()> {
        if let Some(restore) = buffer.caret_restore.take() {
            page.set_caret_visible(restore.caret_visible);
            match restore.focused {
                Some(element) => page.focus_element(element),
                None => page.focus_root(),
            }
        }
        Ok(())
    }
}
