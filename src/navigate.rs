// Form-field navigation across the frame tree

use crate::config::FieldsConfig;
use crate::error::{InputError, Result};
use crate::page::{ElementRef, FrameRef, Page};

/// Focuses the count-th form field after the focused element.
///
/// The focused frame's subtree is searched first; when it holds no
/// candidate the search restarts from the top frame with the focused
/// frame's subtree skipped. Within the chosen frame the index wraps, so
/// stepping past the last field lands on the first. A zero count does
/// nothing; no candidate anywhere is an error.
pub fn focus_next_field(
    page: &mut dyn Page,
    fields: &FieldsConfig,
    count: i32,
) -> Result<Option<ElementRef>> {
    if count == 0 {
        return Ok(None);
    }

    let focused = page.focused_element();
    let focused_frame = page.focused_frame();
    let found = search_frame(&*page, focused_frame, None, fields, focused, count).or_else(|| {
        search_frame(
            &*page,
            page.top_frame(),
            Some(focused_frame),
            fields,
            focused,
            count,
        )
    });

    match found {
        Some(element) => {
            tracing::debug!("field navigation focuses {:?}", element);
            page.focus_element(element);
            Ok(Some(element))
        }
        None => Err(InputError::NoFieldFound),
    }
}

/// Backward counterpart of [`focus_next_field`].
pub fn focus_previous_field(
    page: &mut dyn Page,
    fields: &FieldsConfig,
    count: i32,
) -> Result<Option<ElementRef>> {
    focus_next_field(page, fields, count.saturating_neg())
}

/// Depth-first search for a frame with at least one candidate field.
/// `skip` prunes that frame's whole subtree.
fn search_frame(
    page: &dyn Page,
    frame: FrameRef,
    skip: Option<FrameRef>,
    fields: &FieldsConfig,
    focused: Option<ElementRef>,
    count: i32,
) -> Option<ElementRef> {
    if Some(frame) == skip {
        return None;
    }

    let candidates: Vec<ElementRef> = page
        .form_controls(frame)
        .into_iter()
        .filter(|&el| fields.admits(&page.element_kind(el)) && is_rendered(page, el))
        .collect();
    if !candidates.is_empty() {
        return Some(candidates[pick_index(&candidates, focused, count)]);
    }

    for child in page.child_frames(frame) {
        if let Some(found) = search_frame(page, child, skip, fields, focused, count) {
            return Some(found);
        }
    }
    None
}

fn is_rendered(page: &dyn Page, el: ElementRef) -> bool {
    let (width, height) = page.client_size(el);
    !(width == 0 && height == 0) && !page.is_css_hidden(el)
}

/// Index selection within a non-empty candidate list. Counting starts
/// from the focused element when it is one of the candidates, otherwise
/// from the list start going forward or the list end going backward.
fn pick_index(candidates: &[ElementRef], focused: Option<ElementRef>, count: i32) -> usize {
    let len = candidates.len() as i64;
    let count = i64::from(count);
    let raw = match focused.and_then(|f| candidates.iter().position(|&c| c == f)) {
        Some(pos) => pos as i64 + count,
        None if count > 0 => count - 1,
        None => len + count,
    };
    raw.rem_euclid(len) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{ElementKind, MemoryPage};
    use pretty_assertions::assert_eq;

    fn three_field_page() -> (MemoryPage, [ElementRef; 3]) {
        let mut page = MemoryPage::new();
        let top = page.top_frame();
        let a = page.add_element(top, ElementKind::text_input(Some("text")));
        let b = page.add_element(top, ElementKind::TextArea);
        let c = page.add_element(top, ElementKind::Select);
        (page, [a, b, c])
    }

    #[test]
    fn test_zero_count_is_a_no_op() {
        let (mut page, [a, _, _]) = three_field_page();
        page.focus_element(a);
        let result = focus_next_field(&mut page, &FieldsConfig::default(), 0).unwrap();
        assert_eq!(result, None);
        assert_eq!(page.focused_element(), Some(a));
    }

    #[test]
    fn test_no_fields_anywhere_is_an_error() {
        let mut page = MemoryPage::new();
        let top = page.top_frame();
        page.add_element(top, ElementKind::Other);
        let err = focus_next_field(&mut page, &FieldsConfig::default(), 1).unwrap_err();
        assert!(matches!(err, InputError::NoFieldFound));
    }

    #[test]
    fn test_unfocused_forward_counts_from_start() {
        let (mut page, [a, b, _]) = three_field_page();
        let found = focus_next_field(&mut page, &FieldsConfig::default(), 1).unwrap();
        assert_eq!(found, Some(a));
        assert_eq!(page.focused_element(), Some(a));

        page.focus_root();
        let found = focus_next_field(&mut page, &FieldsConfig::default(), 2).unwrap();
        assert_eq!(found, Some(b));
    }

    #[test]
    fn test_unfocused_backward_counts_from_end() {
        let (mut page, [_, b, c]) = three_field_page();
        let found = focus_next_field(&mut page, &FieldsConfig::default(), -1).unwrap();
        assert_eq!(found, Some(c));

        page.focus_root();
        let found = focus_next_field(&mut page, &FieldsConfig::default(), -2).unwrap();
        assert_eq!(found, Some(b));
    }

    #[test]
    fn test_forward_steps_and_wraps_from_focused() {
        let (mut page, [a, b, c]) = three_field_page();
        page.focus_element(a);
        assert_eq!(
            focus_next_field(&mut page, &FieldsConfig::default(), 1).unwrap(),
            Some(b)
        );
        page.focus_element(c);
        assert_eq!(
            focus_next_field(&mut page, &FieldsConfig::default(), 1).unwrap(),
            Some(a)
        );
    }

    #[test]
    fn test_backward_steps_and_wraps_from_focused() {
        let (mut page, [a, b, c]) = three_field_page();
        page.focus_element(b);
        assert_eq!(
            focus_previous_field(&mut page, &FieldsConfig::default(), 1).unwrap(),
            Some(a)
        );
        assert_eq!(
            focus_previous_field(&mut page, &FieldsConfig::default(), 1).unwrap(),
            Some(c)
        );
    }

    #[test]
    fn test_focused_non_candidate_counts_from_start() {
        let mut page = MemoryPage::new();
        let top = page.top_frame();
        let button = page.add_element(top, ElementKind::Other);
        let field = page.add_element(top, ElementKind::text_input(None));
        page.focus_element(button);
        assert_eq!(
            focus_next_field(&mut page, &FieldsConfig::default(), 1).unwrap(),
            Some(field)
        );
    }

    #[test]
    fn test_invisible_fields_are_skipped() {
        let mut page = MemoryPage::new();
        let top = page.top_frame();
        let a = page.add_element(top, ElementKind::text_input(Some("text")));
        let zero = page.add_element(top, ElementKind::text_input(Some("text")));
        let hidden = page.add_element(top, ElementKind::TextArea);
        let d = page.add_element(top, ElementKind::Select);
        page.set_size(zero, 0, 0);
        page.set_css_hidden(hidden, true);

        page.focus_element(a);
        assert_eq!(
            focus_next_field(&mut page, &FieldsConfig::default(), 1).unwrap(),
            Some(d)
        );
    }

    #[test]
    fn test_excluded_input_type_is_skipped() {
        let mut page = MemoryPage::new();
        let top = page.top_frame();
        page.add_element(top, ElementKind::text_input(Some("hidden")));
        let visible = page.add_element(top, ElementKind::text_input(Some("text")));
        assert_eq!(
            focus_next_field(&mut page, &FieldsConfig::default(), 1).unwrap(),
            Some(visible)
        );
    }

    #[test]
    fn test_focused_frame_subtree_wins_over_top() {
        let mut page = MemoryPage::new();
        let top = page.top_frame();
        page.add_element(top, ElementKind::text_input(Some("text")));
        let sub = page.add_frame(top);
        let sub_field = page.add_element(sub, ElementKind::text_input(Some("text")));
        page.set_focused_frame(sub);

        assert_eq!(
            focus_next_field(&mut page, &FieldsConfig::default(), 1).unwrap(),
            Some(sub_field)
        );
    }

    #[test]
    fn test_empty_focused_frame_falls_back_to_top_tree() {
        let mut page = MemoryPage::new();
        let top = page.top_frame();
        let top_field = page.add_element(top, ElementKind::text_input(Some("text")));
        let sub = page.add_frame(top);
        page.set_focused_frame(sub);

        assert_eq!(
            focus_next_field(&mut page, &FieldsConfig::default(), 1).unwrap(),
            Some(top_field)
        );
    }

    #[test]
    fn test_fallback_searches_sibling_frames() {
        let mut page = MemoryPage::new();
        let top = page.top_frame();
        let left = page.add_frame(top);
        let right = page.add_frame(top);
        let right_field = page.add_element(right, ElementKind::TextArea);
        page.set_focused_frame(left);

        assert_eq!(
            focus_next_field(&mut page, &FieldsConfig::default(), 1).unwrap(),
            Some(right_field)
        );
    }

    #[test]
    fn test_large_counts_wrap_with_modulo() {
        let (mut page, [a, b, _]) = three_field_page();
        page.focus_element(a);
        assert_eq!(
            focus_next_field(&mut page, &FieldsConfig::default(), 7).unwrap(),
            Some(b)
        );
        page.focus_element(a);
        assert_eq!(
            focus_next_field(&mut page, &FieldsConfig::default(), -3).unwrap(),
            Some(a)
        );
    }
}
