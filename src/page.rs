// Host page adapter - element kinds, focus control, and the frame tree

/// Opaque handle to a page element, assigned by the host adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementRef(pub u64);

/// Opaque handle to a frame (the top-level document or a sub-frame).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRef(pub u64);

/// Closed classification of focusable elements, produced by the host
/// adapter so the classifier never inspects a DOM directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    /// Single-line `<input>`; carries the raw type attribute when present.
    TextInput { input_type: Option<String> },
    /// Multi-line text area.
    TextArea,
    /// Selection/dropdown control.
    Select,
    /// Anything else (links, buttons rendered as divs, plain content).
    Other,
}

impl ElementKind {
    pub fn text_input(input_type: Option<&str>) -> Self {
        ElementKind::TextInput {
            input_type: input_type.map(str::to_string),
        }
    }
}

/// Tri-state edit capability an element reports for itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditFlag {
    Editable,
    NotEditable,
    /// Defer to the parent element; the default for most content.
    #[default]
    Inherit,
}

/// What the input-mode engine needs from a rendered page.
///
/// The host shell implements this over its real DOM; [`MemoryPage`] is an
/// in-memory implementation for tests and the scenario harness. Handles
/// passed back in must come from the same page.
pub trait Page {
    fn focused_element(&self) -> Option<ElementRef>;
    /// Frame that currently holds focus; the top frame when none does.
    fn focused_frame(&self) -> FrameRef;
    fn top_frame(&self) -> FrameRef;
    fn element_kind(&self, el: ElementRef) -> ElementKind;
    fn edit_flag(&self, el: ElementRef) -> EditFlag;
    fn parent(&self, el: ElementRef) -> Option<ElementRef>;
    /// True when the focused frame's document is globally editable.
    fn design_mode_on(&self) -> bool;
    /// Direct sub-frames of `frame` in document order.
    fn child_frames(&self, frame: FrameRef) -> Vec<FrameRef>;
    /// Candidate form controls of the frame's document in document order.
    /// The navigator filters these further by kind and visibility.
    fn form_controls(&self, frame: FrameRef) -> Vec<ElementRef>;
    /// Rendered client size; zero-by-zero elements are not navigable.
    fn client_size(&self, el: ElementRef) -> (u32, u32);
    /// Hidden via styling (display:none or visibility:hidden).
    fn is_css_hidden(&self, el: ElementRef) -> bool;
    fn focus_element(&mut self, el: ElementRef);
    /// Moves focus to the top frame's document root.
    fn focus_root(&mut self);
    fn blur(&mut self, el: ElementRef);
    fn caret_visible(&self) -> bool;
    fn set_caret_visible(&mut self, visible: bool);
}

#[derive(Debug)]
struct ElementData {
    kind: ElementKind,
    edit: EditFlag,
    parent: Option<ElementRef>,
    frame: FrameRef,
    size: (u32, u32),
    css_hidden: bool,
}

#[derive(Debug, Default)]
struct FrameData {
    children: Vec<FrameRef>,
    design_mode: bool,
}

/// In-memory [`Page`] with a single top frame, grown element by element.
#[derive(Debug)]
pub struct MemoryPage {
    elements: Vec<ElementData>,
    frames: Vec<FrameData>,
    focused: Option<ElementRef>,
    focused_frame: FrameRef,
    caret_visible: bool,
}

impl MemoryPage {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            frames: vec![FrameData::default()],
            focused: None,
            focused_frame: FrameRef(0),
            caret_visible: false,
        }
    }

    /// Adds a sub-frame under `parent` and returns its handle.
    pub fn add_frame(&mut self, parent: FrameRef) -> FrameRef {
        let frame = FrameRef(self.frames.len() as u64);
        self.frames.push(FrameData::default());
        self.frames[parent.0 as usize].children.push(frame);
        frame
    }

    /// Adds an element to `frame` and returns its handle. New elements
    /// are visible, normally sized, and inherit editability.
    pub fn add_element(&mut self, frame: FrameRef, kind: ElementKind) -> ElementRef {
        let el = ElementRef(self.elements.len() as u64);
        self.elements.push(ElementData {
            kind,
            edit: EditFlag::Inherit,
            parent: None,
            frame,
            size: (80, 20),
            css_hidden: false,
        });
        el
    }

    pub fn set_parent(&mut self, el: ElementRef, parent: ElementRef) {
        self.elements[el.0 as usize].parent = Some(parent);
    }

    pub fn set_edit_flag(&mut self, el: ElementRef, flag: EditFlag) {
        self.elements[el.0 as usize].edit = flag;
    }

    pub fn set_size(&mut self, el: ElementRef, width: u32, height: u32) {
        self.elements[el.0 as usize].size = (width, height);
    }

    pub fn set_css_hidden(&mut self, el: ElementRef, hidden: bool) {
        self.elements[el.0 as usize].css_hidden = hidden;
    }

    pub fn set_design_mode(&mut self, frame: FrameRef, on: bool) {
        self.frames[frame.0 as usize].design_mode = on;
    }

    /// Focuses a frame without focusing any element in it.
    pub fn set_focused_frame(&mut self, frame: FrameRef) {
        self.focused_frame = frame;
    }
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl Page for MemoryPage {
    fn focused_element(&self) -> Option<ElementRef> {
        self.focused
    }

    fn focused_frame(&self) -> FrameRef {
        self.focused_frame
    }

    fn top_frame(&self) -> FrameRef {
        FrameRef(0)
    }

    fn element_kind(&self, el: ElementRef) -> ElementKind {
        self.elements[el.0 as usize].kind.clone()
    }

    fn edit_flag(&self, el: ElementRef) -> EditFlag {
        self.elements[el.0 as usize].edit
    }

    fn parent(&self, el: ElementRef) -> Option<ElementRef> {
        self.elements[el.0 as usize].parent
    }

    fn design_mode_on(&self) -> bool {
        self.frames[self.focused_frame.0 as usize].design_mode
    }

    fn child_frames(&self, frame: FrameRef) -> Vec<FrameRef> {
        self.frames[frame.0 as usize].children.clone()
    }

    fn form_controls(&self, frame: FrameRef) -> Vec<ElementRef> {
        (0..self.elements.len())
            .map(|i| ElementRef(i as u64))
            .filter(|el| self.elements[el.0 as usize].frame == frame)
            .collect()
    }

    fn client_size(&self, el: ElementRef) -> (u32, u32) {
        self.elements[el.0 as usize].size
    }

    fn is_css_hidden(&self, el: ElementRef) -> bool {
        self.elements[el.0 as usize].css_hidden
    }

    fn focus_element(&mut self, el: ElementRef) {
        self.focused = Some(el);
        self.focused_frame = self.elements[el.0 as usize].frame;
    }

    fn focus_root(&mut self) {
        self.focused = None;
        self.focused_frame = self.top_frame();
    }

    fn blur(&mut self, el: ElementRef) {
        if self.focused == Some(el) {
            self.focused = None;
        }
    }

    fn caret_visible(&self) -> bool {
        self.caret_visible
    }

    fn set_caret_visible(&mut self, visible: bool) {
        self.caret_visible = visible;
    }
}
