//! Input-mode management for a keyboard-driven browser shell.
//!
//! Each buffer carries a current input mode drawn from a [`registry`],
//! deciding whether keystrokes run commands or reach the page. A
//! [`classifier`](classify::Classifier) follows page focus to pick the
//! mode, blurring fields that pages focus without the user asking, and
//! a [`navigator`](navigate::focus_next_field) cycles focus through the
//! visible form fields of the frame tree.

pub mod buffer;
pub mod caret;
pub mod classify;
pub mod clock;
pub mod config;
pub mod error;
pub mod event;
pub mod hooks;
pub mod indicator;
pub mod mode;
pub mod navigate;
pub mod page;
pub mod registry;

pub use buffer::{Buffer, BufferId};
pub use classify::{target_for, Classifier, FocusTarget};
pub use error::{InputError, Result};
pub use event::{ModeTransition, PageEvent};
pub use indicator::ModeIndicator;
pub use mode::{InputMode, KeymapId};
pub use navigate::{focus_next_field, focus_previous_field};
pub use page::{ElementKind, ElementRef, FrameRef, MemoryPage, Page};
pub use registry::{ModeEffects, ModeRegistry};
