// Error types for mode registration, transitions, and field navigation

use thiserror::Error;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Input mode already registered: {name}")]
    DuplicateMode { name: String },

    #[error("Input mode not registered: {name}")]
    UnknownMode { name: String },

    #[error("Buffer has no active input mode")]
    NoActiveMode,

    #[error("No form field found")]
    NoFieldFound,

    #[error("{failed} of {total} mode-change hooks failed: {first}")]
    HookFanout {
        failed: usize,
        total: usize,
        first: String,
    },

    #[error("Mode effect failed: {0}")]
    Effect(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, InputError>;
