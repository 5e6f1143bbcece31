// Config module - on-disk settings for focus handling and field navigation

mod watcher;

pub use watcher::{ConfigEvent, ConfigWatcherMode};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::BaseDirs;

use crate::error::{InputError, Result};
use crate::page::ElementKind;

const CONFIG_DIR: &str = "coracle";
const INPUT_CONFIG_FILE: &str = "input.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[derive(Default)]
#[serde(default)]
pub struct InputConfig {
    pub focus: FocusConfig,
    pub fields: FieldsConfig,
    pub caret: CaretConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusConfig {
    /// Blur fields that pages focus without a recent user keystroke.
    pub prevent_automatic_focus: bool,
    /// Focus within this many milliseconds of the last keystroke counts
    /// as user-initiated.
    pub automatic_focus_window_ms: u64,
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            prevent_automatic_focus: true,
            automatic_focus_window_ms: 20,
        }
    }
}

impl FocusConfig {
    pub fn automatic_focus_window(&self) -> Duration {
        Duration::from_millis(self.automatic_focus_window_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldsConfig {
    pub text_inputs: bool,
    pub text_areas: bool,
    pub selects: bool,
    /// Input type attributes the field navigator skips, compared
    /// case-insensitively.
    pub excluded_input_types: Vec<String>,
}

impl Default for FieldsConfig {
    fn default() -> Self {
        Self {
            text_inputs: true,
            text_areas: true,
            selects: true,
            excluded_input_types: vec!["hidden".to_string()],
        }
    }
}

impl FieldsConfig {
    /// Whether the field navigator treats this element as a candidate.
    pub fn admits(&self, kind: &ElementKind) -> bool {
        match kind {
            ElementKind::TextInput { input_type } => {
                if !self.text_inputs {
                    return false;
                }
                match input_type {
                    Some(ty) => !self
                        .excluded_input_types
                        .iter()
                        .any(|excluded| excluded.eq_ignore_ascii_case(ty)),
                    None => true,
                }
            }
            ElementKind::TextArea => self.text_areas,
            ElementKind::Select => self.selects,
            ElementKind::Other => false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaretConfig {
    pub browse_with_caret: bool,
}

impl Default for CaretConfig {
    fn default() -> Self {
        Self {
            browse_with_caret: false,
        }
    }
}

pub struct ConfigManager {
    config_dir: PathBuf,
    input: InputConfig,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        let config_dir = Self::default_config_dir()?;
        Ok(Self::with_dir(config_dir))
    }

    pub fn with_dir(config_dir: PathBuf) -> Self {
        let input = Self::load_input(&config_dir);
        Self { config_dir, input }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn input(&self) -> &InputConfig {
        &self.input
    }

    pub fn input_config_path(&self) -> PathBuf {
        self.config_dir.join(INPUT_CONFIG_FILE)
    }

    pub fn reload(&mut self) {
        self.input = Self::load_input(&self.config_dir);
    }

    pub fn reload_file(&mut self, path: &Path) {
        let file_name = path.file_name().and_then(|n| n.to_str());

        match file_name {
            Some(INPUT_CONFIG_FILE) => {
                self.input = Self::load_input(&self.config_dir);
            }
            _ => {
                self.reload();
            }
        }
    }

    fn default_config_dir() -> Result<PathBuf> {
        BaseDirs::new()
            .map(|dirs| dirs.config_dir().join(CONFIG_DIR))
            .ok_or_else(|| InputError::Config("Could not determine config directory".to_string()))
    }

    fn load_input(config_dir: &Path) -> InputConfig {
        let path = config_dir.join(INPUT_CONFIG_FILE);
        Self::load_toml_file(&path).unwrap_or_default()
    }

    fn load_toml_file<T: for<'de> Deserialize<'de> + Default>(path: &Path) -> Option<T> {
        if !path.exists() {
            return None;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => Some(config),
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}", path.display(), e);
                    None
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn ensure_config_dir(&self) -> Result<()> {
        if !self.config_dir.exists() {
            std::fs::create_dir_all(&self.config_dir)
                .map_err(|e| InputError::Config(format!("Failed to create config dir: {}", e)))?;
        }
        Ok(())
    }

    pub fn write_default_configs(&self) -> Result<()> {
        self.ensure_config_dir()?;

        let input_path = self.config_dir.join(INPUT_CONFIG_FILE);
        if !input_path.exists() {
            let content = toml::to_string_pretty(&InputConfig::default())
                .map_err(|e| InputError::Config(format!("Failed to serialize config: {}", e)))?;
            std::fs::write(&input_path, content)
                .map_err(|e| InputError::Config(format!("Failed to write config: {}", e)))?;
        }

        Ok(())
    }
}
