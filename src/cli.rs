use clap::Parser;
use std::path::PathBuf;

/// Coracle input-mode harness: replays page focus scenarios against the
/// mode engine and prints the resulting transitions
#[derive(Parser, Debug, Clone)]
#[command(name = "coracle-input")]
#[command(version)]
#[command(about = "Input-mode engine harness for the Coracle browser shell", long_about = None)]
pub struct Cli {
    /// Scenario file to replay (TOML)
    #[arg(value_name = "SCENARIO")]
    pub scenario: Option<PathBuf>,

    /// List the registered input modes and exit
    #[arg(long, default_value_t = false)]
    pub list_modes: bool,

    /// Configuration directory holding input.toml
    #[arg(long, env = "CORACLE_CONFIG_DIR", value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Write default config files and exit
    #[arg(long, default_value_t = false)]
    pub write_default_config: bool,

    /// Reload configuration between steps when input.toml changes
    #[arg(long, default_value_t = false)]
    pub watch_config: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Append logs to this file instead of stderr
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
