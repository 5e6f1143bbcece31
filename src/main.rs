mod cli;
mod scenario;

use std::path::Path;

use color_eyre::eyre::{eyre, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use coracle_input::config::{ConfigEvent, ConfigManager, ConfigWatcherMode};
use coracle_input::ModeRegistry;

use cli::Cli;
use scenario::{Runner, Scenario};

fn main() -> Result<()> {
    color_eyre::install()?;

    // Parse CLI arguments
    let cli = Cli::parse_args();
    let _log_guard = init_tracing(&cli)?;

    let mut config_manager = match cli.config_dir.clone() {
        Some(dir) => ConfigManager::with_dir(dir),
        None => ConfigManager::new()?,
    };

    if cli.write_default_config {
        config_manager.write_default_configs()?;
        println!("wrote {}", config_manager.input_config_path().display());
        return Ok(());
    }

    if cli.list_modes {
        list_modes();
        return Ok(());
    }

    let Some(path) = cli.scenario.as_deref() else {
        eprintln!("No scenario given; pass a scenario file or use --list-modes");
        return Ok(());
    };

    run_scenario(&cli, &mut config_manager, path)
}

fn run_scenario(cli: &Cli, config_manager: &mut ConfigManager, path: &Path) -> Result<()> {
    let scenario = Scenario::load(path)?;
    let mut runner = Runner::new(&scenario, config_manager.input())?;

    // Watch input.toml between steps when asked to
    let mut watcher = if cli.watch_config {
        let config_file = config_manager.input_config_path();
        match ConfigWatcherMode::notify(&config_file) {
            Ok(watcher) => Some(watcher),
            Err(e) => {
                tracing::warn!(
                    "Failed to set up notify watcher, falling back to tick-based: {}",
                    e
                );
                Some(ConfigWatcherMode::tick(config_file, 200))
            }
        }
    } else {
        None
    };

    for (index, step) in scenario.steps.iter().enumerate() {
        if let Some(watcher) = watcher.as_mut() {
            for event in watcher.poll_events() {
                match event {
                    ConfigEvent::Changed(config_path) => {
                        tracing::info!("Reloading config from {}", config_path.display());
                        config_manager.reload_file(&config_path);
                        runner.apply_config(config_manager.input())?;
                    }
                    ConfigEvent::Error(msg) => {
                        tracing::warn!("Config watcher error: {}", msg);
                    }
                }
            }
        }

        println!("step {:>2}: {}", index + 1, step.describe());
        runner.apply(step)?;
        println!(
            "         mode={} keymap={} badge={}",
            runner.mode().unwrap_or("-"),
            runner.keymap().map(|k| k.as_str()).unwrap_or("-"),
            runner.indicator().badge().unwrap_or("-")
        );
    }

    Ok(())
}

fn list_modes() {
    let registry = ModeRegistry::with_base_modes();
    for mode in registry.iter() {
        println!(
            "{:<12} keymap={:<18} badge={:<28} {}",
            mode.name(),
            mode.keymap().as_str(),
            mode.display_name().unwrap_or("-"),
            mode.doc().unwrap_or("")
        );
    }
}

fn init_tracing(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    match cli.log_file.as_deref() {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let name = path
                .file_name()
                .ok_or_else(|| eyre!("--log-file needs a file name"))?;
            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
            Ok(None)
        }
    }
}
