use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::{Duration, SystemTime};

use notify::{RecommendedWatcher, RecursiveMode, Watcher};

use crate::error::{InputError, Result};

#[derive(Debug, Clone)]
pub enum ConfigEvent {
    Changed(PathBuf),
    Error(String),
}

/// Filesystem-notification watcher for the input config file. Watches the
/// parent directory so editors that replace the file are still seen.
pub struct ConfigWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<ConfigEvent>,
}

impl ConfigWatcher {
    pub fn new(config_file: &Path) -> Result<Self> {
        let (tx, rx) = channel::<ConfigEvent>();

        let watcher = Self::setup_watcher(config_file, tx)?;

        Ok(Self {
            _watcher: watcher,
            rx,
        })
    }

    fn setup_watcher(config_file: &Path, tx: Sender<ConfigEvent>) -> Result<RecommendedWatcher> {
        let file_name: OsString = config_file
            .file_name()
            .map(|n| n.to_os_string())
            .ok_or_else(|| {
                InputError::Config(format!("Not a config file path: {}", config_file.display()))
            })?;
        let tx_clone = tx.clone();

        let mut watcher =
            notify::recommended_watcher(move |result: notify::Result<notify::Event>| {
                match result {
                    Ok(event) => {
                        if event.kind.is_modify()
                            || event.kind.is_create()
                            || event.kind.is_remove()
                        {
                            for path in event.paths {
                                if path.file_name() == Some(file_name.as_os_str()) {
                                    let _ = tx_clone.send(ConfigEvent::Changed(path));
                                }
                            }
                        }
                    }
                    Err(e) => {
                        let _ = tx_clone.send(ConfigEvent::Error(e.to_string()));
                    }
                }
            })
            .map_err(|e| InputError::Config(format!("Failed to create watcher: {}", e)))?;

        if let Some(dir) = config_file.parent() {
            if dir.exists() {
                watcher
                    .watch(dir, RecursiveMode::NonRecursive)
                    .map_err(|e| {
                        InputError::Config(format!("Failed to watch config dir: {}", e))
                    })?;
            }
        }

        Ok(watcher)
    }

    pub fn try_recv(&self) -> Option<ConfigEvent> {
        self.rx.try_recv().ok()
    }

    pub fn poll_events(&self) -> Vec<ConfigEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.try_recv() {
            events.push(event);
        }
        events
    }
}

/// Mtime-polling fallback for filesystems where notification does not
/// work. A vanished file counts as a change so the defaults get reloaded.
pub struct TickBasedWatcher {
    config_file: PathBuf,
    last_check: std::time::Instant,
    check_interval: Duration,
    last_mtime: Option<SystemTime>,
}

impl TickBasedWatcher {
    pub fn new(config_file: PathBuf, check_interval_ms: u64) -> Self {
        let last_mtime = Self::mtime_of(&config_file);
        Self {
            config_file,
            last_check: std::time::Instant::now(),
            check_interval: Duration::from_millis(check_interval_ms),
            last_mtime,
        }
    }

    fn mtime_of(path: &Path) -> Option<SystemTime> {
        std::fs::metadata(path).and_then(|m| m.modified()).ok()
    }

    pub fn check(&mut self) -> Vec<ConfigEvent> {
        if self.last_check.elapsed() < self.check_interval {
            return Vec::new();
        }

        self.last_check = std::time::Instant::now();
        let current = Self::mtime_of(&self.config_file);
        if current == self.last_mtime {
            return Vec::new();
        }

        self.last_mtime = current;
        vec![ConfigEvent::Changed(self.config_file.clone())]
    }
}

pub enum ConfigWatcherMode {
    Notify(ConfigWatcher),
    Tick(TickBasedWatcher),
}

impl ConfigWatcherMode {
    pub fn notify(config_file: &Path) -> Result<Self> {
        Ok(Self::Notify(ConfigWatcher::new(config_file)?))
    }

    pub fn tick(config_file: PathBuf, check_interval_ms: u64) -> Self {
        Self::Tick(TickBasedWatcher::new(config_file, check_interval_ms))
    }

    pub fn poll_events(&mut self) -> Vec<ConfigEvent> {
        match self {
            Self::Notify(watcher) => watcher.poll_events(),
            Self::Tick(watcher) => watcher.check(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_tick_watcher_sees_rewrite() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("input.toml");
        fs::write(&config_path, "[focus]\n").unwrap();

        let mut watcher = TickBasedWatcher::new(config_path.clone(), 0);

        let events = watcher.check();
        assert!(events.is_empty());

        std::thread::sleep(Duration::from_millis(10));
        fs::write(&config_path, "[focus]\nprevent_automatic_focus = false\n").unwrap();

        let events = watcher.check();
        assert_eq!(events.len(), 1);
        match &events[0] {
            ConfigEvent::Changed(path) => assert_eq!(path, &config_path),
            _ => panic!("Expected Changed event"),
        }
    }

    #[test]
    fn test_tick_watcher_sees_file_appear() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("input.toml");

        let mut watcher = TickBasedWatcher::new(config_path.clone(), 0);
        assert!(watcher.check().is_empty());

        fs::write(&config_path, "[caret]\n").unwrap();
        let events = watcher.check();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_tick_watcher_sees_file_removed() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("input.toml");
        fs::write(&config_path, "[caret]\n").unwrap();

        let mut watcher = TickBasedWatcher::new(config_path.clone(), 0);
        fs::remove_file(&config_path).unwrap();

        let events = watcher.check();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_tick_watcher_respects_interval() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("input.toml");

        let mut watcher = TickBasedWatcher::new(config_path.clone(), 60_000);
        fs::write(&config_path, "[caret]\n").unwrap();

        assert!(watcher.check().is_empty());
    }
}
