use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use swatch::config::{self, ConfigError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatchError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{} has no parent directory", .0.display())]
    NoParent(PathBuf),
    #[error("Failed to prepare config directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to watch config directory: {0}")]
    Notify(#[from] notify::Error),
}

fn is_config_change(event: &Event, config_path: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| p == config_path)
}

/// Change feed for one config file. The parent directory is watched so a file
/// created after startup is picked up too.
pub struct ConfigWatcher {
    config_path: PathBuf,
    events: async_channel::Receiver<notify::Result<Event>>,
    _watcher: RecommendedWatcher,
}

impl ConfigWatcher {
    pub fn new(config_path: PathBuf) -> Result<Self, WatchError> {
        let dir = config_path
            .parent()
            .ok_or_else(|| WatchError::NoParent(config_path.clone()))?;
        fs_err::create_dir_all(dir)?;

        let (tx, events) = async_channel::unbounded();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.try_send(res);
        })?;
        watcher.watch(dir, RecursiveMode::NonRecursive)?;
        log::debug!("Watching {}", config_path.display());

        Ok(Self {
            config_path,
            events,
            _watcher: watcher,
        })
    }

    pub fn for_user_config() -> Result<Self, WatchError> {
        Self::new(config::get_config_path()?)
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Resolves on the next change to the config file, `None` once the watcher has stopped.
    pub async fn changed(&mut self) -> Option<()> {
        loop {
            match self.events.recv().await.ok()? {
                Ok(event) if is_config_change(&event, &self.config_path) => return Some(()),
                Ok(_) => {}
                Err(e) => log::error!("Watch error: {}", e),
            }
        }
    }
}
