//! Configuration file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::{load_settings, ConfigFormat, LoadError};
use crate::options::ServerSettings;

/// Shared handle to the most recently loaded settings.
pub type SettingsHandle = Arc<ArcSwap<ServerSettings>>;

/// A watcher that monitors a config file and re-extracts settings on change.
pub struct ConfigWatcher {
    reloader: Reloader,
}

#[derive(Clone)]
struct Reloader {
    path: PathBuf,
    format: Option<ConfigFormat>,
    current: SettingsHandle,
    update_tx: mpsc::UnboundedSender<Arc<ServerSettings>>,
}

impl Reloader {
    fn reload(&self) -> Result<Arc<ServerSettings>, LoadError> {
        let settings = Arc::new(load_settings(&self.path, self.format)?);
        self.current.store(settings.clone());
        let _ = self.update_tx.send(settings.clone());
        Ok(settings)
    }
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher seeded with already-loaded settings.
    ///
    /// Returns the watcher and a receiver for settings updates.
    pub fn new(
        path: &Path,
        format: Option<ConfigFormat>,
        initial: ServerSettings,
    ) -> (Self, mpsc::UnboundedReceiver<Arc<ServerSettings>>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        let reloader = Reloader {
            path: path.to_path_buf(),
            format,
            current: Arc::new(ArcSwap::from_pointee(initial)),
            update_tx,
        };
        (Self { reloader }, update_rx)
    }

    /// Handle that always reads the latest good settings.
    pub fn handle(&self) -> SettingsHandle {
        self.reloader.current.clone()
    }

    /// Reload immediately. On failure the current settings are kept.
    pub fn reload_now(&self) -> Result<Arc<ServerSettings>, LoadError> {
        self.reloader.reload()
    }

    /// Start watching the file in a background thread.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let reloader = self.reloader.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!("Config file change detected, reloading...");
                        if let Err(e) = reloader.reload() {
                            tracing::error!(
                                "Failed to reload config: {}. Keeping current settings.",
                                e
                            );
                        }
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.reloader.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.reloader.path, "Config watcher started");
        Ok(watcher)
    }
}
