//! Configuration file watcher for hot reload.
//!
//! # Responsibilities
//! - Notice edits to the config file, including editors that save by rename
//! - Load and validate the new file, forward it to the server
//! - Warn about sections that only take effect on restart
//!
//! # Design Decisions
//! - Watches the parent directory and filters on the file name, so the watch
//!   survives the file being replaced
//! - Invalid files are logged and dropped; the server keeps its current site

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::ShellConfig;
use crate::observability::metrics;

/// A watcher that monitors the configuration file for changes.
pub struct ConfigWatcher {
    path: PathBuf,
    startup: ShellConfig,
    update_tx: mpsc::UnboundedSender<ShellConfig>,
}

impl ConfigWatcher {
    /// Create a watcher for `path`, whose contents are currently applied as
    /// `startup`.
    ///
    /// Returns the watcher and a receiver for validated configuration updates.
    pub fn new(path: &Path, startup: ShellConfig) -> (Self, mpsc::UnboundedReceiver<ShellConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                startup,
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching in a background thread.
    ///
    /// The returned handle must be kept alive for as long as reloads are wanted.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let file_name: OsString = self
            .path
            .file_name()
            .ok_or_else(|| notify::Error::generic("config path has no file name"))?
            .to_owned();
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let Self {
            path,
            startup,
            update_tx,
        } = self;
        let watched = path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    let touches_config = event
                        .paths
                        .iter()
                        .any(|p| p.file_name() == Some(file_name.as_os_str()));
                    if touches_config && (event.kind.is_modify() || event.kind.is_create()) {
                        reload(&path, &startup, &update_tx);
                    }
                }
                Err(e) => tracing::error!(error = ?e, "Watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?watched, "Config watcher started");
        Ok(watcher)
    }
}

fn reload(path: &Path, startup: &ShellConfig, tx: &mpsc::UnboundedSender<ShellConfig>) {
    tracing::info!(path = ?path, "Config file change detected, reloading");
    match load_config(path) {
        Ok(new_config) => {
            for section in restart_required(startup, &new_config) {
                tracing::warn!(section, "Change takes effect on restart only");
            }
            let _ = tx.send(new_config);
        }
        Err(e) => {
            metrics::record_config_reload(false);
            tracing::error!(
                error = %e,
                "Failed to reload config, keeping current configuration"
            );
        }
    }
}

/// Sections of `new` that differ from the running `startup` configuration
/// but are only read when the server starts.
pub fn restart_required(startup: &ShellConfig, new: &ShellConfig) -> Vec<&'static str> {
    let mut sections = Vec::new();
    if startup.listener != new.listener {
        sections.push("listener");
    }
    if startup.site.assets_dir != new.site.assets_dir
        || startup.site.asset_prefix != new.site.asset_prefix
    {
        sections.push("site assets");
    }
    if startup.timeouts != new.timeouts {
        sections.push("timeouts");
    }
    if startup.observability != new.observability {
        sections.push("observability");
    }
    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LocationKind;
    use std::fs;
    use tokio::time::timeout;

    fn replace_file(path: &Path, content: &str) {
        let tmp = path.with_extension("toml.tmp");
        fs::write(&tmp, content).unwrap();
        fs::rename(&tmp, path).unwrap();
    }

    #[tokio::test]
    async fn test_edits_are_validated_and_forwarded() {
        let dir = std::env::temp_dir().join(format!("catalog-shell-watch-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("shell.toml");
        fs::write(&path, "").unwrap();

        let (watcher, mut updates) = ConfigWatcher::new(&path, ShellConfig::default());
        let _handle = watcher.run().unwrap();

        // Rejected by validation: nothing reaches the server
        replace_file(&path, "[routing]\nredirect_to = \"/nowhere\"\n");
        assert!(timeout(Duration::from_millis(500), updates.recv()).await.is_err());

        replace_file(&path, "[location]\nmode = \"hashbang\"\nhash_prefix = \"!\"\n");
        let config = timeout(Duration::from_secs(5), updates.recv())
            .await
            .expect("no update within 5s")
            .unwrap();
        assert_eq!(config.location.mode, LocationKind::Hashbang);
        assert_eq!(config.location.hash_prefix, "!");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_other_files_in_directory_are_ignored() {
        let dir = std::env::temp_dir().join(format!("catalog-shell-watch-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("shell.toml");
        fs::write(&path, "").unwrap();

        let (watcher, mut updates) = ConfigWatcher::new(&path, ShellConfig::default());
        let _handle = watcher.run().unwrap();

        fs::write(dir.join("other.toml"), "[location]\nmode = \"hashbang\"\n").unwrap();
        assert!(timeout(Duration::from_millis(500), updates.recv()).await.is_err());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_restart_required_sections() {
        let startup = ShellConfig::default();

        let mut routing_only = startup.clone();
        routing_only.location.mode = LocationKind::Hashbang;
        routing_only.routing.redirect_status = 301;
        routing_only.site.shell_path = Some(PathBuf::from("index.html"));
        assert!(restart_required(&startup, &routing_only).is_empty());

        let mut moved = startup.clone();
        moved.listener.bind_address = "127.0.0.1:9000".into();
        moved.site.assets_dir = Some(PathBuf::from("static"));
        moved.observability.log_level = "debug".into();
        assert_eq!(
            restart_required(&startup, &moved),
            vec!["listener", "site assets", "observability"]
        );
    }
}
