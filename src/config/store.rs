//! Atomically swappable configuration root.
//!
//! # Responsibilities
//! - Hand readers a consistent snapshot (`current`)
//! - Swap in a new root without readers ever seeing a torn tree
//! - Announce swaps and failed reloads through the change logger
//!
//! # Design Decisions
//! - Readers never lock; a snapshot stays valid while they hold it
//! - A failed reload keeps the current configuration

use std::path::Path;
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::config::loader::{load_config, ConfigError};
use crate::config::schema::AppConfig;
use crate::observability::{formatter, ChangeEvent, EventKind};

pub struct ConfigStore {
    current: ArcSwap<AppConfig>,
}

impl ConfigStore {
    pub fn new(initial: AppConfig) -> Self {
        Self {
            current: ArcSwap::from_pointee(initial),
        }
    }

    /// Snapshot of the current root.
    pub fn current(&self) -> Arc<AppConfig> {
        self.current.load_full()
    }

    /// Swap in `next`, returning the previous root.
    pub fn replace(&self, next: AppConfig, source: &str) -> Arc<AppConfig> {
        self.install(Arc::new(next), source)
    }

    /// Load `path` and swap it in, returning the root that was installed.
    /// On failure the current root is kept.
    pub fn reload_from(&self, path: &Path) -> Result<Arc<AppConfig>, ConfigError> {
        match load_config(path) {
            Ok(config) => {
                let installed = Arc::new(config);
                self.install(Arc::clone(&installed), &path.display().to_string());
                Ok(installed)
            }
            Err(e) => {
                tracing::error!("Failed to reload config: {}. Keeping current configuration.", e);
                let event = ChangeEvent::error(path.display().to_string(), &e)
                    .with_config_path(path.display().to_string());
                formatter::log_config_error(&event);
                Err(e)
            }
        }
    }

    fn install(&self, next: Arc<AppConfig>, source: &str) -> Arc<AppConfig> {
        let previous = self.current.swap(Arc::clone(&next));

        let event = ChangeEvent::new(EventKind::ConfigChanged, source)
            .with_environment(next.environment);
        formatter::log_config_change(&event, next.as_ref());
        if previous.environment != next.environment {
            formatter::log_env_change(previous.environment, next.environment);
        }

        previous
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_snapshot_survives_replace() {
        let store = ConfigStore::default();
        let before = store.current();

        let mut next = AppConfig::default();
        next.with_name("v2");
        let previous = store.replace(next, "test");

        assert!(Arc::ptr_eq(&before, &previous));
        assert_eq!(before.name, "");
        assert_eq!(store.current().name, "v2");
    }

    #[test]
    fn test_reload_returns_installed_root() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name = \"reloaded\"").unwrap();

        let store = ConfigStore::default();
        let installed = store.reload_from(file.path()).unwrap();
        assert_eq!(installed.name, "reloaded");
        assert!(Arc::ptr_eq(&installed, &store.current()));

        // A later swap does not change what the reload reported.
        store.replace(AppConfig::default(), "test");
        assert_eq!(installed.name, "reloaded");
        assert!(!Arc::ptr_eq(&installed, &store.current()));
    }

    #[test]
    fn test_failed_reload_keeps_current() {
        let mut initial = AppConfig::default();
        initial.with_name("stable");
        let store = ConfigStore::new(initial);

        assert!(store.reload_from(Path::new("/nonexistent/app.toml")).is_err());
        assert_eq!(store.current().name, "stable");
    }
}
