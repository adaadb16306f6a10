//! Configuration.

use std::path::PathBuf;
use std::sync::Arc;

use arc_swap::ArcSwap;
use once_cell::sync::Lazy;
use parking_lot::Mutex;

pub use caravel_config::{
    Config, ConfigAndUsers, Database, DatabaseType, Error, General, ShardedTable, User, Users,
};

static CONFIG: Lazy<ArcSwap<ConfigAndUsers>> =
    Lazy::new(|| ArcSwap::from_pointee(ConfigAndUsers::default()));

static LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

/// Get the current configuration.
pub fn config() -> Arc<ConfigAndUsers> {
    CONFIG.load().clone()
}

/// Load the configuration files from disk and install them
/// process-wide.
pub fn load(config_path: &PathBuf, users_path: &PathBuf) -> Result<ConfigAndUsers, Error> {
    let _lock = LOCK.lock();
    let config = ConfigAndUsers::load(config_path, users_path)?;
    CONFIG.store(Arc::new(config.clone()));
    Ok(config)
}

/// Install a configuration directly. Used by embedders and tests.
pub fn set(mut config: ConfigAndUsers) -> ConfigAndUsers {
    let _lock = LOCK.lock();
    config.config.check();
    CONFIG.store(Arc::new(config.clone()));
    config
}
