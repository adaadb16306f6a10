use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::read_to_string;
use std::path::PathBuf;
use tracing::{info, warn};

use super::database::Database;
use super::error::Error;
use super::general::General;
use super::sharding::ShardedTable;
use super::users::Users;

/// caravel.toml and users.toml.
#[derive(Debug, Clone)]
pub struct ConfigAndUsers {
    /// caravel.toml
    pub config: Config,
    /// users.toml
    pub users: Users,
    /// Path to caravel.toml.
    pub config_path: PathBuf,
    /// Path to users.toml.
    pub users_path: PathBuf,
}

impl ConfigAndUsers {
    /// Load configuration from disk or use defaults.
    pub fn load(config_path: &PathBuf, users_path: &PathBuf) -> Result<Self, Error> {
        let mut config: Config = if let Ok(config) = read_to_string(config_path) {
            let config = match toml::from_str(&config) {
                Ok(config) => config,
                Err(err) => return Err(Error::config(config_path, err)),
            };
            info!("loaded \"{}\"", config_path.display());
            config
        } else {
            warn!(
                "\"{}\" doesn't exist, loading defaults instead",
                config_path.display()
            );
            Config::default()
        };

        config.check();

        let users: Users = if let Ok(users) = read_to_string(users_path) {
            let users = match toml::from_str(&users) {
                Ok(users) => users,
                Err(err) => return Err(Error::config(users_path, err)),
            };
            info!("loaded \"{}\"", users_path.display());
            users
        } else {
            warn!(
                "\"{}\" doesn't exist, loading defaults instead",
                users_path.display()
            );
            Users::default()
        };

        Ok(ConfigAndUsers {
            config,
            users,
            config_path: config_path.to_owned(),
            users_path: users_path.to_owned(),
        })
    }
}

impl Default for ConfigAndUsers {
    fn default() -> Self {
        Self {
            config: Config::default(),
            users: Users::default(),
            config_path: PathBuf::from("caravel.toml"),
            users_path: PathBuf::from("users.toml"),
        }
    }
}

/// caravel.toml.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: General,

    /// The main, unsharded database. Also serves sharded tables
    /// while a shard migration is in progress.
    #[serde(default)]
    pub main: Database,

    /// Sharded tables.
    #[serde(default)]
    pub sharded_tables: Vec<ShardedTable>,
}

impl Config {
    /// Sanity-check the configuration, logging anything suspicious.
    pub fn check(&mut self) {
        let mut seen = HashSet::new();
        self.sharded_tables.retain(|table| {
            if seen.insert(table.table.clone()) {
                true
            } else {
                warn!(
                    "duplicate sharded table \"{}\", keeping the first entry",
                    table.table
                );
                false
            }
        });

        for table in &self.sharded_tables {
            table.check();
        }
    }

    /// Find a sharded table by name.
    pub fn sharded_table(&self, name: &str) -> Option<&ShardedTable> {
        self.sharded_tables.iter().find(|table| table.table == name)
    }
}
