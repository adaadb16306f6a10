use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::database::DatabaseType;

/// General settings apply to the whole installation or act as
/// defaults for all database pools.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct General {
    /// Database flavor used unless a database entry overrides it.
    ///
    /// _Default:_ `sqlite`
    #[serde(default)]
    pub db: DatabaseType,

    /// Directory for SQLite database files.
    ///
    /// _Default:_ `data`
    #[serde(default = "General::data_dir")]
    pub data_dir: PathBuf,

    /// Server default timezone, used when neither the user nor
    /// the session provides one.
    ///
    /// _Default:_ `UTC`
    #[serde(default = "General::timezone")]
    pub timezone: String,

    /// Maximum number of connections per database pool.
    ///
    /// _Default:_ `10`
    #[serde(default = "General::default_pool_size")]
    pub default_pool_size: usize,

    /// Minimum number of connections to keep open per pool.
    ///
    /// _Default:_ `1`
    #[serde(default = "General::min_pool_size")]
    pub min_pool_size: usize,

    /// Time to wait for a server connection before giving up, ms.
    ///
    /// _Default:_ `5000`
    #[serde(default = "General::connect_timeout")]
    pub connect_timeout: u64,

    /// Close server connections idle for longer than this, ms.
    ///
    /// _Default:_ `60000`
    #[serde(default = "General::idle_timeout")]
    pub idle_timeout: u64,
}

impl General {
    fn data_dir() -> PathBuf {
        PathBuf::from("data")
    }

    fn timezone() -> String {
        "UTC".into()
    }

    fn default_pool_size() -> usize {
        10
    }

    fn min_pool_size() -> usize {
        1
    }

    fn connect_timeout() -> u64 {
        5_000
    }

    fn idle_timeout() -> u64 {
        60_000
    }

    /// Connect timeout.
    pub fn connect_timeout_duration(&self) -> Duration {
        Duration::from_millis(self.connect_timeout)
    }

    /// Idle timeout.
    pub fn idle_timeout_duration(&self) -> Duration {
        Duration::from_millis(self.idle_timeout)
    }
}

impl Default for General {
    fn default() -> Self {
        Self {
            db: DatabaseType::default(),
            data_dir: Self::data_dir(),
            timezone: Self::timezone(),
            default_pool_size: Self::default_pool_size(),
            min_pool_size: Self::min_pool_size(),
            connect_timeout: Self::connect_timeout(),
            idle_timeout: Self::idle_timeout(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults() {
        let general = General::default();
        assert_eq!(general.db, DatabaseType::Sqlite);
        assert_eq!(general.timezone, "UTC");
        assert_eq!(general.connect_timeout_duration(), Duration::from_secs(5));
    }
}
